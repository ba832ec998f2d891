//! Thicket CLI - markup parsing and debugging tool
//!
//! Usage:
//!   thicket <file>                     Parse and display the element tree
//!   thicket <file> --json              Output the tree as JSON
//!   thicket <file> --serialize         Re-render the tree as markup
//!   thicket <file> --normalized        Show the normalized input first
//!   thicket <file> --issues            List non-fatal parse issues
//!
//! Examples:
//!   thicket icon.svg --serialize --indent
//!   thicket --markup '<a k="v"><b/></a>' --json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use thicket_common::warning::clear_warnings;
use thicket_dom::{AttributesMap, DomTree, NodeId};
use thicket_markup::{
    SerializeOptions, TreeBuilder, normalize, print_tree, serialize_with_options,
};

/// Parse tag markup into an element tree and inspect the result.
#[derive(Parser, Debug)]
#[command(name = "thicket", version)]
struct Cli {
    /// Markup file to parse.
    file: Option<PathBuf>,

    /// Parse this markup string instead of a file.
    #[arg(long, conflicts_with = "file")]
    markup: Option<String>,

    /// Print the normalized input before parsing it.
    #[arg(short, long)]
    normalized: bool,

    /// Print the tree as JSON.
    #[arg(short, long, conflicts_with = "serialize")]
    json: bool,

    /// Print the tree re-rendered as markup.
    #[arg(short, long)]
    serialize: bool,

    /// With --serialize, use the outline layout (`<tag k=v >`, no text).
    #[arg(long, requires = "serialize")]
    legacy: bool,

    /// With --serialize, put each element on its own line.
    #[arg(long, requires = "serialize", conflicts_with = "legacy")]
    indent: bool,

    /// List non-fatal issues found while parsing.
    #[arg(short, long)]
    issues: bool,
}

/// JSON view of one element. Absent fields are left out.
#[derive(Serialize)]
struct JsonNode<'a> {
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute: Option<&'a AttributesMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

fn to_json(tree: &DomTree, id: NodeId) -> Option<JsonNode<'_>> {
    let node = tree.get(id)?;
    Some(JsonNode {
        tag: node.tag_name(),
        attribute: node.attrs(),
        text: node.text(),
        children: tree
            .children(id)
            .iter()
            .filter_map(|&child| to_json(tree, child))
            .collect(),
    })
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(markup) = &cli.markup {
        return Ok(markup.clone());
    }
    let Some(path) = &cli.file else {
        bail!("no input: pass a FILE or --markup '<tag>...</tag>'");
    };
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn print_header(title: &str) {
    println!("{}", format!("=== {title} ===").bold());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let markup = read_input(&cli)?;

    let normalized = normalize(&markup);
    if cli.normalized {
        print_header(&format!("Normalized Input ({} chars)", normalized.chars().count()));
        println!("{normalized}");
        println!();
    }

    // Each document reports its own issues.
    clear_warnings();
    let mut builder = TreeBuilder::new(&normalized);
    let result = builder.run();

    if cli.issues {
        print_header(&format!("Issues ({})", builder.issues().len()));
        for issue in builder.issues() {
            println!("  {:>5}: {}", issue.position, issue.message);
        }
        println!();
    }

    let tree = result.context("failed to parse markup")?;
    let root = tree.root().context("parsed tree has no root element")?;

    if cli.json {
        let json = to_json(&tree, root).context("root element missing from tree")?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if cli.serialize {
        let options = if cli.legacy {
            SerializeOptions::legacy()
        } else {
            SerializeOptions::default().indent(cli.indent)
        };
        print!("{}", serialize_with_options(&tree, &options));
        if !cli.indent && !cli.legacy {
            println!();
        }
    } else {
        print_header(&format!("Element Tree ({} elements)", tree.len()));
        print_tree(&tree, root, 0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use thicket_markup::parse;

    #[test]
    fn test_json_omits_absent_fields() {
        let tree = parse(r#"<a k="v">hi<b/></a>"#).unwrap();
        let json = serde_json::to_value(to_json(&tree, NodeId::ROOT).unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "tag": "a",
                "attribute": { "k": "v" },
                "text": "hi",
                "children": [{ "tag": "b" }],
            })
        );
    }

    #[test]
    fn test_cli_rejects_file_and_markup_together() {
        let parsed = Cli::try_parse_from(["thicket", "in.html", "--markup", "<a/>"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_legacy_requires_serialize() {
        assert!(Cli::try_parse_from(["thicket", "--markup", "<a/>", "--legacy"]).is_err());
        let cli = Cli::try_parse_from(["thicket", "--markup", "<a/>", "-s", "--legacy"]).unwrap();
        assert!(cli.serialize && cli.legacy);
        assert_eq!(read_input(&cli).unwrap(), "<a/>");
    }
}
