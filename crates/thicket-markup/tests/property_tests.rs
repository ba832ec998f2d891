//! Property tests for the normalizer, tree builder, and serializer.

use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use thicket_markup::{MarkupError, normalize, parse, serialize};

/// Short strings over the characters the normalizer treats specially.
#[derive(Debug, Clone)]
struct MarkupSoup(String);

impl Arbitrary for MarkupSoup {
    fn arbitrary(g: &mut Gen) -> Self {
        const ALPHABET: [char; 9] = [' ', '\t', '\n', '<', '>', '/', '=', '"', 'a'];
        let len = usize::arbitrary(g) % 16;
        Self(
            (0..len)
                .map(|_| *g.choose(&ALPHABET[..]).unwrap_or(&' '))
                .collect(),
        )
    }
}

fn letters(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphabetic).collect()
}

fn alphanumerics(s: &str) -> String {
    s.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[quickcheck]
fn prop_parse_never_panics(input: String) -> bool {
    let _ = parse(&input);
    true
}

#[quickcheck]
fn prop_normalize_is_idempotent(input: String) -> bool {
    let once = normalize(&input);
    normalize(&once) == once
}

#[quickcheck]
fn prop_normalize_is_idempotent_on_markup_characters(input: MarkupSoup) -> bool {
    let once = normalize(&input.0);
    normalize(&once) == once
}

#[quickcheck]
fn prop_plain_text_has_no_root(input: String) -> bool {
    let text: String = input.chars().filter(|&c| c != '<').collect();
    parse(&text) == Err(MarkupError::NoRootElement)
}

#[quickcheck]
fn prop_self_closing_root_keeps_its_name(name: String) -> TestResult {
    let name = letters(&name);
    if name.is_empty() {
        return TestResult::discard();
    }
    let Ok(tree) = parse(&format!("<{name}/>")) else {
        return TestResult::failed();
    };
    TestResult::from_bool(tree.root().and_then(|root| tree.tag_name(root)) == Some(&*name))
}

#[quickcheck]
fn prop_simple_element_round_trips(
    name: String,
    key: String,
    value: String,
    text: String,
) -> TestResult {
    let (name, key) = (letters(&name), letters(&key));
    if name.is_empty() || key.is_empty() {
        return TestResult::discard();
    }
    let (value, text) = (alphanumerics(&value), alphanumerics(&text));
    let markup = format!(r#"<{name} {key}="{value}">{text}</{name}>"#);
    match parse(&markup) {
        Ok(tree) => TestResult::from_bool(serialize(&tree) == markup),
        Err(_) => TestResult::failed(),
    }
}
