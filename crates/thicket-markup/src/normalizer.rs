//! Whitespace canonicalization applied before tree building.
//!
//! The tree builder looks at most one character ahead, so every place where
//! the source may carry optional whitespace (indentation, `< div`, `a = "b"`,
//! `<br />`) is folded into a single canonical spelling first.

/// Canonicalize `input` for single-pass scanning.
///
/// In order:
/// 1. newlines are removed together with the run of spaces that follows them
///    (indentation), and any remaining newlines are removed;
/// 2. runs of spaces collapse to one space;
/// 3. whitespace directly after `<` and directly before `>` or `/>` is removed;
/// 4. whitespace around an `=` that is followed by `"` is removed, giving
///    `name="value"`.
///
/// The result of normalizing an already normalized string is the same string.
#[must_use]
pub fn normalize(input: &str) -> String {
    let text = strip_newlines(input);
    let text = collapse_spaces(&text);
    let text = trim_tag_delimiters(&text);
    tighten_assignments(&text)
}

fn strip_newlines(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            while chars.next_if_eq(&' ').is_some() {}
            continue;
        }
        out.push(c);
    }
    out
}

fn collapse_spaces(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Index of the first non-whitespace character at or after `start`.
fn skip_whitespace(chars: &[char], start: usize) -> usize {
    chars[start.min(chars.len())..]
        .iter()
        .position(|c| !c.is_whitespace())
        .map_or(chars.len(), |offset| start + offset)
}

fn closes_tag(chars: &[char], i: usize) -> bool {
    match chars.get(i) {
        Some('>') => true,
        Some('/') => chars.get(i + 1) == Some(&'>'),
        _ => false,
    }
}

fn trim_tag_delimiters(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let end = skip_whitespace(&chars, i);
            if !closes_tag(&chars, end) {
                out.extend(&chars[i..end]);
            } else if chars[end] == '>' && out.ends_with('/') {
                // `/ >` only becomes `/>` now, so the run before the `/` goes too.
                let _ = out.pop();
                out.truncate(out.trim_end().len());
                out.push('/');
            }
            i = end;
            continue;
        }
        out.push(c);
        i = if c == '<' {
            skip_whitespace(&chars, i + 1)
        } else {
            i + 1
        };
    }
    out
}

/// An `=` at `i` whose next non-whitespace character is `"`.
fn is_assignment(chars: &[char], i: usize) -> bool {
    chars.get(i) == Some(&'=') && chars.get(skip_whitespace(chars, i + 1)) == Some(&'"')
}

fn tighten_assignments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            let end = skip_whitespace(&chars, i);
            if !is_assignment(&chars, end) {
                out.extend(&chars[i..end]);
            }
            i = end;
        } else if is_assignment(&chars, i) {
            out.push('=');
            i = skip_whitespace(&chars, i + 1);
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_newlines_drops_indentation() {
        assert_eq!(strip_newlines("<a>\n    <b>\n</a>"), "<a><b></a>");
        assert_eq!(strip_newlines("x\n\n  y"), "xy");
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(collapse_spaces("a    b  c"), "a b c");
        assert_eq!(collapse_spaces("\t\t"), "\t\t");
    }

    #[test]
    fn test_trim_tag_delimiters() {
        assert_eq!(trim_tag_delimiters("< div >"), "<div>");
        assert_eq!(trim_tag_delimiters("<br />"), "<br/>");
        assert_eq!(trim_tag_delimiters("a / b"), "a / b");
    }

    #[test]
    fn test_trim_spaced_self_close() {
        assert_eq!(trim_tag_delimiters("<br / >"), "<br/>");
        assert_eq!(trim_tag_delimiters(" /\t>"), "/>");
        assert_eq!(trim_tag_delimiters("x / / >"), "x //>");
    }

    #[test]
    fn test_tighten_assignments_needs_quote() {
        assert_eq!(tighten_assignments("k = \"v\""), "k=\"v\"");
        assert_eq!(tighten_assignments("1 = 1"), "1 = 1");
    }

    #[test]
    fn test_skip_whitespace_past_end() {
        let chars: Vec<char> = "a ".chars().collect();
        assert_eq!(skip_whitespace(&chars, 1), 2);
        assert_eq!(skip_whitespace(&chars, 5), 2);
    }
}
