//! Line reader for the Darknet cfg dialect.
//!
//! ```text
//! [net]
//! width=416     # comments run to end of line
//! height=416
//!
//! [convolutional]
//! filters=32
//! ```

use crate::cfg::Section;
use crate::error::CfgError;
use regex::Regex;
use std::sync::LazyLock;

// `[xy]` at minimum: a header line is longer than three characters.
const SECTION_HEADER_RE: &str = r"^\[(.{2,})\]$";

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SECTION_HEADER_RE).expect("section header pattern is valid"));

/// Tokenize cfg text into section records, in file order.
///
/// Keys that appear before the first header are kept in an untagged section
/// which the first header then claims. A document without any header yields
/// no sections.
pub fn read(text: &str) -> Result<Vec<Section>, CfgError> {
    let mut sections = Vec::new();
    let mut current = Section::default();

    for (lineno, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = SECTION_HEADER.captures(line) {
            if current.is_tagged() {
                sections.push(std::mem::take(&mut current));
            }
            current.kind = caps[1].to_string();
            continue;
        }

        match split_property(line) {
            Some((key, value)) => current.set(key, value),
            None => {
                return Err(CfgError::Syntax {
                    line: line.to_string(),
                    number: lineno + 1,
                });
            }
        }
    }

    if current.is_tagged() {
        sections.push(current);
    } else if !current.attributes.is_empty() {
        log::debug!(
            "discarding {} key(s) that precede any section header",
            current.attributes.len()
        );
    }

    Ok(sections)
}

fn strip_comment(line: &str) -> &str {
    line.split('#').next().unwrap_or_default()
}

/// `key = value` with exactly one `=`.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    if value.contains('=') {
        return None;
    }
    Some((key.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_sections_in_file_order() {
        let text = "[net]\nwidth=416\nheight = 416\n\n[convolutional]\nfilters=32\n[route]\nlayers=-1, -4\n";
        let sections = read(text).unwrap();

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].kind, "net");
        assert_eq!(sections[0].get("height"), Some("416"));
        assert_eq!(sections[1].kind, "convolutional");
        assert_eq!(sections[1].get("filters"), Some("32"));
        assert_eq!(sections[2].get("layers"), Some("-1, -4"));
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let text = "# model\n[net]   # header\n\n  batch=64 # training only\n#[convolutional]\n";
        let sections = read(text).unwrap();

        assert_eq!(sections, vec![Section::new("net").with("batch", "64")]);
    }

    #[test]
    fn keeps_key_order_and_replaces_duplicates_in_place() {
        let sections = read("[maxpool]\nsize=2\nstride=2\nsize=3\n").unwrap();
        let pairs: Vec<(&str, &str)> = sections[0]
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(pairs, vec![("size", "3"), ("stride", "2")]);
    }

    #[test]
    fn reports_line_number_of_malformed_line() {
        let err = read("[net]\nwidth=416\n\nfoo bar\n").unwrap_err();

        assert_eq!(
            err,
            CfgError::Syntax {
                line: "foo bar".to_string(),
                number: 4
            }
        );
        assert_eq!(err.to_string(), "Invalid cfg 'foo bar' at line 4.");
    }

    #[test]
    fn rejects_more_than_one_equals_sign() {
        let err = read("[net]\na=b=c\n").unwrap_err();
        assert!(matches!(err, CfgError::Syntax { number: 2, .. }));
    }

    #[test]
    fn short_bracket_line_is_not_a_header() {
        let err = read("[net]\n[a]\n").unwrap_err();
        assert!(matches!(err, CfgError::Syntax { number: 2, .. }));
    }

    #[test]
    fn keys_before_first_header_join_the_first_section() {
        let sections = read("width=10\n[net]\nheight=20\n").unwrap();

        assert_eq!(
            sections,
            vec![Section::new("net").with("width", "10").with("height", "20")]
        );
    }

    #[test]
    fn headerless_document_yields_nothing() {
        assert!(read("width=10\n").unwrap().is_empty());
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let sections = read("[net]\r\nwidth=416\r\n").unwrap();
        assert_eq!(sections[0].get("width"), Some("416"));
    }
}
