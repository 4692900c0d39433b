//! Parsing of the "See Also" docstring convention.
//!
//! A docstring declares relationships in a section of the form:
//!
//! ```text
//! See Also
//! --------
//! CALLS : {name1, name2}
//! CALLED_BY : {}
//! RELATED : {name3}
//! ```
//!
//! Field order after the header is not significant; each field is matched
//! independently and fires at most once per docstring.

use crate::domain::error::{DocGraphError, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::Lines;

/// Literal section header that arms field matching.
pub const SEE_ALSO_HEADER: &str = "See Also";

/// The three recognized relationship fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Calls,
    CalledBy,
    Related,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [FieldKind::Calls, FieldKind::CalledBy, FieldKind::Related];

    /// Canonical key as written in docstrings and used in the document model.
    pub fn key(self) -> &'static str {
        match self {
            FieldKind::Calls => "CALLS",
            FieldKind::CalledBy => "CALLED_BY",
            FieldKind::Related => "RELATED",
        }
    }

    pub fn from_key(key: &str) -> Option<FieldKind> {
        FieldKind::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// Parse the value set from one relationship line.
///
/// Splits on the first `:`, splits the right-hand side on commas, and strips
/// braces, quotes, and surrounding whitespace from each token. An empty
/// declaration `FIELD : {}` yields a set holding one empty string, never an
/// empty set, so iteration over the result is always possible.
pub fn parse_target_set(line: &str) -> Result<BTreeSet<String>> {
    let (_, rhs) = line
        .split_once(':')
        .ok_or_else(|| DocGraphError::MalformedField(line.to_string()))?;
    Ok(rhs.split(',').map(clean_token).collect())
}

fn clean_token(token: &str) -> String {
    let stripped: String = token
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '`' | '\'' | '"'))
        .collect();
    stripped.trim().to_string()
}

/// Anchored field-line match: optional leading whitespace, the field keyword,
/// optional whitespace, then `:`. A prose line that merely mentions a keyword
/// does not match.
fn match_field_line(line: &str) -> Option<FieldKind> {
    let rest = line.trim_start();
    for kind in FieldKind::ALL {
        if let Some(after) = rest.strip_prefix(kind.key()) {
            if after.trim_start().starts_with(':') {
                return Some(kind);
            }
        }
    }
    None
}

/// Single-pass iterator over the relationship fields of one docstring.
///
/// A line containing [`SEE_ALSO_HEADER`] arms all three fields; the first
/// matching line per armed field is parsed and yielded, disarming only that
/// field. A docstring without the header yields nothing.
pub struct SeeAlsoFields<'a> {
    lines: Lines<'a>,
    armed: [bool; 3],
}

impl<'a> SeeAlsoFields<'a> {
    pub fn new(docstring: &'a str) -> Self {
        Self {
            lines: docstring.lines(),
            armed: [false; 3],
        }
    }
}

impl Iterator for SeeAlsoFields<'_> {
    type Item = Result<(FieldKind, BTreeSet<String>)>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            if line.contains(SEE_ALSO_HEADER) {
                self.armed = [true; 3];
                continue;
            }
            if let Some(kind) = match_field_line(line) {
                if self.armed[kind as usize] {
                    self.armed[kind as usize] = false;
                    return Some(parse_target_set(line).map(|targets| (kind, targets)));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_braces_yield_single_empty_string() {
        let targets = parse_target_set("    CALLS : {}").unwrap();
        assert_eq!(targets, set(&[""]));
        assert_eq!(targets.len(), 1, "must stay iterable, never an empty set");
    }

    #[test]
    fn duplicates_collapse() {
        let targets = parse_target_set("CALLED_BY : {a, b, b}").unwrap();
        assert_eq!(targets, set(&["a", "b"]));
    }

    #[test]
    fn quotes_and_braces_are_stripped() {
        let targets = parse_target_set("RELATED : {`func1`, 'func2', \"func3\"}").unwrap();
        assert_eq!(targets, set(&["func1", "func2", "func3"]));
    }

    #[test]
    fn missing_colon_is_an_error() {
        let err = parse_target_set("CALLS {a}").unwrap_err();
        assert!(matches!(err, DocGraphError::MalformedField(_)));
    }

    #[test]
    fn fields_only_fire_after_see_also() {
        let doc = "CALLS : {early}\n\nSee Also\n--------\nCALLS : {late}\n";
        let fields: Vec<_> = SeeAlsoFields::new(doc).map(Result::unwrap).collect();
        assert_eq!(fields, vec![(FieldKind::Calls, set(&["late"]))]);
    }

    #[test]
    fn each_field_fires_at_most_once() {
        let doc = "See Also\n--------\nCALLS : {a}\nCALLS : {b}\nRELATED : {c}\n";
        let fields: Vec<_> = SeeAlsoFields::new(doc).map(Result::unwrap).collect();
        assert_eq!(
            fields,
            vec![
                (FieldKind::Calls, set(&["a"])),
                (FieldKind::Related, set(&["c"])),
            ]
        );
    }

    #[test]
    fn field_order_is_not_significant() {
        let doc = "See Also\n--------\nRELATED : {r}\nCALLED_BY : {cb}\nCALLS : {c}\n";
        let fields: Vec<_> = SeeAlsoFields::new(doc).map(Result::unwrap).collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].0, FieldKind::Related);
        assert_eq!(fields[1].0, FieldKind::CalledBy);
        assert_eq!(fields[2].0, FieldKind::Calls);
    }

    #[test]
    fn prose_mentioning_a_keyword_does_not_match() {
        let doc = "See Also\n--------\nThis section CALLS out related items.\nCALLS : {real}\n";
        let fields: Vec<_> = SeeAlsoFields::new(doc).map(Result::unwrap).collect();
        assert_eq!(fields, vec![(FieldKind::Calls, set(&["real"]))]);
    }

    #[test]
    fn docstring_without_header_yields_nothing() {
        assert_eq!(SeeAlsoFields::new("CALLS : {a}\n").count(), 0);
        assert_eq!(SeeAlsoFields::new("").count(), 0);
    }

    #[test]
    fn called_by_is_not_shadowed_by_calls() {
        let doc = "See Also\n--------\nCALLED_BY : {x}\n";
        let fields: Vec<_> = SeeAlsoFields::new(doc).map(Result::unwrap).collect();
        assert_eq!(fields, vec![(FieldKind::CalledBy, set(&["x"]))]);
    }
}
