// src/transform/authors.rs
//! Author-field normalization.
//!
//! Raw bylines mix names, emails, outlet names and role suffixes in free form
//! ("Jane Doe, John Smith | CNN", "ABC News", "jdoe@x.com and Ann Lee"). The
//! heuristic keeps only fragments shaped like "First Last".

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex"));
static RE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",| and |-|\|").expect("separator regex"));

/// Lower-cased source names seen in the batch; fragments equal to one of
/// these are outlet names, not people.
#[derive(Debug, Clone, Default)]
pub struct KnownSources(HashSet<String>);

impl KnownSources {
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self(names.into_iter().flatten().map(str::to_lowercase).collect())
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.0.contains(&fragment.to_lowercase())
    }
}

/// Normalize one raw author field into an ordered list of names.
///
/// Returns `None` only when the author is empty and no source name exists.
pub fn clean_author_field(
    author: Option<&str>,
    source_name: Option<&str>,
    known: &KnownSources,
) -> Option<Vec<String>> {
    let author = match author {
        Some(a) if !a.is_empty() => a,
        _ => return source_name.map(|s| vec![titlecase(s)]),
    };

    let without_emails = RE_EMAIL.replace_all(author, "");
    let cleaned: Vec<String> = RE_SEPARATORS
        .split(&without_emails)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| item.split_whitespace().count() == 2)
        .filter(|item| !known.contains(item))
        .map(titlecase)
        .collect();

    if cleaned.is_empty() {
        return Some(source_name.map(|s| vec![s.to_string()]).unwrap_or_default());
    }
    Some(cleaned)
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest
/// ("o'NEIL-smith" -> "O'Neil-Smith").
pub fn titlecase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
