//! Address Normalization
//!
//! Lexical canonicalization of free-text postal addresses before comparison.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Street-type abbreviations and their expansions.
///
/// Keys are disjoint whole words and no expansion is itself a key, so the
/// order of replacement does not matter.
pub const ABBREVIATIONS: [(&str, &str); 8] = [
    ("ave", "avenue"),
    ("st", "street"),
    ("rd", "road"),
    ("dr", "drive"),
    ("ln", "lane"),
    ("ct", "court"),
    ("blvd", "boulevard"),
    ("pl", "place"),
];

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[.,]").expect("punctuation pattern");
    static ref ABBREVIATION: Regex = {
        let keys: Vec<&str> = ABBREVIATIONS.iter().map(|(abbr, _)| *abbr).collect();
        Regex::new(&format!(r"\b(?:{})\b", keys.join("|"))).expect("abbreviation pattern")
    };
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern");
}

fn expand(abbr: &str) -> &'static str {
    ABBREVIATIONS
        .iter()
        .find(|(key, _)| *key == abbr)
        .map(|(_, full)| *full)
        .unwrap_or_default()
}

/// Normalize an address for comparison.
///
/// Lowercases, drops `.` and `,`, expands street-type abbreviations at word
/// boundaries, then collapses whitespace. Never fails.
pub fn normalize(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }

    let lowered = address.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    let expanded = ABBREVIATION.replace_all(&stripped, |caps: &Captures| expand(&caps[0]));

    WHITESPACE.replace_all(&expanded, " ").trim().to_string()
}

/// Normalize an optional address; absent input yields an empty string.
pub fn normalize_opt(address: Option<&str>) -> String {
    address.map(normalize).unwrap_or_default()
}
