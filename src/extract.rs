// SPDX-License-Identifier: PMPL-1.0-or-later

//! Placeholder key extraction
//!
//! Templates reference messages through `[[key]]` placeholders. The match is
//! non-greedy and never crosses a line break, so a key ends at the nearest
//! closing `]]`.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\[(.+?)\]\]").expect("placeholder pattern compiles"));

pub const OPEN: &str = "[[";
pub const CLOSE: &str = "]]";

/// Literal placeholder text for a key: `[[key]]`.
pub fn placeholder(key: &str) -> String {
    format!("{}{}{}", OPEN, key, CLOSE)
}

/// Keys referenced by a template, each once, in first-seen order.
pub fn extract_keys(text: &str) -> Vec<String> {
    let mut keys = IndexSet::new();
    collect_keys(text, &mut keys);
    keys.into_iter().collect()
}

/// Add the keys of `text` to an existing ordered set.
pub fn collect_keys(text: &str, keys: &mut IndexSet<String>) {
    for segment in tokenize(text) {
        if let Segment::Placeholder(key) = segment {
            if !keys.contains(key) {
                keys.insert(key.to_string());
            }
        }
    }
}

/// A piece of template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// Key text between the delimiters.
    Placeholder(&'a str),
}

/// Split a template into literal text and placeholders in one scan.
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            segments.push(Segment::Literal(&text[cursor..whole.start()]));
        }
        segments.push(Segment::Placeholder(key.as_str()));
        cursor = whole.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Literal(&text[cursor..]));
    }
    segments
}
