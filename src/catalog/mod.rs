// SPDX-License-Identifier: PMPL-1.0-or-later

//! Message catalogs
//!
//! A catalog maps translation keys to message text for one locale and keeps
//! the order in which keys were first written. An empty message marks a key
//! that has not been translated yet.

pub mod codec;
pub mod store;

use indexmap::IndexMap;

pub use codec::{escape_html, Row};
pub use store::{
    encode_text, load, modified, read_text, read_text_with_bom, save, write_atomic, write_text,
};

/// Ordered key → message mapping for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from decoded rows, dropping rows with an empty key.
    /// A repeated key keeps its first position and takes the later message.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let entries = rows
            .into_iter()
            .filter(|(key, _)| !key.is_empty())
            .collect::<IndexMap<_, _>>();
        Self { entries }
    }

    pub fn parse(text: &str) -> Self {
        Self::from_rows(codec::decode(text))
    }

    pub fn to_text(&self) -> String {
        codec::encode(self.iter())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when the key is present with a non-empty message.
    pub fn is_translated(&self, key: &str) -> bool {
        self.get(key).is_some_and(|message| !message.is_empty())
    }

    /// Insert or overwrite a message. A new key is appended at the end.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(key.into(), message.into());
    }

    /// Remove a key, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Move a translated message from `old` to `new`.
    ///
    /// Only non-empty messages move. An existing entry under `new` is
    /// overwritten. Returns true when the catalog changed.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        if !self.is_translated(old) {
            return false;
        }
        if let Some(message) = self.remove(old) {
            self.insert(new, message);
            return true;
        }
        false
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        self.entries.retain(|key, message| keep(key, message));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, message)| (key.as_str(), message.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Catalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_rows(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}
