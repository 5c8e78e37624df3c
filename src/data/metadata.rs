//! Latest-value store for `key:value` metadata seen on the line feed.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::data::parser::CHANNEL_KEY;

#[derive(Debug, Default, Clone)]
pub struct MetadataStore {
    latest: BTreeMap<String, String>,
    seen: HashSet<String>,
    /// Keys in first-seen order, for UI enumeration.
    seen_order: Vec<String>,
    selected: BTreeSet<String>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every pair of `kv` as the latest value of its key.
    ///
    /// Returns the keys observed for the first time, in iteration order of `kv`.
    pub fn observe<'a, I>(&mut self, kv: I) -> Vec<String>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut new_keys = Vec::new();
        for (k, v) in kv {
            let key = k.trim();
            if key.is_empty() || key.eq_ignore_ascii_case(CHANNEL_KEY) {
                continue;
            }
            self.latest.insert(key.to_string(), v.trim().to_string());
            if self.seen.insert(key.to_string()) {
                self.seen_order.push(key.to_string());
                new_keys.push(key.to_string());
            }
        }
        new_keys
    }

    /// Add keys to the display selection. Keys never seen are ignored.
    pub fn select<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for k in keys {
            let k = k.as_ref().trim();
            if !k.is_empty() && self.seen.contains(k) {
                self.selected.insert(k.to_string());
            }
        }
    }

    pub fn deselect<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for k in keys {
            self.selected.remove(k.as_ref().trim());
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    pub fn latest(&self, key: &str) -> Option<&str> {
        self.latest.get(key).map(String::as_str)
    }

    /// All keys ever seen, in first-seen order.
    pub fn seen_keys(&self) -> &[String] {
        &self.seen_order
    }

    pub fn selected_keys(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// `key=value` lines for the selected keys, sorted case-insensitively.
    pub fn render_display(&self) -> String {
        let mut keys: Vec<&String> = self.selected.iter().collect();
        keys.sort_by_cached_key(|k| k.to_lowercase());
        keys.iter()
            .map(|k| format!("{}={}", k, self.latest(k).unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn reset(&mut self) {
        self.latest.clear();
        self.seen.clear();
        self.seen_order.clear();
        self.selected.clear();
    }
}
