//! Tag filter built from the whitelist/blacklist configuration.

use core_metadata::Tag;
use core_runtime::config::FilterConfig;
use std::collections::BTreeMap;

/// Include/exclude rules keyed by tag field name
///
/// A non-empty whitelist requires a match on at least one entry. A match on
/// any blacklist entry excludes the file, even when it is whitelisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    whitelist: BTreeMap<String, Vec<String>>,
    blacklist: BTreeMap<String, Vec<String>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self {
            whitelist: normalize(&config.whitelist),
            blacklist: normalize(&config.blacklist),
        }
    }

    pub fn allow(mut self, field: &str, value: &str) -> Self {
        push(&mut self.whitelist, field, value);
        self
    }

    pub fn deny(mut self, field: &str, value: &str) -> Self {
        push(&mut self.blacklist, field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.whitelist.is_empty() && self.blacklist.is_empty()
    }

    pub fn allows(&self, tag: &Tag) -> bool {
        if matches_any(&self.blacklist, tag) {
            return false;
        }

        self.whitelist.is_empty() || matches_any(&self.whitelist, tag)
    }
}

fn normalize_value(value: &str) -> String {
    value.trim().to_lowercase()
}

fn push(rules: &mut BTreeMap<String, Vec<String>>, field: &str, value: &str) {
    rules
        .entry(normalize_value(field))
        .or_default()
        .push(normalize_value(value));
}

fn normalize(rules: &BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut normalized = BTreeMap::new();
    for (field, values) in rules {
        for value in values {
            push(&mut normalized, field, value);
        }
    }
    normalized
}

fn matches_any(rules: &BTreeMap<String, Vec<String>>, tag: &Tag) -> bool {
    rules.iter().any(|(field, values)| {
        tag.field(field)
            .map(normalize_value)
            .map(|actual| values.iter().any(|value| *value == actual))
            .unwrap_or(false)
    })
}
