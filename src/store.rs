//! In-memory translation table of one language instance.

use std::collections::HashMap;

/// Normalizes a translation key for storage and lookup.
pub fn normalize_key(key: &str) -> String {
    key.to_uppercase()
}

/// Uppercases every key of a raw key/value map.
pub fn normalize_strings<I>(strings: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    strings
        .into_iter()
        .map(|(key, value)| (normalize_key(&key), value))
        .collect()
}

/// Mapping from normalized (uppercased) key to translated string.
///
/// The store only ever grows through [`TranslationStore::merge`], which
/// applies the file's entries on top of the current state and the override
/// table on top of both, so override entries always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStore {
    strings: HashMap<String, String>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a key; the key is normalized first.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(&normalize_key(key)).map(String::as_str)
    }

    /// Returns `true` if the normalized key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(&normalize_key(key))
    }

    /// Merges one file's strings, then re-applies the overrides.
    ///
    /// `overrides` must already be normalized.
    pub fn merge<I>(&mut self, strings: I, overrides: &HashMap<String, String>)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in strings {
            self.strings.insert(normalize_key(&key), value);
        }
        for (key, value) in overrides {
            self.strings.insert(key.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterates over `(key, translation)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
