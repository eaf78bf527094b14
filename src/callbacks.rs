//! Per-language hooks for transliteration, plural suffixes and search-word
//! rules.
//!
//! A language pack may ship a "localise" unit with up to six capability
//! hooks. Units are registered in a [`LocaliseRegistry`] under a
//! [`LocaliseSource`] and the unit name derived from the language tag
//! (`en-GB` → `en_GBLocalise`). When a `Language` is built it looks the unit
//! up in [`LocaliseSource::SEARCH_ORDER`]; the first match is bound, every
//! hook it lacks falls back to the built-in default.

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use crate::transliterate::default_transliterate;

pub type Transliterator = Arc<dyn Fn(&str) -> String + Send + Sync>;
pub type PluralSuffixes = Arc<dyn Fn(i64) -> Vec<String> + Send + Sync>;
pub type SearchWords = Arc<dyn Fn() -> Vec<String> + Send + Sync>;
pub type SearchLimit = Arc<dyn Fn() -> usize + Send + Sync>;

pub const DEFAULT_LOWER_LIMIT_SEARCH_WORD: usize = 3;
pub const DEFAULT_UPPER_LIMIT_SEARCH_WORD: usize = 200;
pub const DEFAULT_SEARCH_DISPLAYED_CHARACTERS: usize = 200;

/// Returns the conventional unit name for a language tag.
pub fn localise_unit_name(tag: &str) -> String {
    format!("{}Localise", tag.replace('-', "_"))
}

/// Locations a localise unit can come from, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocaliseSource {
    SiteOverride,
    AdminOverride,
    SiteLanguage,
    AdminLanguage,
}

impl LocaliseSource {
    pub const SEARCH_ORDER: [LocaliseSource; 4] = [
        LocaliseSource::SiteOverride,
        LocaliseSource::AdminOverride,
        LocaliseSource::SiteLanguage,
        LocaliseSource::AdminLanguage,
    ];
}

/// The capability hooks of one localise unit. Every slot is optional.
#[derive(Clone, Default)]
pub struct LocaliseHooks {
    pub transliterate: Option<Transliterator>,
    pub plural_suffixes: Option<PluralSuffixes>,
    pub ignored_search_words: Option<SearchWords>,
    pub lower_limit_search_word: Option<SearchLimit>,
    pub upper_limit_search_word: Option<SearchLimit>,
    pub search_displayed_characters: Option<SearchLimit>,
}

impl LocaliseHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transliterate(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transliterate = Some(Arc::new(f));
        self
    }

    pub fn with_plural_suffixes(
        mut self,
        f: impl Fn(i64) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.plural_suffixes = Some(Arc::new(f));
        self
    }

    pub fn with_ignored_search_words(
        mut self,
        f: impl Fn() -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.ignored_search_words = Some(Arc::new(f));
        self
    }

    pub fn with_lower_limit_search_word(
        mut self,
        f: impl Fn() -> usize + Send + Sync + 'static,
    ) -> Self {
        self.lower_limit_search_word = Some(Arc::new(f));
        self
    }

    pub fn with_upper_limit_search_word(
        mut self,
        f: impl Fn() -> usize + Send + Sync + 'static,
    ) -> Self {
        self.upper_limit_search_word = Some(Arc::new(f));
        self
    }

    pub fn with_search_displayed_characters(
        mut self,
        f: impl Fn() -> usize + Send + Sync + 'static,
    ) -> Self {
        self.search_displayed_characters = Some(Arc::new(f));
        self
    }

    /// Names of the hooks that are set.
    pub fn capabilities(&self) -> Vec<&'static str> {
        [
            ("transliterate", self.transliterate.is_some()),
            ("plural_suffixes", self.plural_suffixes.is_some()),
            ("ignored_search_words", self.ignored_search_words.is_some()),
            ("lower_limit_search_word", self.lower_limit_search_word.is_some()),
            ("upper_limit_search_word", self.upper_limit_search_word.is_some()),
            (
                "search_displayed_characters",
                self.search_displayed_characters.is_some(),
            ),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    // Invokers with the built-in defaults.

    pub fn transliterate(&self, input: &str) -> String {
        if let Some(hook) = &self.transliterate {
            let output = hook(input);
            if output.is_ascii() {
                return output;
            }
            return default_transliterate(&output);
        }
        default_transliterate(input)
    }

    pub fn plural_suffixes(&self, count: i64) -> Vec<String> {
        match &self.plural_suffixes {
            Some(hook) => hook(count),
            None => vec![count.to_string()],
        }
    }

    pub fn ignored_search_words(&self) -> Vec<String> {
        match &self.ignored_search_words {
            Some(hook) => hook(),
            None => Vec::new(),
        }
    }

    pub fn lower_limit_search_word(&self) -> usize {
        match &self.lower_limit_search_word {
            Some(hook) => hook(),
            None => DEFAULT_LOWER_LIMIT_SEARCH_WORD,
        }
    }

    /// The hook can only raise the bound above the default, never lower it.
    pub fn upper_limit_search_word(&self) -> usize {
        match &self.upper_limit_search_word {
            Some(hook) => {
                let limit = hook();
                if limit > DEFAULT_UPPER_LIMIT_SEARCH_WORD {
                    limit
                } else {
                    DEFAULT_UPPER_LIMIT_SEARCH_WORD
                }
            }
            None => DEFAULT_UPPER_LIMIT_SEARCH_WORD,
        }
    }

    pub fn search_displayed_characters(&self) -> usize {
        match &self.search_displayed_characters {
            Some(hook) => hook(),
            None => DEFAULT_SEARCH_DISPLAYED_CHARACTERS,
        }
    }
}

impl fmt::Debug for LocaliseHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaliseHooks")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

/// Registered localise units, keyed by source and unit name.
#[derive(Debug, Clone, Default)]
pub struct LocaliseRegistry {
    units: HashMap<(LocaliseSource, String), LocaliseHooks>,
}

impl LocaliseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the unit for `tag` at `source`, returning the one it replaces.
    pub fn register(
        &mut self,
        source: LocaliseSource,
        tag: &str,
        hooks: LocaliseHooks,
    ) -> Option<LocaliseHooks> {
        self.units.insert((source, localise_unit_name(tag)), hooks)
    }

    /// Finds the unit for `tag`, searching sources in precedence order.
    pub fn discover(&self, tag: &str) -> Option<(LocaliseSource, &LocaliseHooks)> {
        let name = localise_unit_name(tag);
        let found = LocaliseSource::SEARCH_ORDER.iter().find_map(|source| {
            self.units
                .get(&(*source, name.clone()))
                .map(|hooks| (*source, hooks))
        });
        match &found {
            Some((source, hooks)) => debug!(
                unit = %name,
                ?source,
                capabilities = ?hooks.capabilities(),
                "localise unit found"
            ),
            None => debug!(unit = %name, "no localise unit registered"),
        }
        found
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
