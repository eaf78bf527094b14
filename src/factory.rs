//! Cache of constructed languages keyed by (tag, debug).

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    callbacks::LocaliseRegistry,
    formats::IniParser,
    language::Language,
    options::LanguageOptions,
    traits::{MetadataSource, PathResolver, StandardLayout, TranslationParser},
};

/// Builds languages with shared collaborators and keeps one instance per
/// (tag, debug) pair.
///
/// The factory owns its cache; dropping it drops every cached language.
pub struct LanguageFactory {
    shared: Shared,
    languages: HashMap<(String, bool), Language>,
}

/// Everything a new language is built from.
struct Shared {
    options: LanguageOptions,
    parser: Arc<dyn TranslationParser>,
    resolver: Arc<dyn PathResolver>,
    metadata_source: Option<Arc<dyn MetadataSource>>,
    registry: Arc<LocaliseRegistry>,
}

impl Shared {
    fn create(&self, tag: Option<&str>, debug: bool) -> Language {
        let mut builder = Language::builder(tag)
            .options(self.options.clone().with_debug(debug))
            .parser(self.parser.clone())
            .resolver(self.resolver.clone())
            .localise_registry(self.registry.clone());
        if let Some(source) = &self.metadata_source {
            builder = builder.metadata_source(source.clone());
        }
        builder.build()
    }
}

impl LanguageFactory {
    pub fn new(options: LanguageOptions) -> Self {
        LanguageFactory {
            shared: Shared {
                options,
                parser: Arc::new(IniParser),
                resolver: Arc::new(StandardLayout),
                metadata_source: None,
                registry: Arc::new(LocaliseRegistry::new()),
            },
            languages: HashMap::new(),
        }
    }

    pub fn with_parser(mut self, parser: Arc<dyn TranslationParser>) -> Self {
        self.shared.parser = parser;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn PathResolver>) -> Self {
        self.shared.resolver = resolver;
        self
    }

    pub fn with_metadata_source(mut self, source: Arc<dyn MetadataSource>) -> Self {
        self.shared.metadata_source = Some(source);
        self
    }

    pub fn with_registry(mut self, registry: LocaliseRegistry) -> Self {
        self.shared.registry = Arc::new(registry);
        self
    }

    pub fn options(&self) -> &LanguageOptions {
        &self.shared.options
    }

    /// Builds a new, uncached language.
    pub fn create(&self, tag: Option<&str>, debug: bool) -> Language {
        self.shared.create(tag, debug)
    }

    /// Returns the cached language for (tag, debug), building it on first use.
    pub fn get(&mut self, tag: Option<&str>, debug: bool) -> &mut Language {
        let tag = tag
            .filter(|tag| !tag.is_empty())
            .unwrap_or(&self.shared.options.default_language)
            .to_string();
        let shared = &self.shared;
        self.languages
            .entry((tag, debug))
            .or_insert_with_key(|(tag, is_debug)| {
                debug!(tag = %tag, debug = *is_debug, "creating language");
                shared.create(Some(tag), *is_debug)
            })
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Drops every cached language.
    pub fn clear(&mut self) {
        self.languages.clear();
    }
}
