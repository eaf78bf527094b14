//! The language instance: translation table, lookup and per-language hooks.

use std::{
    collections::HashMap,
    fmt,
    mem,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

use crate::{
    callbacks::{
        LocaliseHooks, LocaliseRegistry, PluralSuffixes, SearchLimit, SearchWords, Transliterator,
    },
    debug::{CallerContext, DebugLog, ErrorFiles, FileErrors, Orphans, Used},
    error::Error,
    escape::{interpret_escapes, js_escape},
    formats::{CORE_EXTENSION, IniParser, override_file_name},
    loader::LoadedFiles,
    metadata::{DEFAULT_CALENDAR, DEFAULT_WEEK_END, LanguageMetadata, XmlMetadataSource},
    options::{LanguageOptions, TranslateOptions},
    store::{TranslationStore, normalize_key, normalize_strings},
    traits::{MetadataSource, PathResolver, StandardLayout, Strings, TranslationParser},
};

/// One language with its loaded translations.
///
/// Construction parses the override file, binds the language's localise
/// hooks and loads the core file. Further files are merged with
/// [`Language::load`]. All state is owned by the instance; share it across
/// threads only behind external synchronization.
///
/// # Example
///
/// ```rust,no_run
/// use langtable::{Language, LanguageOptions};
///
/// let options = LanguageOptions::new().with_base_path("/srv/site");
/// let mut language = Language::new(Some("fr-FR"), options.clone());
/// language.load("com_content", &options.base_path);
///
/// println!("{}", language.translate("COM_CONTENT_READ_MORE"));
/// ```
pub struct Language {
    pub(crate) tag: String,
    pub(crate) default: String,
    pub(crate) debug: bool,
    pub(crate) debug_constants: bool,
    pub(crate) base_path: PathBuf,
    pub(crate) strings: TranslationStore,
    pub(crate) overrides: HashMap<String, String>,
    pub(crate) paths: LoadedFiles,
    pub(crate) error_files: ErrorFiles,
    pub(crate) counter: usize,
    pub(crate) debug_log: DebugLog,
    pub(crate) callbacks: LocaliseHooks,
    pub(crate) metadata: Option<LanguageMetadata>,
    pub(crate) parser: Arc<dyn TranslationParser>,
    pub(crate) resolver: Arc<dyn PathResolver>,
}

/// Builds a [`Language`] with custom collaborators.
pub struct LanguageBuilder {
    tag: Option<String>,
    options: LanguageOptions,
    parser: Arc<dyn TranslationParser>,
    resolver: Arc<dyn PathResolver>,
    metadata_source: Option<Arc<dyn MetadataSource>>,
    registry: Option<Arc<LocaliseRegistry>>,
}

impl LanguageBuilder {
    pub fn new(tag: Option<&str>) -> Self {
        LanguageBuilder {
            tag: tag.map(str::to_string),
            options: LanguageOptions::default(),
            parser: Arc::new(IniParser),
            resolver: Arc::new(StandardLayout),
            metadata_source: None,
            registry: None,
        }
    }

    pub fn options(mut self, options: LanguageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parser(mut self, parser: Arc<dyn TranslationParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Defaults to [`XmlMetadataSource`] under the base path.
    pub fn metadata_source(mut self, source: Arc<dyn MetadataSource>) -> Self {
        self.metadata_source = Some(source);
        self
    }

    pub fn localise_registry(mut self, registry: Arc<LocaliseRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Language {
        let options = self.options;
        let tag = self
            .tag
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| options.default_language.clone());

        let metadata_source: Arc<dyn MetadataSource> = match self.metadata_source {
            Some(source) => source,
            None => Arc::new(XmlMetadataSource::with_resolver(
                options.base_path.clone(),
                self.resolver.clone(),
            )),
        };
        let metadata = metadata_source.metadata(&tag);

        let callbacks = self
            .registry
            .as_deref()
            .and_then(|registry| registry.discover(&tag))
            .map(|(_, hooks)| hooks.clone())
            .unwrap_or_default();

        let mut language = Language {
            tag,
            default: options.default_language.clone(),
            debug: options.debug,
            debug_constants: options.debug_constants,
            base_path: options.base_path.clone(),
            strings: TranslationStore::new(),
            overrides: HashMap::new(),
            paths: LoadedFiles::new(),
            error_files: ErrorFiles::new(),
            counter: 0,
            debug_log: DebugLog::new(),
            callbacks,
            metadata,
            parser: self.parser,
            resolver: self.resolver,
        };

        let override_path = options
            .override_dir()
            .join(override_file_name(&language.tag));
        let overrides = language.parse(&override_path);
        language.overrides = normalize_strings(overrides);
        debug!(
            tag = %language.tag,
            path = %override_path.display(),
            count = language.overrides.len(),
            "overrides loaded"
        );

        let base_path = language.base_path.clone();
        language.load(CORE_EXTENSION, &base_path);
        language
    }
}

impl Language {
    /// Creates a language with the stock collaborators. `None` selects the
    /// configured default language.
    pub fn new(tag: Option<&str>, options: LanguageOptions) -> Self {
        Self::builder(tag).options(options).build()
    }

    pub fn builder(tag: Option<&str>) -> LanguageBuilder {
        LanguageBuilder::new(tag)
    }

    /// Translates a string, capturing the caller's location for debug records.
    #[track_caller]
    pub fn translate(&mut self, raw: &str) -> String {
        self.translate_with(raw, TranslateOptions::default())
    }

    /// Translates a string with explicit post-processing options.
    #[track_caller]
    pub fn translate_with(&mut self, raw: &str, options: TranslateOptions) -> String {
        let caller = if self.debug {
            Some(CallerContext::here())
        } else {
            None
        };
        self.translate_in_context(raw, options, caller)
    }

    /// Translates a string, recording `caller` in debug mode.
    ///
    /// A miss returns `raw` unchanged, or `??raw??` in debug mode. A hit in
    /// debug mode returns `**KEY**` (or `**translation**` when debug
    /// constants are off).
    pub fn translate_in_context(
        &mut self,
        raw: &str,
        options: TranslateOptions,
        caller: Option<CallerContext>,
    ) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let key = normalize_key(raw);
        let resolved = match self.strings.get(&key) {
            Some(translation) if self.debug => {
                let shown = if self.debug_constants {
                    key.as_str()
                } else {
                    translation
                };
                let marked = format!("**{}**", shown);
                self.debug_log.record_used(&key, caller);
                marked
            }
            Some(translation) => translation.to_string(),
            None if self.debug => {
                self.debug_log.record_orphan(&key, raw, caller);
                format!("??{}??", raw)
            }
            None => raw.to_string(),
        };

        if options.js_safe {
            js_escape(&resolved)
        } else if options.interpret_escapes {
            interpret_escapes(&resolved).into_owned()
        } else {
            resolved
        }
    }

    /// Translates the plural form of `key` for `count`.
    ///
    /// Tries `KEY_<suffix>` for each suffix the language produces for `count`
    /// and falls back to `key` itself.
    #[track_caller]
    pub fn plural(&mut self, key: &str, count: i64) -> String {
        let caller = if self.debug {
            Some(CallerContext::here())
        } else {
            None
        };
        let candidate = self
            .plural_suffixes(count)
            .into_iter()
            .map(|suffix| format!("{}_{}", key, suffix))
            .find(|candidate| self.has_key(candidate));
        let key = candidate.as_deref().unwrap_or(key);
        self.translate_in_context(key, TranslateOptions::default(), caller)
    }

    pub fn has_key(&self, raw: &str) -> bool {
        self.strings.contains(raw)
    }

    /// Checks a file's structure and records any offending lines.
    ///
    /// Returns the number of errors found; fails only if the file is missing.
    /// A clean file clears whatever was recorded for it before.
    pub fn debug_file(&mut self, path: impl AsRef<Path>) -> Result<usize, Error> {
        let path = path.as_ref();
        let errors = crate::debug::validate_file(path)?;
        let count = errors.len();
        if count > 0 {
            warn!(path = %path.display(), lines = ?errors, "translation file has structural errors");
            self.error_files
                .insert(path.to_path_buf(), FileErrors::Lines(errors));
        } else {
            self.error_files.remove(path);
        }
        Ok(count)
    }

    /// Parses one file, returning no strings when it is missing or invalid.
    ///
    /// In debug mode existing files are validated as well.
    pub(crate) fn parse(&mut self, path: &Path) -> Strings {
        let parsed = self.parser.parse_file(path);

        if self.debug && path.is_file() {
            match self.debug_file(path) {
                Ok(0) => {
                    if let Err(err) = &parsed {
                        self.error_files.insert(
                            path.to_path_buf(),
                            FileErrors::Message(format!("parser errors: {}", err)),
                        );
                    }
                }
                Ok(_) => {}
                Err(err) => warn!(path = %path.display(), error = %err, "could not validate file"),
            }
        }

        match parsed {
            Ok(strings) => strings,
            Err(Error::FileNotFound(_)) => Strings::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "translation file rejected");
                Strings::new()
            }
        }
    }

    // Diagnostics.

    pub fn orphans(&self) -> &Orphans {
        self.debug_log.orphans()
    }

    pub fn used(&self) -> &Used {
        self.debug_log.used()
    }

    pub fn error_files(&self) -> &ErrorFiles {
        &self.error_files
    }

    /// Number of file parse attempts so far.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn strings(&self) -> &TranslationStore {
        &self.strings
    }

    pub fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }

    // Configuration.

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the previous value.
    pub fn set_debug(&mut self, debug: bool) -> bool {
        mem::replace(&mut self.debug, debug)
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    /// Returns the previous default language.
    pub fn set_default(&mut self, tag: impl Into<String>) -> String {
        mem::replace(&mut self.default, tag.into())
    }

    pub fn debug_constants(&self) -> bool {
        self.debug_constants
    }

    /// Returns the previous value.
    pub fn set_debug_constants(&mut self, debug_constants: bool) -> bool {
        mem::replace(&mut self.debug_constants, debug_constants)
    }

    /// The tag this instance was created for.
    pub fn language(&self) -> &str {
        &self.tag
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn language_identifier(&self) -> Option<LanguageIdentifier> {
        self.tag.parse().ok()
    }

    // Metadata.

    pub fn metadata(&self) -> Option<&LanguageMetadata> {
        self.metadata.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.name.as_str())
    }

    /// The tag declared in the metadata, or the instance tag.
    pub fn tag(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.tag.as_str())
            .filter(|tag| !tag.is_empty())
            .unwrap_or(&self.tag)
    }

    pub fn calendar(&self) -> &str {
        self.metadata
            .as_ref()
            .map_or(DEFAULT_CALENDAR, LanguageMetadata::calendar)
    }

    pub fn is_rtl(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.rtl)
    }

    pub fn locale(&self) -> Option<Vec<String>> {
        self.metadata.as_ref().and_then(LanguageMetadata::locales)
    }

    pub fn first_day(&self) -> u8 {
        self.metadata.as_ref().map_or(0, |m| m.first_day)
    }

    pub fn week_end(&self) -> &str {
        self.metadata
            .as_ref()
            .map_or(DEFAULT_WEEK_END, LanguageMetadata::week_end)
    }

    // Localise hooks: getter, setter (returns the previous hook), invoker.

    pub fn transliterator(&self) -> Option<&Transliterator> {
        self.callbacks.transliterate.as_ref()
    }

    pub fn set_transliterator(&mut self, hook: Option<Transliterator>) -> Option<Transliterator> {
        mem::replace(&mut self.callbacks.transliterate, hook)
    }

    pub fn transliterate(&self, input: &str) -> String {
        self.callbacks.transliterate(input)
    }

    pub fn plural_suffixes_callback(&self) -> Option<&PluralSuffixes> {
        self.callbacks.plural_suffixes.as_ref()
    }

    pub fn set_plural_suffixes_callback(
        &mut self,
        hook: Option<PluralSuffixes>,
    ) -> Option<PluralSuffixes> {
        mem::replace(&mut self.callbacks.plural_suffixes, hook)
    }

    pub fn plural_suffixes(&self, count: i64) -> Vec<String> {
        self.callbacks.plural_suffixes(count)
    }

    pub fn ignored_search_words_callback(&self) -> Option<&SearchWords> {
        self.callbacks.ignored_search_words.as_ref()
    }

    pub fn set_ignored_search_words_callback(
        &mut self,
        hook: Option<SearchWords>,
    ) -> Option<SearchWords> {
        mem::replace(&mut self.callbacks.ignored_search_words, hook)
    }

    pub fn ignored_search_words(&self) -> Vec<String> {
        self.callbacks.ignored_search_words()
    }

    pub fn lower_limit_search_word_callback(&self) -> Option<&SearchLimit> {
        self.callbacks.lower_limit_search_word.as_ref()
    }

    pub fn set_lower_limit_search_word_callback(
        &mut self,
        hook: Option<SearchLimit>,
    ) -> Option<SearchLimit> {
        mem::replace(&mut self.callbacks.lower_limit_search_word, hook)
    }

    pub fn lower_limit_search_word(&self) -> usize {
        self.callbacks.lower_limit_search_word()
    }

    pub fn upper_limit_search_word_callback(&self) -> Option<&SearchLimit> {
        self.callbacks.upper_limit_search_word.as_ref()
    }

    pub fn set_upper_limit_search_word_callback(
        &mut self,
        hook: Option<SearchLimit>,
    ) -> Option<SearchLimit> {
        mem::replace(&mut self.callbacks.upper_limit_search_word, hook)
    }

    pub fn upper_limit_search_word(&self) -> usize {
        self.callbacks.upper_limit_search_word()
    }

    pub fn search_displayed_characters_callback(&self) -> Option<&SearchLimit> {
        self.callbacks.search_displayed_characters.as_ref()
    }

    pub fn set_search_displayed_characters_callback(
        &mut self,
        hook: Option<SearchLimit>,
    ) -> Option<SearchLimit> {
        mem::replace(&mut self.callbacks.search_displayed_characters, hook)
    }

    pub fn search_displayed_characters_number(&self) -> usize {
        self.callbacks.search_displayed_characters()
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("tag", &self.tag)
            .field("default", &self.default)
            .field("debug", &self.debug)
            .field("strings", &self.strings.len())
            .field("overrides", &self.overrides.len())
            .field("counter", &self.counter)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves fixed strings for any path ending in a known file name.
    struct MapParser(HashMap<&'static str, Vec<(&'static str, &'static str)>>);

    impl TranslationParser for MapParser {
        fn parse_str(&self, _content: &str, _path: &Path) -> Result<Strings, Error> {
            Ok(Strings::new())
        }

        fn parse_file(&self, path: &Path) -> Result<Strings, Error> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            match self.0.get(name) {
                Some(pairs) => Ok(pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()),
                None => Err(Error::FileNotFound(path.to_path_buf())),
            }
        }
    }

    fn language(debug: bool) -> Language {
        let mut files = HashMap::new();
        files.insert(
            "en-GB.ini",
            vec![
                ("HELLO", "Hello"),
                ("PATH", r"C:\\temp"),
                ("MULTI", r"one\ntwo"),
                ("QUOTE", "It's \"here\""),
                ("ITEMS_1", "One item"),
                ("ITEMS_MORE", "Many items"),
            ],
        );
        Language::builder(Some("en-GB"))
            .options(LanguageOptions::new().with_debug(debug))
            .parser(Arc::new(MapParser(files)))
            .metadata_source(Arc::new(HashMap::<String, LanguageMetadata>::new()))
            .build()
    }

    #[test]
    fn test_translate_hit_and_miss() {
        let mut lang = language(false);
        assert_eq!(lang.translate("hello"), "Hello");
        assert_eq!(lang.translate("Not translated"), "Not translated");
        assert_eq!(lang.translate(""), "");
        assert!(lang.orphans().is_empty());
        assert!(lang.used().is_empty());
    }

    #[test]
    fn test_translate_debug_marks_and_records() {
        let mut lang = language(true);
        assert_eq!(lang.translate("hello"), "**HELLO**");
        assert_eq!(lang.translate("Missing"), "??Missing??");
        assert_eq!(lang.orphans()["MISSING"].len(), 1);
        assert_eq!(lang.orphans()["MISSING"][0].string, "Missing");
        assert_eq!(lang.used()["HELLO"].len(), 1);

        let trace = lang.used()["HELLO"][0].as_ref().unwrap();
        assert_eq!(trace.file.as_deref(), Some(file!()));
    }

    #[test]
    fn test_debug_shows_translation_without_constants() {
        let mut lang = language(true);
        assert!(lang.set_debug_constants(false));
        assert_eq!(lang.translate("hello"), "**Hello**");
    }

    #[test]
    fn test_empty_input_is_not_tracked() {
        let mut lang = language(true);
        assert_eq!(lang.translate(""), "");
        assert!(lang.orphans().is_empty());
    }

    #[test]
    fn test_escape_processing() {
        let mut lang = language(false);
        assert_eq!(lang.translate("MULTI"), "one\ntwo");
        assert_eq!(lang.translate("PATH"), r"C:\temp");
        assert_eq!(
            lang.translate_with("MULTI", TranslateOptions::js_safe()),
            r"one\\ntwo"
        );
        assert_eq!(
            lang.translate_with("QUOTE", TranslateOptions::js_safe()),
            r#"It\'s \"here\""#
        );
        assert_eq!(
            lang.translate_with(
                "MULTI",
                TranslateOptions::new().with_interpret_escapes(false)
            ),
            r"one\ntwo"
        );
    }

    #[test]
    fn test_explicit_caller_context() {
        let mut lang = language(true);
        lang.translate_in_context(
            "nope",
            TranslateOptions::default(),
            Some(CallerContext::function("render_menu")),
        );
        let entry = &lang.orphans()["NOPE"][0];
        assert_eq!(
            entry.trace.as_ref().unwrap().function.as_deref(),
            Some("render_menu")
        );
    }

    #[test]
    fn test_has_key_ignores_debug() {
        let mut lang = language(true);
        assert!(lang.has_key("Hello"));
        assert!(!lang.has_key("nope"));
        lang.set_debug(false);
        assert!(lang.has_key("HELLO"));
    }

    #[test]
    fn test_setters_return_previous() {
        let mut lang = language(false);
        assert!(!lang.set_debug(true));
        assert!(lang.set_debug(false));
        assert_eq!(lang.set_default("de-DE"), "en-GB");
        assert_eq!(lang.default_language(), "de-DE");
    }

    #[test]
    fn test_plural_lookup() {
        let mut lang = language(false);
        lang.set_plural_suffixes_callback(Some(Arc::new(|count: i64| {
            if count == 1 {
                vec!["1".to_string()]
            } else {
                vec!["MORE".to_string()]
            }
        })));
        assert_eq!(lang.plural("ITEMS", 1), "One item");
        assert_eq!(lang.plural("ITEMS", 4), "Many items");

        lang.set_plural_suffixes_callback(None);
        assert_eq!(lang.plural("ITEMS", 4), "ITEMS");
    }

    #[test]
    fn test_hook_setters_swap_and_restore() {
        let mut lang = language(false);
        assert_eq!(lang.lower_limit_search_word(), 3);

        let previous = lang.set_lower_limit_search_word_callback(Some(Arc::new(|| 2_usize)));
        assert!(previous.is_none());
        assert_eq!(lang.lower_limit_search_word(), 2);

        let temporary = lang.set_lower_limit_search_word_callback(previous);
        assert!(temporary.is_some());
        assert_eq!(lang.lower_limit_search_word(), 3);
        assert!(lang.lower_limit_search_word_callback().is_none());
    }

    #[test]
    fn test_metadata_defaults_without_source_data() {
        let lang = language(false);
        assert!(lang.name().is_none());
        assert_eq!(lang.tag(), "en-GB");
        assert_eq!(lang.calendar(), "gregorian");
        assert!(!lang.is_rtl());
        assert!(lang.locale().is_none());
        assert_eq!(lang.first_day(), 0);
        assert_eq!(lang.week_end(), "0,6");
        assert_eq!(
            lang.language_identifier().unwrap().language.as_str(),
            "en"
        );
    }

    #[test]
    fn test_defaults_to_default_language() {
        let lang = Language::builder(None)
            .options(LanguageOptions::new().with_default_language("de-DE"))
            .parser(Arc::new(MapParser(HashMap::new())))
            .metadata_source(Arc::new(HashMap::<String, LanguageMetadata>::new()))
            .build();
        assert_eq!(lang.language(), "de-DE");
        assert_eq!(lang.counter(), 1);
    }
}
