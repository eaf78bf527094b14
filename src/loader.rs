//! Loading translation files into a [`Language`].
//!
//! Files are looked up per (extension, language). Outside debug mode the
//! default language acts as a baseline: its file for the same extension is
//! merged first, and it stands in when the requested file yields nothing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{
    formats::{CORE_EXTENSION, is_core_extension, translation_file_name},
    language::Language,
    options::LoadOptions,
};

/// Outcome of every attempted file, per extension.
///
/// `true` means the file was parsed and merged at least one string.
pub type LoadedFiles = BTreeMap<String, BTreeMap<PathBuf, bool>>;

fn index_key(extension: &str) -> &str {
    if is_core_extension(extension) {
        CORE_EXTENSION
    } else {
        extension
    }
}

impl Language {
    /// Loads `extension` for this instance's language with default options.
    ///
    /// Returns whether new strings were merged.
    pub fn load(&mut self, extension: &str, base_path: impl AsRef<Path>) -> bool {
        self.load_with(extension, base_path, &LoadOptions::default())
    }

    /// Loads the translation file of `extension` found under `base_path`.
    ///
    /// A file that was already attempted is not parsed again unless
    /// `options.reload` is set; its recorded outcome is returned instead.
    pub fn load_with(
        &mut self,
        extension: &str,
        base_path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> bool {
        let base_path = base_path.as_ref();
        let lang = options
            .language
            .clone()
            .unwrap_or_else(|| self.tag.clone());
        let use_fallback = options.use_default && !self.debug && lang != self.default;

        if use_fallback {
            let baseline = LoadOptions {
                language: Some(self.default.clone()),
                reload: false,
                use_default: false,
            };
            self.load_with(extension, base_path, &baseline);
        }

        let path = self.language_file(base_path, &lang, extension);
        let mut result = match self.recorded(extension, &path) {
            Some(recorded) if !options.reload => {
                trace!(path = %path.display(), recorded, "file already attempted");
                recorded
            }
            _ => self.load_language(&path, extension),
        };

        if !result && use_fallback {
            let default = self.default.clone();
            let fallback = self.language_file(base_path, &default, extension);
            debug!(
                requested = %path.display(),
                fallback = %fallback.display(),
                "falling back to default language"
            );
            result = match self.recorded(extension, &fallback) {
                Some(recorded) => recorded,
                None => self.load_language(&fallback, extension),
            };
        }

        result
    }

    /// Parses one file and merges it; records and returns the outcome.
    fn load_language(&mut self, path: &Path, extension: &str) -> bool {
        self.counter += 1;

        let strings = self.parse(path);
        let result = !strings.is_empty();
        if result {
            let count = strings.len();
            self.strings.merge(strings, &self.overrides);
            debug!(path = %path.display(), count, counter = self.counter, "translation file loaded");
        } else {
            debug!(path = %path.display(), counter = self.counter, "translation file yielded no strings");
        }

        self.paths
            .entry(index_key(extension).to_string())
            .or_default()
            .insert(path.to_path_buf(), result);
        result
    }

    fn recorded(&self, extension: &str, path: &Path) -> Option<bool> {
        self.paths
            .get(index_key(extension))
            .and_then(|files| files.get(path))
            .copied()
    }

    /// Full path of the file for `lang` and `extension`.
    pub fn language_file(&self, base_path: &Path, lang: &str, extension: &str) -> PathBuf {
        self.resolver
            .language_path(base_path, lang)
            .join(translation_file_name(lang, extension))
    }

    /// Every attempted file, per extension.
    pub fn loaded_files(&self) -> &LoadedFiles {
        &self.paths
    }

    /// Attempted files of one extension.
    pub fn loaded_files_for(&self, extension: &str) -> Option<&BTreeMap<PathBuf, bool>> {
        self.paths.get(index_key(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        LanguageOptions, error::Error, metadata::LanguageMetadata, traits::Strings,
        traits::TranslationParser,
    };
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    /// Serves strings per file name and records every parse.
    #[derive(Default)]
    struct RecordingParser {
        files: HashMap<String, Vec<(String, String)>>,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl RecordingParser {
        fn with(mut self, name: &str, pairs: &[(&str, &str)]) -> Self {
            self.files.insert(
                name.to_string(),
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            );
            self
        }

        fn calls_for(&self, name: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|p| p.file_name().and_then(|n| n.to_str()) == Some(name))
                .count()
        }
    }

    impl TranslationParser for RecordingParser {
        fn parse_str(&self, _content: &str, _path: &Path) -> Result<Strings, Error> {
            Ok(Strings::new())
        }

        fn parse_file(&self, path: &Path) -> Result<Strings, Error> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            self.files
                .get(name)
                .map(|pairs| pairs.iter().cloned().collect())
                .ok_or_else(|| Error::FileNotFound(path.to_path_buf()))
        }
    }

    fn build(tag: &str, debug: bool, parser: Arc<RecordingParser>) -> Language {
        Language::builder(Some(tag))
            .options(
                LanguageOptions::new()
                    .with_base_path("/site")
                    .with_debug(debug),
            )
            .parser(parser)
            .metadata_source(Arc::new(HashMap::<String, LanguageMetadata>::new()))
            .build()
    }

    fn fixture() -> Arc<RecordingParser> {
        Arc::new(
            RecordingParser::default()
                .with("en-GB.ini", &[("HELLO", "Hello"), ("ONLY_EN", "English only")])
                .with("fr-FR.ini", &[("HELLO", "Bonjour")])
                .with("en-GB.com_blog.ini", &[("BLOG", "Blog")])
                .with("fr-FR.override.ini", &[("HELLO", "Salut")]),
        )
    }

    #[test]
    fn test_default_language_is_loaded_first() {
        let parser = Arc::new(
            RecordingParser::default()
                .with("en-GB.ini", &[("HELLO", "Hello"), ("ONLY_EN", "English only")])
                .with("fr-FR.ini", &[("HELLO", "Bonjour")]),
        );
        let mut lang = build("fr-FR", false, parser.clone());
        assert_eq!(lang.translate("HELLO"), "Bonjour");
        assert_eq!(lang.translate("ONLY_EN"), "English only");
        assert_eq!(lang.counter(), 2);

        let calls = parser.calls.lock().unwrap();
        let en = calls.iter().position(|p| p.ends_with("en-GB.ini")).unwrap();
        let fr = calls.iter().position(|p| p.ends_with("fr-FR.ini")).unwrap();
        assert!(en < fr);
    }

    #[test]
    fn test_overrides_win_over_files() {
        let mut lang = build("fr-FR", false, fixture());
        assert_eq!(lang.translate("HELLO"), "Salut");
        assert_eq!(lang.overrides()["HELLO"], "Salut");
    }

    #[test]
    fn test_core_files_are_indexed() {
        let lang = build("fr-FR", false, fixture());
        let core = lang.loaded_files_for("core").unwrap();
        assert_eq!(core.get(Path::new("/site/language/en-GB/en-GB.ini")), Some(&true));
        assert_eq!(core.get(Path::new("/site/language/fr-FR/fr-FR.ini")), Some(&true));
        assert_eq!(lang.loaded_files_for(""), Some(core));
    }

    #[test]
    fn test_second_load_does_not_parse_again() {
        let parser = fixture();
        let mut lang = build("fr-FR", false, parser.clone());

        let first = lang.load("core", "/site");
        let counter = lang.counter();
        let second = lang.load("core", "/site");

        assert_eq!(first, second);
        assert_eq!(lang.counter(), counter);
        assert_eq!(parser.calls_for("fr-FR.ini"), 1);
        assert_eq!(parser.calls_for("en-GB.ini"), 1);
    }

    #[test]
    fn test_reload_parses_again() {
        let parser = fixture();
        let mut lang = build("fr-FR", false, parser.clone());

        let options = LoadOptions::new().with_reload(true);
        assert!(lang.load_with("core", "/site", &options));
        assert_eq!(parser.calls_for("fr-FR.ini"), 2);
        // The baseline load never reloads.
        assert_eq!(parser.calls_for("en-GB.ini"), 1);
    }

    #[test]
    fn test_missing_extension_falls_back_to_default() {
        let parser = fixture();
        let mut lang = build("fr-FR", false, parser.clone());

        assert!(lang.load("com_blog", "/site"));
        assert_eq!(lang.translate("BLOG"), "Blog");

        let blog = lang.loaded_files_for("com_blog").unwrap();
        assert_eq!(
            blog.get(Path::new("/site/language/fr-FR/fr-FR.com_blog.ini")),
            Some(&false)
        );
        assert_eq!(parser.calls_for("en-GB.com_blog.ini"), 1);
    }

    #[test]
    fn test_no_fallback_when_disabled() {
        let mut lang = build("fr-FR", false, fixture());
        let options = LoadOptions::new().with_default_fallback(false);
        assert!(!lang.load_with("com_blog", "/site", &options));
        assert!(!lang.has_key("BLOG"));
    }

    #[test]
    fn test_no_fallback_in_debug_mode() {
        let mut lang = build("fr-FR", true, fixture());
        assert!(!lang.has_key("ONLY_EN"));
        assert!(!lang.load("com_blog", "/site"));
        assert!(lang.loaded_files_for("com_blog").unwrap().len() == 1);
    }

    #[test]
    fn test_failed_attempts_still_count() {
        let mut lang = build("en-GB", false, fixture());
        let before = lang.counter();
        assert!(!lang.load("com_missing", "/site"));
        assert_eq!(lang.counter(), before + 1);
    }

    #[test]
    fn test_explicit_language() {
        let mut lang = build("en-GB", false, fixture());
        let options = LoadOptions::new().with_language(Some("fr-FR".to_string()));
        assert!(lang.load_with("core", "/site", &options));
        assert_eq!(lang.translate("HELLO"), "Bonjour");
    }
}
