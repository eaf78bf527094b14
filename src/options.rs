//! Options for constructing languages, loading files and translating.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_LANGUAGE: &str = "en-GB";

/// Construction options for [`crate::Language`], typically loaded once from
/// the application's configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageOptions {
    /// Language used as the baseline and as the fallback for failed loads.
    pub default_language: String,
    /// Enables lookup diagnostics and file validation.
    pub debug: bool,
    /// In debug mode, show the key (`true`) or the translation (`false`)
    /// between the `**` markers.
    pub debug_constants: bool,
    /// Base directory of the core language files.
    pub base_path: PathBuf,
    /// Directory of `<tag>.override.ini` files. `<base>/language/overrides` when unset.
    pub override_dir: Option<PathBuf>,
}

impl Default for LanguageOptions {
    fn default() -> Self {
        LanguageOptions {
            default_language: DEFAULT_LANGUAGE.to_string(),
            debug: false,
            debug_constants: true,
            base_path: PathBuf::from("."),
            override_dir: None,
        }
    }
}

impl LanguageOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from a JSON file; absent fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn with_default_language(mut self, tag: impl Into<String>) -> Self {
        self.default_language = tag.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_debug_constants(mut self, debug_constants: bool) -> Self {
        self.debug_constants = debug_constants;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_override_dir(mut self, override_dir: Option<PathBuf>) -> Self {
        self.override_dir = override_dir;
        self
    }

    /// The effective override directory.
    pub fn override_dir(&self) -> PathBuf {
        self.override_dir
            .clone()
            .unwrap_or_else(|| self.base_path.join("language").join("overrides"))
    }
}

/// Options for [`crate::Language::load_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Language to load; the instance's language when `None`.
    pub language: Option<String>,
    /// Re-parse files that were already attempted.
    pub reload: bool,
    /// Load the default language first and fall back to it on failure.
    pub use_default: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            language: None,
            reload: false,
            use_default: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    pub fn with_default_fallback(mut self, use_default: bool) -> Self {
        self.use_default = use_default;
        self
    }
}

/// Post-processing options for [`crate::Language::translate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Escape quotes and backslashes for a script string literal.
    pub js_safe: bool,
    /// Turn literal `\n`, `\t` and `\\` into their characters. Ignored when `js_safe` is set.
    pub interpret_escapes: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            js_safe: false,
            interpret_escapes: true,
        }
    }
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn js_safe() -> Self {
        Self::default().with_js_safe(true)
    }

    pub fn with_js_safe(mut self, js_safe: bool) -> Self {
        self.js_safe = js_safe;
        self
    }

    pub fn with_interpret_escapes(mut self, interpret_escapes: bool) -> Self {
        self.interpret_escapes = interpret_escapes;
        self
    }
}
