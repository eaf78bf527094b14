use std::{collections::BTreeMap, path::PathBuf};

use langtable::{FileErrors, Language, LanguageOptions, LoadedFiles, OrphanEntry, validate_file};
use serde::Serialize;
use tracing::{debug, info};

use crate::validation::{
    validate_base_path, validate_extension, validate_file_path, validate_language_code,
};

/// Structural check results, keyed by file.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub files: BTreeMap<String, Vec<usize>>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.error_count() == 0
    }
}

/// Check every file line by line.
pub fn run_validate(files: &[String]) -> Result<ValidationReport, String> {
    let mut report = ValidationReport {
        files: BTreeMap::new(),
    };
    for file in files {
        validate_file_path(file)?;
        let lines = validate_file(file).map_err(|e| format!("Error reading {}: {}", file, e))?;
        debug!(file = %file, errors = lines.len(), "validated");
        report.files.insert(file.clone(), lines);
    }
    Ok(report)
}

/// What to load before resolving keys.
#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    /// Overrides the config's `base_path` when set.
    pub base: Option<String>,
    pub lang: String,
    pub config: Option<String>,
    pub default_language: Option<String>,
    pub extensions: Vec<String>,
    pub debug: bool,
}

impl LookupRequest {
    fn options(&self) -> Result<LanguageOptions, String> {
        validate_language_code(&self.lang)?;
        for extension in &self.extensions {
            validate_extension(extension)?;
        }

        let mut options = match &self.config {
            Some(config) => LanguageOptions::from_json_file(config)
                .map_err(|e| format!("Error reading config {}: {}", config, e))?,
            None => LanguageOptions::new(),
        };
        if let Some(default) = &self.default_language {
            validate_language_code(default)?;
            options.default_language = default.clone();
        }
        if let Some(base) = &self.base {
            options.base_path = PathBuf::from(base);
        }
        validate_base_path(&options.base_path.to_string_lossy())?;
        Ok(options.with_debug(self.debug))
    }

    /// Build the language and load the requested extensions.
    pub fn language(&self) -> Result<Language, String> {
        let options = self.options()?;
        let base_path = options.base_path.clone();
        let mut language = Language::new(Some(&self.lang), options);
        for extension in &self.extensions {
            let loaded = language.load(extension, &base_path);
            info!(extension = %extension, loaded, "extension requested");
        }
        Ok(language)
    }
}

#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub language: String,
    pub translations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub orphans: BTreeMap<String, Vec<OrphanEntry>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub error_files: BTreeMap<PathBuf, FileErrors>,
}

/// Resolve keys for one language.
pub fn run_lookup(request: &LookupRequest, keys: &[String]) -> Result<LookupReport, String> {
    let mut language = request.language()?;
    let translations = keys
        .iter()
        .map(|key| (key.clone(), language.translate(key)))
        .collect();

    Ok(LookupReport {
        language: language.language().to_string(),
        translations,
        orphans: language.orphans().clone(),
        error_files: language.error_files().clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct FilesReport {
    pub language: String,
    pub counter: usize,
    pub files: LoadedFiles,
}

/// Report every file a language attempted to load.
pub fn run_files(request: &LookupRequest) -> Result<FilesReport, String> {
    let language = request.language()?;
    Ok(FilesReport {
        language: language.language().to_string(),
        counter: language.counter(),
        files: language.loaded_files().clone(),
    })
}
