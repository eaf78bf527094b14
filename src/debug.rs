//! Debug-mode diagnostics: orphaned keys, used keys and structural checks
//! of translation files.

use std::{
    collections::BTreeMap,
    panic::Location,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::{error::Error, formats::ini::read_decoded};

lazy_static! {
    /// `KEY="value"`, optionally concatenated with `_QQ_`, optional trailing comment.
    static ref LINE_REGEX: Regex =
        Regex::new(r#"^[A-Z][A-Z0-9_*\-.]*\s*=(\s*("[^"]*"|_QQ_))+\s*(;.*)?$"#).unwrap();
    static ref SECTION_REGEX: Regex = Regex::new(r"^\[[^\]]*\](\s*;.*)?$").unwrap();
}

/// Keys that collide with INI boolean/null literals.
pub const RESERVED_KEYS: [&str; 8] = ["YES", "NO", "NULL", "FALSE", "ON", "OFF", "NONE", "TRUE"];

/// Where a lookup came from.
///
/// Supplied by the calling layer, or captured from `#[track_caller]` by
/// [`CallerContext::here`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CallerContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl CallerContext {
    /// Captures the source location of the caller.
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        CallerContext {
            function: None,
            file: Some(location.file().to_string()),
            line: Some(location.line()),
        }
    }

    /// Context naming only a function, for callers without source locations.
    pub fn function(name: impl Into<String>) -> Self {
        CallerContext {
            function: Some(name.into()),
            ..Self::default()
        }
    }
}

/// One lookup of a key that has no translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanEntry {
    pub trace: Option<CallerContext>,
    pub key: String,
    pub string: String,
}

/// Orphaned keys with every lookup that missed.
pub type Orphans = BTreeMap<String, Vec<OrphanEntry>>;

/// Resolved keys with every caller that used them.
pub type Used = BTreeMap<String, Vec<Option<CallerContext>>>;

/// Structural problems found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileErrors {
    /// 1-based line numbers that failed validation.
    Lines(Vec<usize>),
    /// The parser rejected a file the line validator considers clean.
    Message(String),
}

pub type ErrorFiles = BTreeMap<PathBuf, FileErrors>;

/// Accumulated lookup diagnostics of one language instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugLog {
    orphans: Orphans,
    used: Used,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_orphan(&mut self, key: &str, string: &str, trace: Option<CallerContext>) {
        self.orphans
            .entry(key.to_string())
            .or_default()
            .push(OrphanEntry {
                trace,
                key: key.to_string(),
                string: string.to_string(),
            });
    }

    pub fn record_used(&mut self, key: &str, caller: Option<CallerContext>) {
        self.used.entry(key.to_string()).or_default().push(caller);
    }

    pub fn orphans(&self) -> &Orphans {
        &self.orphans
    }

    pub fn used(&self) -> &Used {
        &self.used
    }
}

/// Checks a translation file line by line.
///
/// Returns the 1-based numbers of the offending lines. A line is reported at
/// most once: for an odd number of double quotes, for not matching
/// `KEY="value"`, or for using one of [`RESERVED_KEYS`] as its key. Blank
/// lines, `;` comments and section headers are skipped.
///
/// Fails only when the file does not exist or cannot be read.
pub fn validate_file(path: impl AsRef<Path>) -> Result<Vec<usize>, Error> {
    let content = read_decoded(path.as_ref())?;
    Ok(validate_str(&content))
}

/// Same as [`validate_file`] on in-memory content.
pub fn validate_str(content: &str) -> Vec<usize> {
    let mut errors = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let raw_line = if index == 0 {
            raw_line.strip_prefix('\u{feff}').unwrap_or(raw_line)
        } else {
            raw_line
        };
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with(';') || SECTION_REGEX.is_match(line) {
            continue;
        }

        let line_number = index + 1;

        if line.matches('"').count() % 2 != 0 {
            errors.push(line_number);
            continue;
        }

        if !LINE_REGEX.is_match(line) {
            errors.push(line_number);
            continue;
        }

        let key = line
            .split_once('=')
            .map(|(key, _)| key.trim().to_uppercase())
            .unwrap_or_default();
        if RESERVED_KEYS.contains(&key.as_str()) {
            errors.push(line_number);
        }
    }

    errors
}
