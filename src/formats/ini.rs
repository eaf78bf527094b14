//! Support for INI-style language files.
//!
//! ```ini
//! ; comment
//! [section]
//! COM_EXAMPLE_TITLE="Example"
//! COM_EXAMPLE_QUOTE="Say "_QQ_"hi"_QQ_""
//! ```
//!
//! Sections are flattened, keys are kept as written (the store normalizes
//! them), and a later duplicate key replaces an earlier one. Values may be
//! quoted or bare. Backslash sequences other than `\"` are preserved
//! verbatim for lookup-time interpretation.

use std::{fs::File, io::Read, path::Path};

use encoding_rs::UTF_8;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::{
    error::Error,
    traits::{Strings, TranslationParser},
};

/// Legacy escape for a literal double quote inside a quoted value.
const QQ_ESCAPE: &str = "\"_QQ_\"";

/// The stock parser for `.ini` translation files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IniParser;

impl TranslationParser for IniParser {
    fn parse_str(&self, content: &str, path: &Path) -> Result<Strings, Error> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut strings = Strings::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            if line.starts_with('[') {
                if !line.contains(']') {
                    return Err(Error::parse_error(
                        path,
                        line_number,
                        "unterminated section header",
                    ));
                }
                continue;
            }

            let Some((key, raw_value)) = line.split_once('=') else {
                return Err(Error::parse_error(
                    path,
                    line_number,
                    "expected KEY=\"value\"",
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::parse_error(path, line_number, "missing key"));
            }

            let value = parse_value(raw_value.trim())
                .map_err(|message| Error::parse_error(path, line_number, message))?;
            strings.insert(key.to_string(), value);
        }

        Ok(strings)
    }

    /// Override default file reading to support BOM-aware decoding (UTF-8 and UTF-16 packs).
    fn parse_file(&self, path: &Path) -> Result<Strings, Error> {
        let decoded = read_decoded(path)?;
        self.parse_str(&decoded, path)
    }
}

/// Reads a translation file as text: UTF-8 unless a BOM says otherwise.
///
/// Malformed bytes are replaced, never rejected.
pub fn read_decoded(path: &Path) -> Result<String, Error> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let mut decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(UTF_8))
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

/// Decodes the right-hand side of `KEY=...`.
fn parse_value(raw: &str) -> Result<String, &'static str> {
    let raw = raw.replace(QQ_ESCAPE, "\\\"");

    let Some(body) = raw.strip_prefix('"') else {
        // Bare value: runs up to an inline comment.
        let value = raw.split(';').next().unwrap_or_default().trim();
        return Ok(value.to_string());
    };

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    loop {
        match chars.next() {
            None => return Err("unterminated quoted value"),
            Some('"') => break,
            Some('\\') => match chars.next() {
                Some('"') => value.push('"'),
                Some(c) => {
                    value.push('\\');
                    value.push(c);
                }
                None => return Err("unterminated quoted value"),
            },
            Some(c) => value.push(c),
        }
    }

    let rest = chars.as_str().trim();
    if !rest.is_empty() && !rest.starts_with(';') {
        return Err("unexpected text after closing quote");
    }
    Ok(value)
}
