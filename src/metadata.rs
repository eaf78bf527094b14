//! Descriptive metadata of a language pack, read from `langmetadata.xml`.
//!
//! ```xml
//! <metafile>
//!   <metadata>
//!     <name>English (United Kingdom)</name>
//!     <tag>en-GB</tag>
//!     <rtl>0</rtl>
//!     <locale>en_GB.utf8, en_GB.UTF-8, en_GB, eng_GB, en, english</locale>
//!     <firstDay>0</firstDay>
//!     <weekEnd>0,6</weekEnd>
//!     <calendar>gregorian</calendar>
//!   </metadata>
//! </metafile>
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::Arc,
};

use quick_xml::{Reader, events::Event};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    traits::{MetadataSource, PathResolver, StandardLayout},
};

pub const METADATA_FILE_NAME: &str = "langmetadata.xml";
pub const DEFAULT_CALENDAR: &str = "gregorian";
pub const DEFAULT_WEEK_END: &str = "0,6";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageMetadata {
    pub name: String,
    pub tag: String,
    pub rtl: bool,
    /// Comma-separated list of system locale names.
    pub locale: Option<String>,
    /// 0 = Sunday.
    pub first_day: u8,
    pub week_end: Option<String>,
    pub calendar: Option<String>,
}

impl LanguageMetadata {
    /// Parse from any reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut metadata = LanguageMetadata::default();
        let mut in_metadata = false;
        let mut seen_metadata = false;
        let mut current: Option<Vec<u8>> = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"metadata" => {
                    in_metadata = true;
                    seen_metadata = true;
                }
                Ok(Event::End(ref e)) if e.name().as_ref() == b"metadata" => {
                    in_metadata = false;
                }
                Ok(Event::Start(ref e)) if in_metadata => {
                    current = Some(e.name().as_ref().to_vec());
                }
                Ok(Event::End(_)) => current = None,
                Ok(Event::Text(e)) => {
                    if let Some(element) = &current {
                        let text = e.unescape().map_err(Error::XmlParse)?.to_string();
                        metadata.apply(element, text)?;
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        if !seen_metadata {
            return Err(Error::invalid_metadata("missing <metadata> element"));
        }
        Ok(metadata)
    }

    /// Parse from file path.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn apply(&mut self, element: &[u8], text: String) -> Result<(), Error> {
        match element {
            b"name" => self.name = text,
            b"tag" => self.tag = text,
            b"rtl" => self.rtl = matches!(text.as_str(), "1" | "true"),
            b"locale" => self.locale = Some(text),
            b"firstDay" => {
                self.first_day = text.parse().map_err(|_| {
                    Error::invalid_metadata(format!("firstDay is not a weekday number: {}", text))
                })?
            }
            b"weekEnd" => self.week_end = Some(text),
            b"calendar" => self.calendar = Some(text),
            _ => {}
        }
        Ok(())
    }

    pub fn calendar(&self) -> &str {
        self.calendar.as_deref().unwrap_or(DEFAULT_CALENDAR)
    }

    pub fn week_end(&self) -> &str {
        self.week_end.as_deref().unwrap_or(DEFAULT_WEEK_END)
    }

    /// The locale list split on commas, or `None` when not declared.
    pub fn locales(&self) -> Option<Vec<String>> {
        self.locale.as_ref().map(|locale| {
            locale
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

/// Reads `langmetadata.xml` from each language directory.
#[derive(Clone)]
pub struct XmlMetadataSource {
    base: PathBuf,
    resolver: Arc<dyn PathResolver>,
}

impl XmlMetadataSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::with_resolver(base, Arc::new(StandardLayout))
    }

    pub fn with_resolver(base: impl Into<PathBuf>, resolver: Arc<dyn PathResolver>) -> Self {
        XmlMetadataSource {
            base: base.into(),
            resolver,
        }
    }

    pub fn metadata_path(&self, tag: &str) -> PathBuf {
        self.resolver
            .language_path(&self.base, tag)
            .join(METADATA_FILE_NAME)
    }
}

impl MetadataSource for XmlMetadataSource {
    fn metadata(&self, tag: &str) -> Option<LanguageMetadata> {
        let path = self.metadata_path(tag);
        match LanguageMetadata::read_from(&path) {
            Ok(metadata) => Some(metadata),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "language metadata unavailable");
                None
            }
        }
    }
}
