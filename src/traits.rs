//! Seams between the resolver and its collaborators.
//!
//! `Language` never touches the file-system layout, the file syntax or the
//! metadata store directly; it goes through these traits so a host
//! application can swap any of them.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{error::Error, metadata::LanguageMetadata};

/// Raw key/value pairs as read from one translation file.
pub type Strings = HashMap<String, String>;

/// Reads one translation file into key/value pairs.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use langtable::{formats::ini::IniParser, traits::TranslationParser};
///
/// let strings = IniParser.parse_file(Path::new("language/en-GB/en-GB.ini"))?;
/// println!("{} keys", strings.len());
/// Ok::<(), langtable::Error>(())
/// ```
pub trait TranslationParser: Send + Sync {
    /// Parse file content. `path` is only used for error reporting.
    fn parse_str(&self, content: &str, path: &Path) -> Result<Strings, Error>;

    /// Parse from file path.
    fn parse_file(&self, path: &Path) -> Result<Strings, Error> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        self.parse_str(&content, path)
    }
}

/// Maps a base directory and a language tag to the directory holding that
/// language's files.
pub trait PathResolver: Send + Sync {
    fn language_path(&self, base: &Path, tag: &str) -> PathBuf;
}

impl<F> PathResolver for F
where
    F: Fn(&Path, &str) -> PathBuf + Send + Sync,
{
    fn language_path(&self, base: &Path, tag: &str) -> PathBuf {
        self(base, tag)
    }
}

/// The stock layout: `<base>/language/<tag>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardLayout;

impl PathResolver for StandardLayout {
    fn language_path(&self, base: &Path, tag: &str) -> PathBuf {
        base.join("language").join(tag)
    }
}

/// Looks up descriptive metadata for a language tag.
pub trait MetadataSource: Send + Sync {
    fn metadata(&self, tag: &str) -> Option<LanguageMetadata>;
}

impl MetadataSource for HashMap<String, LanguageMetadata> {
    fn metadata(&self, tag: &str) -> Option<LanguageMetadata> {
        self.get(tag).cloned()
    }
}

/// Returns `true` if the directory for `tag` exists under `base`.
pub fn language_exists(resolver: &dyn PathResolver, base: &Path, tag: &str) -> bool {
    resolver.language_path(base, tag).is_dir()
}
