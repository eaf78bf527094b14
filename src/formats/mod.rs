pub mod ini;

// Reexporting the parser for easier access
pub use ini::IniParser;

/// Extension name of the core language file (`<tag>.ini`).
pub const CORE_EXTENSION: &str = "core";

/// File suffix shared by all translation files.
pub const FILE_SUFFIX: &str = "ini";

/// Returns `true` for the extension names that map to the core file.
pub fn is_core_extension(extension: &str) -> bool {
    extension.is_empty() || extension == CORE_EXTENSION
}

/// Builds the file name of a translation file.
///
/// The core extension maps to `<tag>.ini`, any other extension to
/// `<tag>.<extension>.ini`.
pub fn translation_file_name(tag: &str, extension: &str) -> String {
    if is_core_extension(extension) {
        format!("{}.{}", tag, FILE_SUFFIX)
    } else {
        format!("{}.{}.{}", tag, extension, FILE_SUFFIX)
    }
}

/// Builds the file name of a language's override file (`<tag>.override.ini`).
pub fn override_file_name(tag: &str) -> String {
    format!("{}.override.{}", tag, FILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_file_name() {
        assert_eq!(translation_file_name("en-GB", "core"), "en-GB.ini");
        assert_eq!(translation_file_name("en-GB", ""), "en-GB.ini");
    }

    #[test]
    fn test_extension_file_name() {
        assert_eq!(
            translation_file_name("fr-FR", "com_content"),
            "fr-FR.com_content.ini"
        );
    }

    #[test]
    fn test_override_file_name() {
        assert_eq!(override_file_name("de-DE"), "de-DE.override.ini");
    }
}
