use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Validate file path exists and is a regular file
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate the base directory of a language pack
pub fn validate_base_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.is_dir() {
        return Err(format!("Base path is not a directory: {}", path));
    }

    if !path_obj.join("language").is_dir() {
        return Err(format!("No language directory under: {}", path));
    }

    Ok(())
}

/// Validate a language tag such as `en-GB`
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    match lang.parse::<LanguageIdentifier>() {
        Ok(lang_id) if lang_id.language.is_empty() => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
        Ok(_) => Ok(()),
        Err(_) => Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        )),
    }
}

/// Validate an extension name used in `<tag>.<extension>.ini`
pub fn validate_extension(extension: &str) -> Result<(), String> {
    let valid = extension
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !valid || extension.starts_with('.') || extension.ends_with('.') {
        return Err(format!("Invalid extension name: {}", extension));
    }
    Ok(())
}
