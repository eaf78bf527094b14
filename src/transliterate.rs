//! Latin-to-ASCII folding used by the default transliterator.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Letters that have no canonical decomposition onto ASCII.
fn fold_special(c: char) -> Option<&'static str> {
    let folded = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        'ħ' => "h",
        'Ħ' => "H",
        'ŋ' => "n",
        'Ŋ' => "N",
        'ĸ' => "k",
        'ŀ' => "l",
        'Ŀ' => "L",
        _ => return None,
    };
    Some(folded)
}

/// Folds accented Latin letters to their ASCII base letters.
///
/// Characters outside the Latin script pass through unchanged, so callers can
/// detect what a language-specific transliterator still has to handle.
pub fn latin_to_ascii(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(folded) = fold_special(c) {
            out.push_str(folded);
        } else {
            let decomposed: String = std::iter::once(c)
                .nfkd()
                .filter(|d| !is_combining_mark(*d))
                .collect();
            if !decomposed.is_empty() && decomposed.is_ascii() {
                out.push_str(&decomposed);
            } else {
                out.push(c);
            }
        }
    }
    out
}

/// The built-in transliteration: ASCII fold followed by lowercasing.
pub fn default_transliterate(input: &str) -> String {
    latin_to_ascii(input).to_lowercase()
}
