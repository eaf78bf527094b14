//! Post-processing applied to resolved strings.

use std::borrow::Cow;

/// Escapes a string for embedding inside a quoted script literal.
///
/// Single quotes, double quotes, backslashes and NUL are prefixed with a
/// backslash (NUL becomes `\0`).
pub fn js_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

/// Interprets the literal sequences `\\`, `\t` and `\n` in one pass.
///
/// Each backslash is consumed at most once, so `\\n` yields `\n` (a
/// backslash followed by `n`) rather than a newline. Other backslashes are
/// kept as they are. Strings without a backslash are returned borrowed.
pub fn interpret_escapes(input: &str) -> Cow<'_, str> {
    if !input.contains('\\') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('t') => {
                chars.next();
                out.push('\t');
            }
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            _ => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_escape() {
        assert_eq!(js_escape(r#"It's "quoted""#), r#"It\'s \"quoted\""#);
        assert_eq!(js_escape(r"C:\path"), r"C:\\path");
        assert_eq!(js_escape("nul\0byte"), r"nul\0byte");
        assert_eq!(js_escape(r"line\n"), r"line\\n");
    }

    #[test]
    fn test_interpret_newline_and_tab() {
        assert_eq!(interpret_escapes(r"a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn test_double_backslash_collapses_without_retriggering() {
        assert_eq!(interpret_escapes(r"a\\nb"), r"a\nb");
        assert_eq!(interpret_escapes(r"\\\n"), "\\\n");
    }

    #[test]
    fn test_other_backslashes_are_kept() {
        assert_eq!(interpret_escapes(r"50\% off\"), r"50\% off\");
    }

    #[test]
    fn test_no_backslash_is_borrowed() {
        assert!(matches!(interpret_escapes("plain"), Cow::Borrowed("plain")));
    }
}
