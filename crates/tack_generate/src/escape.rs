//! CSS identifier escaping for class selectors.

/// Escapes a class name for use after `.` in a selector.
///
/// ASCII letters, digits, `-`, `_` and non-ASCII characters pass through;
/// other ASCII characters get a backslash. A leading digit, or a digit after
/// a leading `-`, is written as a hex escape.
pub fn escape_class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.char_indices() {
        let leading_digit = ch.is_ascii_digit() && (i == 0 || (i == 1 && name.starts_with('-')));
        if leading_digit {
            out.push_str(&format!("\\{:x} ", ch as u32));
        } else if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii() {
            out.push(ch);
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(escape_class_name("text-red-500"), "text-red-500");
    }

    #[test]
    fn punctuation_is_escaped() {
        assert_eq!(escape_class_name("md:hover:p-4"), "md\\:hover\\:p-4");
        assert_eq!(escape_class_name("w-1/2"), "w-1\\/2");
        assert_eq!(escape_class_name("!font-bold"), "\\!font-bold");
        assert_eq!(escape_class_name("bg-[#fff]"), "bg-\\[\\#fff\\]");
        assert_eq!(escape_class_name("p-0.5"), "p-0\\.5");
    }

    #[test]
    fn leading_digits_use_hex() {
        assert_eq!(escape_class_name("2xl"), "\\32 xl");
        assert_eq!(escape_class_name("-1"), "-\\31 ");
    }
}
