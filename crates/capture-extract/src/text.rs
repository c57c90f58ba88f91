//! Text normalization.

/// Collapse every whitespace run to one space and trim both ends.
///
/// Non-breaking spaces count as whitespace, so decoded `&nbsp;` entities
/// collapse like ordinary spaces.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`normalize`] for possibly absent input; absent yields an empty string.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// Drop the `:` / `-` separators left behind once a label is removed.
pub fn strip_label_punctuation(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  Acme \n\t Corp  "), "Acme Corp");
    }

    #[test]
    fn test_normalize_nbsp() {
        assert_eq!(normalize("123\u{a0}\u{a0}Main St"), "123 Main St");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n "), "");
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some(" a  b ")), "a b");
    }

    #[test]
    fn test_strip_label_punctuation() {
        assert_eq!(strip_label_punctuation(" : Acme Corp"), "Acme Corp");
        assert_eq!(strip_label_punctuation("- - 0123"), "0123");
        assert_eq!(strip_label_punctuation("Acme - West"), "Acme - West");
    }
}
