//! Output file names derived from exercise set titles.

/// Stem used when a title has no ASCII letters or digits.
pub const FALLBACK_STEM: &str = "exercises";

/// Keeps only `[a-zA-Z0-9]` from `title`, lowercased.
pub fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

pub fn file_name(title: &str) -> String {
    format!("{}.pdf", file_stem(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(file_stem("Algebra: Set #1!"), "algebraset1");
        assert_eq!(file_name("Algebra: Set #1!"), "algebraset1.pdf");
    }

    #[test]
    fn non_ascii_is_dropped() {
        assert_eq!(file_stem("Übungen Größe 2"), "bungengre2");
    }

    #[test]
    fn empty_stem_falls_back() {
        assert_eq!(file_stem(""), "exercises");
        assert_eq!(file_name("?!  ∑"), "exercises.pdf");
    }
}
