//! Malayalam script detection.
//!
//! A cheap pre-filter that keeps clearly out-of-domain text away from the
//! model. Counts characters in the Malayalam Unicode block (U+0D00–U+0D7F)
//! and compares their share of the input against a threshold.

/// Default minimum fraction of Malayalam characters required to accept input.
pub const DEFAULT_SCRIPT_THRESHOLD: f32 = 0.6;

/// Returns true if `c` falls in the Malayalam Unicode block.
#[inline]
pub fn is_malayalam_char(c: char) -> bool {
    ('\u{0D00}'..='\u{0D7F}').contains(&c)
}

/// Fraction of characters of the original, untrimmed string that are
/// Malayalam. Returns 0.0 for the empty string.
pub fn malayalam_ratio(text: &str) -> f32 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let malayalam = text.chars().filter(|&c| is_malayalam_char(c)).count();
    malayalam as f32 / total as f32
}

/// Checks whether `text` is predominantly Malayalam at the given threshold.
///
/// Empty and whitespace-only input is rejected unconditionally, before any
/// ratio computation. The ratio denominator is the character count of the
/// original string, whitespace included.
pub fn is_malayalam_with_threshold(text: &str, threshold: f32) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    malayalam_ratio(text) >= threshold
}

/// Checks whether `text` is predominantly Malayalam at the default threshold.
pub fn is_malayalam(text: &str) -> bool {
    is_malayalam_with_threshold(text, DEFAULT_SCRIPT_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_malayalam_accepted() {
        assert!(is_malayalam("ഈ സിനിമ വളരെ മനോഹരമായിരുന്നു"));
        assert!(is_malayalam("അ"));
    }

    #[test]
    fn test_pure_latin_rejected() {
        assert!(!is_malayalam("This movie was great"));
        assert_eq!(malayalam_ratio("ascii only"), 0.0);
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert!(!is_malayalam(""));
        assert!(!is_malayalam("   "));
        assert!(!is_malayalam("\t\n  "));
        // Ratio itself is well defined on empty input
        assert_eq!(malayalam_ratio(""), 0.0);
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // 6 of 10 characters Malayalam: ratio exactly 0.6
        let at_boundary = format!("{}abcd", "അ".repeat(6));
        assert_eq!(at_boundary.chars().count(), 10);
        assert!(is_malayalam_with_threshold(&at_boundary, 0.6));

        // 59 of 100 characters Malayalam: just under
        let below = format!("{}{}", "അ".repeat(59), "x".repeat(41));
        assert_eq!(below.chars().count(), 100);
        assert!(!is_malayalam_with_threshold(&below, 0.6));
    }

    #[test]
    fn test_ratio_counts_untrimmed_length() {
        // Surrounding whitespace dilutes the ratio; it is not trimmed away.
        let padded = format!("  {}  ", "അ".repeat(4));
        assert_eq!(malayalam_ratio(&padded), 0.5);
        assert!(!is_malayalam_with_threshold(&padded, 0.6));
        assert!(is_malayalam_with_threshold(&padded, 0.5));
    }

    #[test]
    fn test_custom_threshold() {
        let half = format!("{}ab", "അഇ");
        assert!(is_malayalam_with_threshold(&half, 0.5));
        assert!(!is_malayalam_with_threshold(&half, 0.51));
    }
}
