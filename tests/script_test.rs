use nirupana::{is_malayalam, is_malayalam_with_threshold, malayalam_ratio, DEFAULT_SCRIPT_THRESHOLD};

#[test]
fn test_pure_malayalam_always_accepted() {
    let samples = [
        "അ",
        "ഈ സിനിമ വളരെ മനോഹരമായിരുന്നു",
        "മലയാളം",
        "നല്ല ചിത്രം ആയിരുന്നു",
    ];
    for text in samples {
        assert!(
            is_malayalam(text),
            "expected '{}' to pass the script gate",
            text
        );
    }
}

#[test]
fn test_no_malayalam_always_rejected() {
    let samples = ["This movie was great", "hello world", "1234!?", "日本語のテキスト"];
    for text in samples {
        assert!(!is_malayalam(text), "expected '{}' to be rejected", text);
        assert_eq!(malayalam_ratio(text), 0.0);
    }
}

#[test]
fn test_empty_and_whitespace_rejected_without_panic() {
    assert!(!is_malayalam(""));
    assert!(!is_malayalam(" "));
    assert!(!is_malayalam("\n\t  \r\n"));
}

#[test]
fn test_mixed_script_boundary() {
    // 60 Malayalam chars out of 100: exactly at the default threshold, inclusive
    let at_threshold = format!("{}{}", "അ".repeat(60), "x".repeat(40));
    assert!(is_malayalam_with_threshold(&at_threshold, 0.6));
    assert!(is_malayalam(&at_threshold));

    // 59 out of 100: just below
    let below_threshold = format!("{}{}", "അ".repeat(59), "x".repeat(41));
    assert!(!is_malayalam_with_threshold(&below_threshold, 0.6));
    assert!(!is_malayalam(&below_threshold));
}

#[test]
fn test_default_threshold_value() {
    assert_eq!(DEFAULT_SCRIPT_THRESHOLD, 0.6);
}

#[test]
fn test_ratio_is_over_untrimmed_length() {
    // Four Malayalam chars framed by four spaces: ratio 0.5, not 1.0
    let padded = format!("  {}  ", "അആഇഈ");
    assert!((malayalam_ratio(&padded) - 0.5).abs() < f32::EPSILON);
}

#[test]
fn test_gate_is_deterministic() {
    let text = format!("{}ab", "അഇഉ");
    let first = is_malayalam(&text);
    for _ in 0..10 {
        assert_eq!(is_malayalam(&text), first);
    }
}
