use super::*;

#[test]
fn short_text_is_untouched() {
    assert_eq!(truncate_with_ellipsis("hello", 100), "hello");
}

#[test]
fn exact_ceiling_is_untouched() {
    let text = "a".repeat(100);
    assert_eq!(truncate_with_ellipsis(&text, 100), text);
}

#[test]
fn over_ceiling_gets_ellipsis() {
    let text = "a".repeat(101);
    let truncated = truncate_with_ellipsis(&text, 100);
    assert_eq!(truncated.len(), 103);
    assert!(truncated.ends_with("..."));
}

#[test]
fn multibyte_safe() {
    let text = "é".repeat(150);
    let truncated = truncate_with_ellipsis(&text, 100);
    assert_eq!(truncated.chars().count(), 103);
}
