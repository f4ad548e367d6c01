use super::*;

#[test]
fn empty_text_is_zero_tokens() {
    assert_eq!(estimate_tokens(""), 0);
}

#[test]
fn four_chars_per_token() {
    assert_eq!(estimate_tokens("abcd"), 1);
    assert_eq!(estimate_tokens("abcdefgh"), 2);
}

#[test]
fn rounds_up_partial_tokens() {
    assert_eq!(estimate_tokens("abcde"), 2);
}
