use std::collections::HashSet;

use regex::Regex;

use crate::tokenizer::Token;

const STOP_WORDS: [&str; 9] = ["the", "and", "is", "in", "at", "of", "a", "an", "to"];

lazy_static::lazy_static! {
    // [:alnum:] and [:space:] are ASCII classes, so anything outside ASCII is dropped as well.
    static ref PUNCT_RGX: Regex = Regex::new(r"[^[:alnum:][:space:]]").unwrap();
    static ref STOP_WORD_SET: HashSet<&'static str> = STOP_WORDS.into_iter().collect();
}

pub fn to_lower(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Keeps only ASCII alphanumerics and whitespace. Dropped characters are not replaced, so
/// `"good...bye"` becomes `"goodbye"`.
pub fn remove_punctuation(text: &str) -> String {
    PUNCT_RGX.replace_all(text, "").into_owned()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(to_lower(token).as_str())
}

/// Drops stop words and tokens that are empty. Survivors keep their order and original casing.
pub fn remove_stop_words(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.is_empty() && !is_stop_word(token))
        .collect()
}

/// Lowercases and strips at most one suffix: `ing` (len > 4), then `ed` (len > 3), then `s`
/// (len > 3).
pub fn stem(token: &str) -> Token {
    let word = to_lower(token);
    let len = word.len();
    let cut = if len > 4 && word.ends_with("ing") {
        3
    } else if len > 3 && word.ends_with("ed") {
        2
    } else if len > 3 && word.ends_with('s') {
        1
    } else {
        0
    };
    // suffixes are ASCII so the cut always lands on a char boundary
    word[..len - cut].to_owned()
}
