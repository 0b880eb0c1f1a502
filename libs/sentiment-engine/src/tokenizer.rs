use crate::normalizer::{remove_punctuation, remove_stop_words, stem, to_lower};

pub type Token = String;

/// Splits `text` on every occurrence of `delimiter`. Empty tokens are kept, so the result always
/// holds one more token than there are delimiters in the input.
pub fn split(text: &str, delimiter: char) -> Vec<Token> {
    text.split(delimiter).map(String::from).collect()
}

/// Raw tweet text to the stemmed content tokens the model counts.
///
/// Lowercasing and punctuation stripping happen before the split, and stop words are dropped
/// before stemming. Changing either order changes what the model learns.
pub fn preprocess(raw: &str) -> Vec<Token> {
    let cleaned = remove_punctuation(&to_lower(raw));
    remove_stop_words(split(&cleaned, ' '))
        .iter()
        .map(|token| stem(token))
        .collect()
}
