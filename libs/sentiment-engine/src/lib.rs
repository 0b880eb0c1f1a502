use std::fmt;

use thiserror::Error;

pub mod evaluation;
pub mod naive_bayes;
pub mod normalizer;
pub mod tokenizer;

pub use evaluation::{Evaluation, Misclassification, Prediction};
pub use naive_bayes::{NaiveBayes, Scores, DEFAULT_ALPHA};
pub use tokenizer::{preprocess, split, Token};

/// Field value that marks a positive row. Every other value reads as negative.
pub const POSITIVE_FIELD: &str = "4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn from_field(field: &str) -> Self {
        if field == POSITIVE_FIELD {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// Numeric label used in every data file: 4 for positive, 0 for negative.
    pub fn code(self) -> u8 {
        match self {
            Sentiment::Positive => 4,
            Sentiment::Negative => 0,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("model needs at least one tweet of each class (saw {positive} positive, {negative} negative)")]
    DegenerateModel { positive: usize, negative: usize },
}
