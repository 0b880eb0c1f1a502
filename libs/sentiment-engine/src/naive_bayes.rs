use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};

use crate::{
    tokenizer::{preprocess, split, Token},
    ClassifierError, Sentiment,
};

pub(crate) type Frequencies = BTreeMap<Token, usize>;

pub const DEFAULT_ALPHA: f64 = 1.0;

const TRAINING_FIELDS: usize = 6;
const LABEL_FIELD: usize = 0;
const BODY_FIELD: usize = 5;

/// Log-probabilities of one piece of text under each class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub positive: f64,
    pub negative: f64,
}

impl Scores {
    /// Ties go to positive.
    pub fn winner(&self) -> Sentiment {
        if self.positive >= self.negative {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

#[derive(Debug, Default, Clone)]
struct ClassStats {
    tweets: usize,
    total_words: usize,
    frequencies: Frequencies,
}

impl ClassStats {
    fn observe(&mut self, tokens: Vec<Token>) {
        self.tweets += 1;
        for token in tokens {
            *self.frequencies.entry(token).or_insert(0) += 1;
        }
    }

    fn count(&self, token: &str) -> usize {
        self.frequencies.get(token).copied().unwrap_or(0)
    }
}

/// Multinomial Naive Bayes over two classes with additive smoothing.
///
/// A model is trained once over a whole corpus and is read-only afterwards, so `predict` can be
/// shared freely between callers.
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    positive: ClassStats,
    negative: ClassStats,
    vocabulary_size: usize,
    alpha: f64,
    skipped_rows: usize,
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self::with_alpha(DEFAULT_ALPHA)
    }

    pub fn with_alpha(alpha: f64) -> Self {
        NaiveBayes {
            positive: ClassStats::default(),
            negative: ClassStats::default(),
            vocabulary_size: 0,
            alpha,
            skipped_rows: 0,
        }
    }

    /// Accumulates statistics from training rows of the form
    /// `label,id,date,query,user,text`. Rows with fewer than six fields are skipped.
    pub fn train<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            if !self.observe(line) {
                debug!("skipping malformed training row: {:?}", line);
                self.skipped_rows += 1;
            }
        }
        self.positive.total_words = self.positive.frequencies.values().sum();
        self.negative.total_words = self.negative.frequencies.values().sum();
        self.vocabulary_size = self
            .positive
            .frequencies
            .keys()
            .chain(self.negative.frequencies.keys())
            .collect::<BTreeSet<_>>()
            .len();
        info!(
            "trained on {} positive / {} negative tweets, vocabulary of {} tokens",
            self.positive.tweets, self.negative.tweets, self.vocabulary_size
        );
        self
    }

    fn observe(&mut self, line: &str) -> bool {
        let fields = split(line, ',');
        if fields.len() < TRAINING_FIELDS {
            return false;
        }
        let tokens = preprocess(&fields[BODY_FIELD]);
        self.class_mut(Sentiment::from_field(&fields[LABEL_FIELD]))
            .observe(tokens);
        true
    }

    fn class(&self, sentiment: Sentiment) -> &ClassStats {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Negative => &self.negative,
        }
    }

    fn class_mut(&mut self, sentiment: Sentiment) -> &mut ClassStats {
        match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Negative => &mut self.negative,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn tweet_count(&self, sentiment: Sentiment) -> usize {
        self.class(sentiment).tweets
    }

    pub fn total_words(&self, sentiment: Sentiment) -> usize {
        self.class(sentiment).total_words
    }

    pub fn frequency(&self, sentiment: Sentiment, token: &str) -> usize {
        self.class(sentiment).count(token)
    }

    pub fn frequencies(&self, sentiment: Sentiment) -> impl Iterator<Item = (&str, usize)> {
        self.class(sentiment)
            .frequencies
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Training rows dropped for having too few fields.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Smoothed `P(token | class)`. Unseen tokens count as zero and are smoothed like any other.
    pub fn likelihood(&self, token: &str, sentiment: Sentiment) -> f64 {
        let stats = self.class(sentiment);
        (stats.count(token) as f64 + self.alpha)
            / (stats.total_words as f64 + self.alpha * self.vocabulary_size as f64)
    }

    fn log_prior(&self, sentiment: Sentiment) -> f64 {
        let total = self.positive.tweets + self.negative.tweets;
        (self.class(sentiment).tweets as f64 / total as f64).ln()
    }

    /// Scores `text` under both classes.
    ///
    /// Fails with [`ClassifierError::DegenerateModel`] unless training saw at least one tweet of
    /// each class, since the prior of an empty class is `ln(0)`.
    pub fn scores(&self, text: &str) -> Result<Scores, ClassifierError> {
        if self.positive.tweets == 0 || self.negative.tweets == 0 {
            return Err(ClassifierError::DegenerateModel {
                positive: self.positive.tweets,
                negative: self.negative.tweets,
            });
        }
        let tokens = preprocess(text);
        let initial = Scores {
            positive: self.log_prior(Sentiment::Positive),
            negative: self.log_prior(Sentiment::Negative),
        };
        Ok(tokens.iter().fold(initial, |mut scores, token| {
            scores.positive += self.likelihood(token, Sentiment::Positive).ln();
            scores.negative += self.likelihood(token, Sentiment::Negative).ln();
            scores
        }))
    }

    pub fn predict(&self, text: &str) -> Result<Sentiment, ClassifierError> {
        self.scores(text).map(|scores| scores.winner())
    }
}
