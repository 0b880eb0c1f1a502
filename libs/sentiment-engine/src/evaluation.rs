use std::{
    collections::HashMap,
    fmt,
    io::{self, Write},
};

use log::{debug, info};

use crate::{naive_bayes::NaiveBayes, tokenizer::split, ClassifierError, Sentiment};

const TEST_FIELDS: usize = 5;
const TEST_ID_FIELD: usize = 0;
const TEST_BODY_FIELD: usize = 4;

const TRUTH_FIELDS: usize = 2;
const TRUTH_LABEL_FIELD: usize = 0;
const TRUTH_ID_FIELD: usize = 1;

pub type GroundTruth = HashMap<String, Sentiment>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub id: String,
    pub predicted: Sentiment,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.predicted, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misclassification {
    pub id: String,
    pub actual: Sentiment,
    pub predicted: Sentiment,
}

impl fmt::Display for Misclassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.actual, self.predicted, self.id)
    }
}

/// Builds the id to label map from `label,id` rows. Later rows win on duplicate ids.
pub fn ground_truth<I, S>(lines: I) -> GroundTruth
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let fields = split(line.as_ref(), ',');
            if fields.len() < TRUTH_FIELDS {
                return None;
            }
            let label = Sentiment::from_field(&fields[TRUTH_LABEL_FIELD]);
            Some((fields[TRUTH_ID_FIELD].clone(), label))
        })
        .collect()
}

/// Predictions for a test set, scored against whatever ground truth is available.
#[derive(Debug, Default, Clone)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
    pub errors: Vec<Misclassification>,
    pub correct: usize,
    /// Predictions whose id had a ground-truth label.
    pub matched: usize,
}

impl Evaluation {
    /// Predicts every `id,date,query,user,text` row and compares against the `label,id` rows of
    /// `truth_lines`. Rows with too few fields are skipped on both sides.
    pub fn run<T, G, S1, S2>(
        model: &NaiveBayes,
        test_lines: T,
        truth_lines: G,
    ) -> Result<Evaluation, ClassifierError>
    where
        T: IntoIterator<Item = S1>,
        G: IntoIterator<Item = S2>,
        S1: AsRef<str>,
        S2: AsRef<str>,
    {
        let truth = ground_truth(truth_lines);
        let mut evaluation = Evaluation::default();
        for line in test_lines {
            let fields = split(line.as_ref(), ',');
            if fields.len() < TEST_FIELDS {
                debug!("skipping malformed test row: {:?}", line.as_ref());
                continue;
            }
            let id = &fields[TEST_ID_FIELD];
            let predicted = model.predict(&fields[TEST_BODY_FIELD])?;
            evaluation.record(id, predicted, truth.get(id).copied());
        }
        info!(
            "predicted {} tweets, {} of {} with ground truth correct",
            evaluation.predictions.len(),
            evaluation.correct,
            evaluation.matched
        );
        Ok(evaluation)
    }

    fn record(&mut self, id: &str, predicted: Sentiment, actual: Option<Sentiment>) {
        self.predictions.push(Prediction {
            id: id.to_owned(),
            predicted,
        });
        if let Some(actual) = actual {
            self.matched += 1;
            if actual == predicted {
                self.correct += 1;
            } else {
                self.errors.push(Misclassification {
                    id: id.to_owned(),
                    actual,
                    predicted,
                });
            }
        }
    }

    /// Share of matched predictions that were correct, or 0 when nothing matched.
    pub fn accuracy(&self) -> f64 {
        if self.matched == 0 {
            0.0
        } else {
            self.correct as f64 / self.matched as f64
        }
    }

    /// One `<predicted>, <id>` line per test row.
    pub fn write_results<W: Write>(&self, mut out: W) -> io::Result<()> {
        for prediction in &self.predictions {
            writeln!(out, "{}", prediction)?;
        }
        out.flush()
    }

    /// Accuracy to three decimals, then one `<actual>, <predicted>, <id>` line per error.
    pub fn write_report<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{:.3}", self.accuracy())?;
        for error in &self.errors {
            writeln!(out, "{}", error)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> NaiveBayes {
        NaiveBayes::new().train([
            "4,1,d,q,u,love this day",
            "4,2,d,q,u,what a lovely morning",
            "0,3,d,q,u,hate this day",
            "0,4,d,q,u,awful rainy morning",
        ])
    }

    #[test]
    fn builds_ground_truth() {
        let truth = ground_truth(["4,1", "0,2", "4", "", "0,1"]);
        assert_eq!(truth.len(), 2);
        assert_eq!(truth.get("1"), Some(&Sentiment::Negative));
        assert_eq!(truth.get("2"), Some(&Sentiment::Negative));
    }

    #[test]
    fn scores_predictions_against_ground_truth() {
        let mut evaluation = Evaluation::default();
        evaluation.record("1", Sentiment::Positive, Some(Sentiment::Positive));
        evaluation.record("2", Sentiment::Positive, Some(Sentiment::Negative));
        assert_eq!(evaluation.accuracy(), 0.5);

        let mut report = Vec::new();
        evaluation.write_report(&mut report).unwrap();
        assert_eq!(String::from_utf8(report).unwrap(), "0.500\n0, 4, 2\n");
    }

    #[test]
    fn accuracy_is_zero_without_ground_truth() {
        let evaluation = Evaluation::run(&model(), ["9,d,q,u,love it"], Vec::<&str>::new()).unwrap();
        assert_eq!(evaluation.predictions.len(), 1);
        assert_eq!(evaluation.matched, 0);
        assert_eq!(evaluation.accuracy(), 0.0);

        let mut report = Vec::new();
        evaluation.write_report(&mut report).unwrap();
        assert_eq!(String::from_utf8(report).unwrap(), "0.000\n");
    }

    #[test]
    fn evaluates_test_rows() {
        let tweets = [
            "10,d,q,u,love this lovely day",
            "11,d,q,u,hate this awful day",
            "12,d,q,u,lovely",
            "13,d,q,u,rainy",
            "bad row",
        ];
        let truth = ["4,10", "0,11", "0,12"];
        let evaluation = Evaluation::run(&model(), tweets, truth).unwrap();

        let mut results = Vec::new();
        evaluation.write_results(&mut results).unwrap();
        assert_eq!(
            String::from_utf8(results).unwrap(),
            "4, 10\n0, 11\n4, 12\n0, 13\n"
        );
        assert_eq!(evaluation.matched, 3);
        assert_eq!(evaluation.correct, 2);
        assert_eq!(
            evaluation.errors,
            vec![Misclassification {
                id: "12".into(),
                actual: Sentiment::Negative,
                predicted: Sentiment::Positive,
            }]
        );

        let mut report = Vec::new();
        evaluation.write_report(&mut report).unwrap();
        assert_eq!(String::from_utf8(report).unwrap(), "0.667\n0, 4, 12\n");
    }

    #[test]
    fn propagates_degenerate_models() {
        let model = NaiveBayes::new().train(["0,1,d,q,u,sad"]);
        let result = Evaluation::run(&model, ["1,d,q,u,happy"], ["4,1"]);
        assert!(matches!(
            result,
            Err(ClassifierError::DegenerateModel { positive: 0, negative: 1 })
        ));
    }
}
