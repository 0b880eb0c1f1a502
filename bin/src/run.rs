use std::path::{Path, PathBuf};

use log::error;
use persistance::{create_output, read_lines};
use sentiment_engine::{Evaluation, NaiveBayes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub training: PathBuf,
    pub tweets: PathBuf,
    pub truth: PathBuf,
    pub results: PathBuf,
    pub accuracy: PathBuf,
}

impl RunPaths {
    /// Expects exactly five paths, in command line order.
    pub fn from_args(args: Vec<PathBuf>) -> Option<Self> {
        let [training, tweets, truth, results, accuracy]: [PathBuf; 5] = args.try_into().ok()?;
        Some(RunPaths {
            training,
            tweets,
            truth,
            results,
            accuracy,
        })
    }
}

pub fn train(path: &Path, alpha: f64) -> NaiveBayes {
    NaiveBayes::with_alpha(alpha).train(read_lines(path))
}

/// Predicts the test tweets and writes both output files, returning the accuracy. Any failure
/// is logged and reported as an accuracy of 0.
pub fn evaluate(model: &NaiveBayes, paths: &RunPaths) -> f64 {
    let tweets = read_lines(&paths.tweets);
    let truth = read_lines(&paths.truth);

    let (results_out, accuracy_out) =
        match (create_output(&paths.results), create_output(&paths.accuracy)) {
            (Ok(results), Ok(accuracy)) => (results, accuracy),
            (Err(e), _) | (_, Err(e)) => {
                error!("{}", e);
                return 0.0;
            }
        };

    let evaluation = match Evaluation::run(model, &tweets, &truth) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            error!("{}", e);
            Evaluation::default()
        }
    };
    if let Err(e) = evaluation.write_results(results_out) {
        error!("could not write results to {:?}: {}", paths.results, e);
    }
    if let Err(e) = evaluation.write_report(accuracy_out) {
        error!("could not write accuracy to {:?}: {}", paths.accuracy, e);
    }
    evaluation.accuracy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("sentiment-{}-{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn paths_in(dir: &Path) -> RunPaths {
        RunPaths {
            training: dir.join("train.csv"),
            tweets: dir.join("test_tweets.csv"),
            truth: dir.join("test_sentiment.csv"),
            results: dir.join("results.csv"),
            accuracy: dir.join("accuracy.txt"),
        }
    }

    #[test]
    fn requires_five_paths() {
        let args = ["a", "b", "c", "d", "e"].map(PathBuf::from).to_vec();
        let paths = RunPaths::from_args(args).unwrap();
        assert_eq!(paths.training, PathBuf::from("a"));
        assert_eq!(paths.accuracy, PathBuf::from("e"));
        assert!(RunPaths::from_args(vec![PathBuf::from("a")]).is_none());
        assert!(RunPaths::from_args(Vec::new()).is_none());
    }

    #[test]
    fn runs_end_to_end() {
        let dir = scratch_dir("end-to-end");
        let paths = paths_in(&dir);
        fs::write(
            &paths.training,
            "4,1,d,q,u,love this day\n0,2,d,q,u,hate this day\n4,3,d,q\n",
        )
        .unwrap();
        fs::write(
            &paths.tweets,
            "10,d,q,u,love love\n11,d,q,u,hate hate\n12,d,q,u,love it\nshort,row\n",
        )
        .unwrap();
        fs::write(&paths.truth, "4,10\n0,11\n0,12\n").unwrap();

        let model = train(&paths.training, 1.0);
        let accuracy = evaluate(&model, &paths);

        let results = fs::read_to_string(&paths.results).unwrap();
        let report = fs::read_to_string(&paths.accuracy).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        assert!((accuracy - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(results, "4, 10\n0, 11\n4, 12\n");
        assert_eq!(report, "0.667\n0, 4, 12\n");
    }

    #[test]
    fn missing_inputs_give_zero_accuracy() {
        let dir = scratch_dir("missing-inputs");
        let paths = paths_in(&dir);
        let model = train(&paths.training, 1.0);
        let accuracy = evaluate(&model, &paths);
        let report = fs::read_to_string(&paths.accuracy).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(accuracy, 0.0);
        assert_eq!(report, "0.000\n");
    }

    #[test]
    fn unopenable_outputs_give_zero_accuracy() {
        let dir = scratch_dir("bad-outputs");
        let mut paths = paths_in(&dir);
        paths.accuracy = dir.join("no-such-dir").join("accuracy.txt");
        fs::write(&paths.training, "4,1,d,q,u,love\n0,2,d,q,u,hate\n").unwrap();
        fs::write(&paths.tweets, "10,d,q,u,love\n").unwrap();
        fs::write(&paths.truth, "4,10\n").unwrap();
        let model = train(&paths.training, 1.0);
        let accuracy = evaluate(&model, &paths);
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(accuracy, 0.0);
    }
}
