use std::{env, path::PathBuf, process::exit, time::Instant};

use log::{info, warn};
use persistance::fs::config::{read_config, Config};

mod run;

use run::RunPaths;

fn main() {
    let args = env::args().skip(1).collect::<Vec<String>>();
    let mut positional = Vec::with_capacity(5);
    for arg in args.iter() {
        match arg.as_ref() {
            "-v" | "--version" => return print_version(),
            "-h" | "--help" => return print_help(),
            _ => {
                if arg.starts_with('-') {
                    eprintln!("unknown option: {}", arg);
                    exit(1);
                }
                positional.push(PathBuf::from(arg));
            }
        }
    }
    let paths = match RunPaths::from_args(positional) {
        Some(paths) => paths,
        None => {
            print_usage();
            exit(1);
        }
    };

    let config = read_config();
    init_logger(config.as_ref().map(|c| c.general.log_level.as_str()).unwrap_or("info"));
    let config = config.unwrap_or_else(|e| {
        warn!("{}, falling back to defaults", e);
        Config::default()
    });

    println!("Starting Sentiment Analysis...");
    println!("Training data file: {}", paths.training.display());
    println!("Testing data file: {}", paths.tweets.display());
    println!("Testing sentiment file: {}", paths.truth.display());
    println!("Results output file: {}", paths.results.display());
    println!("Accuracy output file: {}", paths.accuracy.display());

    let now = Instant::now();
    let model = run::train(&paths.training, config.classifier.alpha);
    info!("trained in {}ms", now.elapsed().as_millis());
    let accuracy = run::evaluate(&model, &paths);
    info!("finished in {}ms", now.elapsed().as_millis());
    println!("Classifier Accuracy: {:.3}", accuracy);
}

fn init_logger(default_filter: &str) {
    let mut builder = pretty_env_logger::formatted_builder();
    match env::var("RUST_LOG") {
        Ok(filter) => builder.parse_filters(&filter),
        Err(_) => builder.parse_filters(default_filter),
    };
    builder.init();
}

fn print_version() {
    println!("sentiment v{}", env!("CARGO_PKG_VERSION"));
}

fn print_usage() {
    println!(
        "Usage: sentiment <training_data> <testing_data> <testing_sentiment> <results_file> <accuracy_file>"
    );
}

fn print_help() {
    print_usage();
    print!(
        "
        Trains a Naive Bayes sentiment classifier on <training_data>, predicts every tweet in
        <testing_data>, writes predictions to <results_file> and accuracy plus misclassified
        tweets to <accuracy_file>.

        Options:
        -v, --version                Print version.
        -h, --help                   Show this message.

        Config is read from $SENTIMENT_CONFIG or the platform config directory.
        "
    );
}
