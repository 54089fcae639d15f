//! Command-line entry point for the legal matching engine.
//!
//! Reads one JSON request from the command line, dispatches it to the
//! requested engine operation, and prints one JSON response to stdout.
//! Failures print an error envelope and exit non-zero.

use clap::{Arg, Command};
use legal_match::api::{self, AppState, Mode};
use legal_match::store::{self, CandidateStore};
use legal_match::{Classifier, Config, MatchError, Recommender, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() {
    let matches = Command::new("legal-match")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Topic classification and lawyer recommendation engine")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .default_value("config.toml")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(["chat", "lawyers", "questions"])
                .default_value("chat")
                .help("Operation to run"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(clap::value_parser!(u64))
                .help("Seed for reproducible response selection"),
        )
        .arg(
            Arg::new("request")
                .value_name("JSON")
                .required(true)
                .help("JSON request document"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").cloned().unwrap_or_default();
    let mode_name = matches.get_one::<String>("mode").cloned().unwrap_or_default();
    let seed = matches.get_one::<u64>("seed").copied();
    let payload = matches.get_one::<String>("request").cloned().unwrap_or_default();

    match run(&config_path, &mode_name, seed, &payload) {
        Ok(response) => println!("{response}"),
        Err(error) => {
            tracing::error!(error = %error, category = error.category(), "request failed");
            println!("{}", api::error_response(&error));
            std::process::exit(1);
        }
    }
}

fn run(config_path: &str, mode_name: &str, seed: Option<u64>, payload: &str) -> Result<String> {
    let config = Config::from_file(config_path)?;
    init_logging(&config);

    let mode: Mode = mode_name.parse()?;
    let state = build_state(config, seed)?;

    api::handle_request(&state, mode, payload)
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let fmt_layer = if config.logging.json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    // stdout is reserved for the response document
    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();
}

fn build_state(config: Config, seed: Option<u64>) -> Result<AppState> {
    let candidates = match CandidateStore::open(&config.storage.db_path) {
        Ok(store) => store.load_candidates()?,
        Err(error) => {
            tracing::warn!(error = %error, "candidate store unavailable");
            Vec::new()
        }
    };

    let candidates = if candidates.is_empty() {
        if !config.storage.use_fallback {
            return Err(MatchError::DataUnavailable {
                store: config.storage.db_path.display().to_string(),
                details: "no candidates and the fallback population is disabled".to_string(),
            });
        }
        tracing::warn!("using the built-in fallback population");
        store::fallback_candidates()
    } else {
        candidates
    };

    let classifier = match seed {
        Some(seed) => Classifier::with_seed(seed),
        None => Classifier::new(),
    };

    Ok(AppState::new(config, classifier, Recommender::new(candidates)))
}
