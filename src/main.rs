//! Conquest -- a turn-based territory conquest game for the console.
//!
//! Reads the setup and menu choices from stdin and writes prompts, tables,
//! and attack results to stdout. Logs go to stderr, filtered by `RUST_LOG`
//! (default `warn`).

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use conquest::config::GameConfig;
use conquest::shell;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match GameConfig::from_args(env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("conquest: {}", e);
            eprintln!(
                "usage: conquest [--seed N] [--rule attrition|conquest] \
                 [--labels truncate|reject] [--config FILE]"
            );
            return ExitCode::from(2);
        }
    };
    tracing::debug!(?config, "configuration loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match shell::run(stdin.lock(), &mut out, config).and_then(|exit| {
        out.flush()?;
        Ok(exit)
    }) {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(e) => {
            tracing::error!(error = %e, "console I/O failed");
            ExitCode::FAILURE
        }
    }
}
