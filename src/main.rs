//! # values-checker
//!
//! `values-checker` validates values files against a chart's defaults and its
//! optional `values.schema.json` before anything is rendered or deployed.
//!
//! ## Usage
//!
//! ```sh
//! values-checker -f my-values.yaml --chart ./charts/web
//! values-checker -f prod.yaml -f staging.yaml --chart ./charts/web --strict -o json
//! ```
//!
//! Exit codes: 0 clean, 1 errors found, 2 warnings found with `--strict`,
//! 3 tool error.

use clap::Parser as _;
use values_checker::cli::Args;
use values_checker::error::CheckError;
use values_checker::system::real::RealSystem;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();
    match values_checker::run(args, &system) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<CheckError>()
                    .map_or(3, CheckError::exit_code),
            );
        }
    }
}
