//! CLI entry point for the BGG client.

use bgg_client::{cli, Settings};
use tracing_subscriber::EnvFilter;

fn main() {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over BGG_LOG_LEVEL
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_target(false)
        .init();

    if let Err(e) = cli::run(settings) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
