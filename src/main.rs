use channel_views::{pipeline, Config};
use tracing::{error, info};

/// Main entry point for the application.
///
/// # Steps
/// 1. Initializes logging with file and line numbers on stderr
/// 2. Loads `config.json` from the working directory
/// 3. Builds the single platform client
/// 4. Runs the report pipeline
///
/// Any failure, including a missing or invalid config, is logged and ends
/// the process with exit status 1.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .init();

    info!("Starting application...");

    match pipeline::run_from_config(Config::DEFAULT_PATH).await {
        Ok(Some(_)) => info!("Application completed successfully"),
        Ok(None) => info!("No report written"),
        Err(e) => {
            error!("Application error: {}", e);
            std::process::exit(1);
        }
    }
}
