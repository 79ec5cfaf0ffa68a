use homework_bot::{
    arguments::{patterns, print_help},
    logger::{self as logger, LogTag},
    version,
};

/// Main entry point for the homework bot
///
/// Handles --help and --version, then hands over to `run::run_bot`. Any startup
/// failure (missing credentials, unreadable settings) is logged as critical and
/// ends the process with exit code 1.
#[tokio::main]
async fn main() {
    // .env is optional; real environment variables take precedence
    dotenv::dotenv().ok();

    logger::init();

    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    if patterns::is_version_requested() {
        println!("{}", version::version_line());
        std::process::exit(0);
    }

    match homework_bot::run::run_bot().await {
        Ok(()) => {
            logger::flush();
            std::process::exit(0);
        }
        Err(e) => {
            logger::critical(LogTag::System, &format!("{:#}", e));
            logger::flush();
            std::process::exit(1);
        }
    }
}
