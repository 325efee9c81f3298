mod cli;
use cli::{parse_cli_mode, run, CliMode, USAGE};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tutor_availability::storage::config::{Config, LoggingConfig};

fn main() -> anyhow::Result<()> {
    let mode = match parse_cli_mode() {
        Ok(CliMode::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = match Config::load_or_create() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Config error: {} (using defaults)", err);
            Config::default()
        }
    };
    let _guard = setup_logging(&config.logging);

    if let Err(e) = run(mode, &config) {
        tracing::error!("Command failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

fn setup_logging(logging: &LoggingConfig) -> WorkerGuard {
    std::fs::create_dir_all(&logging.directory).ok();

    let file_appender = tracing_appender::rolling::daily(&logging.directory, "tutor-availability.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    tracing::info!("tutor-availability started");
    guard
}
