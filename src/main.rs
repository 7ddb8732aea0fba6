use CSTRsim::cli::cli_batch::run_batch;
use CSTRsim::cli::cli_main::run_interactive_menu;
use CSTRsim::config::SimulationConfig;
use log::{LevelFilter, SetLoggerError, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

fn try_init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
}

/// Runs without logging when the terminal logger cannot be installed.
fn init_logger(level: LevelFilter) {
    if let Err(e) = try_init_logger(level) {
        eprintln!("logger init failed: {}", e);
    }
}

/// `CSTRsim <config.json>` runs the configured computations, `CSTRsim` opens the menu.
pub fn main() -> ExitCode {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = match SimulationConfig::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    init_logger(LevelFilter::Info);
                    error!("cannot read config {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            };
            init_logger(config.level_filter());
            match run_batch(&config, true) {
                Ok(_) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            init_logger(LevelFilter::Info);
            run_interactive_menu();
            ExitCode::SUCCESS
        }
    }
}
