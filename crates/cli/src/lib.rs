pub mod commands;
pub mod prompt;
pub mod render;
pub mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stocky_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
    name = "stocky",
    about = "Stocky inventory operator CLI",
    long_about = "Track products in an in-memory catalog: register, edit and remove records, \
                  move stock in and out, and print valuation and low-stock reports.",
    after_help = "Examples:\n  stocky\n  stocky --empty\n  stocky report --json\n  stocky low-stock"
)]
pub struct Cli {
    #[arg(long, value_name = "PATH", help = "Path to a stocky.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Start with an empty catalog instead of the demo fixture")]
    empty: bool,
    #[arg(long, value_name = "LEVEL", help = "Override the configured log level")]
    log_level: Option<String>,
    #[arg(
        long,
        value_name = "FORMAT",
        help = "Override the configured log format (compact|pretty|json)"
    )]
    log_format: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the interactive inventory session (the default)")]
    Session,
    #[command(about = "Print the full inventory valuation report")]
    Report {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print products below their minimum stock")]
    LowStock {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print the condensed product listing")]
    List {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let log_format = match cli.log_format.as_deref().map(str::parse::<LogFormat>) {
        None => None,
        Some(Ok(format)) => Some(format),
        Some(Err(error)) => {
            eprintln!("error: {error}");
            return ExitCode::from(2);
        }
    };

    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides {
            demo_data: cli.empty.then_some(false),
            log_level: cli.log_level.clone(),
            log_format,
        },
    };

    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::from(2);
        }
    };

    init_logging(&config);

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => run_session(&config),
        Command::Report { json } => finish(commands::report::run(&config, json)),
        Command::LowStock { json } => finish(commands::low_stock::run(&config, json)),
        Command::List { json } => finish(commands::list::run(&config, json)),
    }
}

/// Log to stderr so the tables and prompts on stdout stay clean.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .with_writer(io::stderr)
            .compact()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .with_writer(io::stderr)
            .pretty()
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_target(false)
            .with_max_level(log_level)
            .with_writer(io::stderr)
            .json()
            .init(),
    }
}

fn run_session(config: &AppConfig) -> ExitCode {
    let catalog = commands::build_catalog(config);
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new(
        catalog,
        config.display.currency.clone(),
        stdin.lock(),
        stdout.lock(),
    );
    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn finish(result: commands::CommandResult) -> ExitCode {
    if result.exit_code == 0 {
        println!("{}", result.output);
    } else {
        eprintln!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}
