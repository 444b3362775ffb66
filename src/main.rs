use anyhow::Result;
use clap::Parser;
use mint_tx::args::{Args, Command};
use mint_tx::{commands, Config};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let config_path = args.common().config();
    let config = || Config::load(config_path);

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(config_path, init_args.force())?.print(),
        Command::Convert(convert_args) => commands::convert(convert_args)?.print(),
        Command::Filter(filter_args) => commands::filter(&config()?, filter_args)?.print(),
        Command::Sum(select_args) => commands::sum(&config()?, select_args)?.print(),
        Command::Group(group_args) => commands::group(&config()?, group_args)?.print(),
        Command::Months(select_args) => commands::months(&config()?, select_args)?.print(),
        Command::Buckets(buckets_args) => commands::buckets(&config()?, buckets_args)?.print(),
        Command::Presets => commands::presets(&config()?)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for the library and binary only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
