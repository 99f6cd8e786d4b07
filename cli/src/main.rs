mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{check, convert, country, day, towers};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to stderr at a level from `-v` (warn, info, debug), unless `RUST_LOG` is set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string())))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Country(args) => country::run(&cli, args),
        Commands::Day(args) => day::run(&cli, args),
        Commands::Check(args) => check::run(&cli, args),
        Commands::Towers(args) => towers::run(&cli, args),
        Commands::Convert(args) => convert::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
