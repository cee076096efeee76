//! keg CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keg::cli::{Cli, Commands};
use keg::commands::{
    run_config, run_create, run_dex, run_edit, run_import, run_last, run_publish, run_updated,
    CommandContext,
};
use keg::KegConfig;

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> keg::Result<String> {
    let cli = Cli::parse();
    let config = KegConfig::load()?;
    init_logging(&cli, &config);

    let ctx = CommandContext::new(cli.format, cli.verbose, cli.keg.clone(), config);

    match &cli.command {
        Commands::Dex(args) => run_dex(args, &ctx),
        Commands::Last => run_last(&ctx),
        Commands::Updated => run_updated(&ctx),
        Commands::Create(args) => run_create(args, &ctx),
        Commands::Edit(args) => run_edit(args, &ctx),
        Commands::Import(args) => run_import(args, &ctx),
        Commands::Publish => run_publish(&ctx),
        Commands::Config(args) => run_config(args, &ctx),
    }
}

/// Logs go to stderr. `RUST_LOG` wins, then `--verbose`, then the config.
fn init_logging(cli: &Cli, config: &KegConfig) {
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keg={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
