//! Main entry point for the mod-translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mod_translator::cli::commands::{self, Commands, RunArgs};
use mod_translator::core::config::DEFAULT_CONFIG_PATH;

/// mod-translator - translate the language files inside game mod archives
#[derive(Parser, Debug)]
#[command(name = "mod-translator", version, about, long_about = None)]
struct Args {
    /// Config file (JSON, TOML or YAML)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("mod_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(run_args) => {
            commands::handle_run(&args.config, run_args).await?;
        }
        Commands::TranslateFile {
            input,
            output,
            force,
            locales,
        } => {
            commands::handle_translate_file(&args.config, input, output, force, locales).await?;
        }
        Commands::Inspect { archive, locales } => {
            commands::handle_inspect(&args.config, archive, locales)?;
        }
        Commands::InitConfig { path, force } => {
            commands::handle_init_config(path, force)?;
        }
    }

    Ok(())
}
