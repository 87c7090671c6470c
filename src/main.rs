//! taskrank CLI entry point.

use anyhow::Result;
use clap::Parser;

use taskrank::cli::{commands, handle_error, Cli, Commands};
use taskrank::infrastructure::config::ConfigLoader;
use taskrank::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config, cli.json),
        Commands::Suggest(args) => commands::suggest::execute(args, &config, cli.json),
        Commands::Cycles(args) => commands::cycles::execute(args, cli.json),
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
    }
}
