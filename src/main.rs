//! bluecarbon CLI entry point.

use anyhow::Result;
use clap::Parser;

use bluecarbon::cli::commands;
use bluecarbon::cli::{handle_error, AppContext, Cli, Commands};
use bluecarbon::infrastructure::config::ConfigLoader;
use bluecarbon::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json).await,
        Commands::Config(args) => commands::config::execute(args, &config, cli.json),
        Commands::Import(args) => {
            let ctx = AppContext::open(config).await?;
            let result = commands::import::execute(args, &ctx, cli.json).await;
            ctx.close().await;
            result
        }
        Commands::Projects(args) => {
            let ctx = AppContext::open(config).await?;
            let result = commands::projects::execute(args, &ctx, cli.json).await;
            ctx.close().await;
            result
        }
        Commands::Verify(args) => {
            let ctx = AppContext::open(config).await?;
            let result = commands::verify::execute(args, &ctx, cli.json).await;
            ctx.close().await;
            result
        }
        Commands::History(args) => {
            let ctx = AppContext::open(config).await?;
            let result = commands::history::execute(args, &ctx, cli.json).await;
            ctx.close().await;
            result
        }
    }
}
