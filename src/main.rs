//! Main entry point for DeepL Translator CLI

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deepl_translator::cli::commands::{self, Commands};
use deepl_translator::{DeepLClient, StdoutSink, TranslatorConfig};

/// DeepL Translator - translate text through DeepL's mobile endpoint
#[derive(Parser, Debug)]
#[command(name = "deepl-translator", version, about, long_about = None)]
struct Args {
    /// Endpoint override (optional, defaults to DEEPL_ENDPOINT env var)
    #[arg(long)]
    endpoint: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }

    let translator = DeepLClient::new(config)?;

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            source_lang,
            target_lang,
            alternatives,
            print,
            dry_run,
        }) => {
            let translator = translator.with_sink(Arc::new(StdoutSink));
            commands::handle_translate(
                translator,
                text,
                source_lang,
                target_lang,
                alternatives,
                print,
                dry_run,
            )
            .await?;
        }
        Some(Commands::Server { host, port }) => {
            commands::handle_server(translator, host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
