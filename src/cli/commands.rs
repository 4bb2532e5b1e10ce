//! CLI command definitions and handlers

use clap::Subcommand;

use crate::core::client::DeepLClient;
use crate::core::models::{TranslationRequest, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};

/// Commands for DeepL Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a piece of text
    Translate {
        /// Text to translate
        text: String,

        /// Source language (AUTO lets the service detect it)
        #[arg(short, long, default_value = DEFAULT_SOURCE_LANG)]
        source_lang: String,

        /// Target language
        #[arg(short, long, default_value = DEFAULT_TARGET_LANG)]
        target_lang: String,

        /// Number of alternative translations (0-3)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        alternatives: i64,

        /// Also hand the result to the log sink
        #[arg(long)]
        print: bool,

        /// Print the signed request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 1188)
        #[arg(short, long, default_value_t = 1188)]
        port: u16,
    },
}

/// Handle translate command
pub async fn handle_translate(
    translator: DeepLClient,
    text: String,
    source_lang: String,
    target_lang: String,
    alternatives: i64,
    print: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    use tracing::info;

    let request = TranslationRequest::new(text)
        .with_source_lang(source_lang)
        .with_target_lang(target_lang)
        .with_alternatives(alternatives)
        .with_print_result(print);

    if dry_run {
        let (id, body) = translator.build_payload(&request)?;
        info!("Signed request id={}", id);
        println!("{}", body);
        return Ok(());
    }

    match translator.translate(&request).await? {
        Some(result) => {
            println!("{}", result.text);
            for (i, alternative) in result.alternatives.iter().enumerate() {
                println!("  {}. {}", i + 1, alternative);
            }
            Ok(())
        }
        None => Err(anyhow::anyhow!("Translation failed, see log for details")),
    }
}

/// Handle server command
pub async fn handle_server(translator: DeepLClient, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📮 POST http://{}:{}/translate", host, port);

    run_server(translator, host, port).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_translate_defaults() {
        let cli = TestCli::try_parse_from(["test", "translate", "Hello"]).unwrap();
        match cli.command {
            Commands::Translate {
                text,
                source_lang,
                target_lang,
                alternatives,
                print,
                dry_run,
            } => {
                assert_eq!(text, "Hello");
                assert_eq!(source_lang, "AUTO");
                assert_eq!(target_lang, "ZH");
                assert_eq!(alternatives, 0);
                assert!(!print);
                assert!(!dry_run);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_server_port() {
        let cli = TestCli::try_parse_from(["test", "server", "-p", "8080"]).unwrap();
        assert!(matches!(cli.command, Commands::Server { port: 8080, .. }));
    }

    #[test]
    fn test_dry_run_does_not_send() {
        let config = crate::core::config::TranslatorConfig {
            endpoint: "http://127.0.0.1:9/jsonrpc".to_string(),
            ..Default::default()
        };
        let translator = DeepLClient::new(config).unwrap();
        let result = tokio_test::block_on(handle_translate(
            translator,
            "Hi".to_string(),
            "EN".to_string(),
            "DE".to_string(),
            1,
            false,
            true,
        ));
        assert!(result.is_ok());
    }
}
