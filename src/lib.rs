//! DeepL Translator - Rust client for DeepL's mobile JSON-RPC endpoint
//!
//! This library signs translation requests the way the DeepL iOS app does
//! and returns the primary translation plus up to three alternatives. A CLI
//! and a small HTTP bridge are built on top of it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod server;
pub mod cli;

// Re-export key types for convenience
pub use self::core::{
    client::DeepLClient,
    config::{ClientProfile, TranslatorConfig},
    models::{TranslationRequest, TranslationResult},
    errors::TranslationError,
    random::{OsRandom, RandomSource, ThreadRandom},
    sink::{ResultSink, StdoutSink, TracingSink},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
