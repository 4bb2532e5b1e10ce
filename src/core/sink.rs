//! Observers receiving results when a request asks for them to be printed

use std::fmt;
use std::io::Write;

use tracing::{info, warn};

use crate::core::models::TranslationResult;

/// Receives a finished translation when `print_result` is set
pub trait ResultSink: Send + Sync + fmt::Debug {
    /// Called once per successful translation
    fn emit(&self, result: &TranslationResult);
}

/// Logs results through `tracing` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn emit(&self, result: &TranslationResult) {
        info!(
            text = %result.text,
            alternatives = ?result.alternatives,
            "Translation result"
        );
    }
}

/// Writes results to stdout as a JSON line
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ResultSink for StdoutSink {
    fn emit(&self, result: &TranslationResult) {
        let line = match serde_json::to_string(result) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to serialize result: {}", e);
                return;
            }
        };
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line) {
            warn!("Failed to write result: {}", e);
        }
    }
}
