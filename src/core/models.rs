//! Core data models for translation

use serde::{Deserialize, Serialize};

/// Source language flag that lets the upstream detect the language
pub const DEFAULT_SOURCE_LANG: &str = "AUTO";

/// Target language used when the caller does not pick one
pub const DEFAULT_TARGET_LANG: &str = "ZH";

/// JSON-RPC method handling text translation
pub const RPC_METHOD: &str = "LMT_handle_texts";

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, `AUTO` for detection
    pub source_lang: String,
    /// Target language code
    pub target_lang: String,
    /// Requested alternatives, clamped to 0..=3 when signing
    pub alternative_count: i64,
    /// Hand the result to the client's sink
    pub print_result: bool,
}

impl TranslationRequest {
    /// Request with `AUTO` -> `ZH` and no alternatives
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
            alternative_count: 0,
            print_result: false,
        }
    }

    /// Set the source language
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }

    /// Set the target language
    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = target_lang.into();
        self
    }

    /// Out-of-range counts are accepted here and clamped when signing
    pub fn with_alternatives(mut self, count: i64) -> Self {
        self.alternative_count = count;
        self
    }

    /// Ask for the result to be emitted to the sink
    pub fn with_print_result(mut self, print_result: bool) -> Self {
        self.print_result = print_result;
        self
    }
}

/// JSON-RPC envelope sent upstream. Field order is the wire order.
#[derive(Debug, Clone, Serialize)]
pub struct SignedPayload {
    /// Always `2.0`
    pub jsonrpc: &'static str,
    /// Always [`RPC_METHOD`]
    pub method: &'static str,
    /// Random request id, also selects the method key spelling
    pub id: u64,
    /// Translation parameters
    pub params: PayloadParams,
}

/// `params` block of the envelope
#[derive(Debug, Clone, Serialize)]
pub struct PayloadParams {
    /// Texts to translate, always a single entry
    pub texts: Vec<PayloadText>,
    /// Always `newlines`
    pub splitting: &'static str,
    /// Language pair
    pub lang: PayloadLang,
    /// Signed timestamp
    pub timestamp: i64,
}

/// One text entry
#[derive(Debug, Clone, Serialize)]
pub struct PayloadText {
    /// Source text
    pub text: String,
    /// Clamped alternative count
    #[serde(rename = "requestAlternatives")]
    pub request_alternatives: u8,
}

/// Uppercased language pair
#[derive(Debug, Clone, Serialize)]
pub struct PayloadLang {
    /// Source language or `AUTO`
    pub source_lang_user_selected: String,
    /// Target language
    pub target_lang: String,
}

/// Upstream response body: `{ result: { texts: [ { text, alternatives } ] } }`
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    /// JSON-RPC result
    pub result: RpcResult,
}

/// `result` block of the response
#[derive(Debug, Deserialize)]
pub struct RpcResult {
    /// One entry per requested text
    pub texts: Vec<RpcText>,
}

/// Translated text with its alternatives; both fields are required
#[derive(Debug, Deserialize)]
pub struct RpcText {
    /// Primary translation
    pub text: String,
    /// Alternatives in upstream order
    pub alternatives: Vec<RpcAlternative>,
}

/// One alternative translation
#[derive(Debug, Deserialize)]
pub struct RpcAlternative {
    /// Alternative text
    pub text: String,
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Primary translation
    pub text: String,
    /// Alternative translations, possibly empty
    pub alternatives: Vec<String>,
}

impl From<RpcText> for TranslationResult {
    fn from(entry: RpcText) -> Self {
        Self {
            text: entry.text,
            alternatives: entry.alternatives.into_iter().map(|a| a.text).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = TranslationRequest::new("hello");
        assert_eq!(request.source_lang, "AUTO");
        assert_eq!(request.target_lang, "ZH");
        assert_eq!(request.alternative_count, 0);
        assert!(!request.print_result);
    }

    #[test]
    fn test_response_keeps_alternative_order() {
        let body = r#"{"result":{"texts":[{"text":"你好","alternatives":[{"text":"嗨"},{"text":"您好"}]}]}}"#;
        let mut response: RpcResponse = serde_json::from_str(body).unwrap();
        let result = TranslationResult::from(response.result.texts.remove(0));
        assert_eq!(result.text, "你好");
        assert_eq!(result.alternatives, vec!["嗨", "您好"]);
    }

    #[test]
    fn test_response_with_empty_alternatives() {
        let body = r#"{"result":{"texts":[{"text":"Bonjour","alternatives":[]}]}}"#;
        let mut response: RpcResponse = serde_json::from_str(body).unwrap();
        let result = TranslationResult::from(response.result.texts.remove(0));
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_response_without_alternatives_is_rejected() {
        let body = r#"{"result":{"texts":[{"text":"Bonjour"}]}}"#;
        assert!(serde_json::from_str::<RpcResponse>(body).is_err());
    }
}
