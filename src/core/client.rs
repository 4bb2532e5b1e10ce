//! Async client for the mobile JSON-RPC translation endpoint

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use tracing::{debug, error};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{RpcResponse, TranslationRequest, TranslationResult};
use crate::core::random::{OsRandom, RandomSource};
use crate::core::signing;
use crate::core::sink::{ResultSink, TracingSink};

/// Source of epoch milliseconds
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Translation client impersonating the DeepL iOS app
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
    headers: HeaderMap,
    random: Arc<dyn RandomSource>,
    sink: Arc<dyn ResultSink>,
    clock: Clock,
}

impl DeepLClient {
    /// Create a new client
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .http1_title_case_headers()
            .build()?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.profile.headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TranslationError::ConfigError {
                    message: format!("invalid header name {}: {}", name, e),
                }
            })?;
            let value = HeaderValue::from_str(&value).map_err(|e| TranslationError::ConfigError {
                message: format!("invalid value for header {}: {}", name, e),
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            client,
            config: Arc::new(config),
            headers,
            random: Arc::new(OsRandom),
            sink: Arc::new(TracingSink),
            clock: system_clock,
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Self::new(config)
    }

    /// Replace the generator used for request ids
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    /// Replace the observer notified for `print_result` requests
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the time source used for the signed timestamp
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Sign a request, returning the id and the exact body that would be sent
    pub fn build_payload(&self, request: &TranslationRequest) -> Result<(u64, String)> {
        let id = signing::request_id(self.random.as_ref());
        let i_count = signing::i_count(&request.text);
        let timestamp = signing::timestamp((self.clock)(), i_count);
        let payload = signing::build_payload(request, id, timestamp);
        let body = signing::sign(&payload)?;
        Ok((id, body))
    }

    /// Translate, reporting every failure as a distinct error
    pub async fn try_translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let (id, body) = self.build_payload(request)?;
        debug!("Sending request id={} ({} bytes)", id, body.len());

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslationError::rate_limited());
        }
        if status != StatusCode::OK {
            return Err(TranslationError::UpstreamError {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })?;
        let parsed: RpcResponse =
            serde_json::from_slice(&bytes).map_err(|e| TranslationError::InvalidResponseError {
                message: e.to_string(),
            })?;

        let entry = parsed.result.texts.into_iter().next().ok_or_else(|| {
            TranslationError::InvalidResponseError {
                message: "No translation in response".to_string(),
            }
        })?;
        let result = TranslationResult::from(entry);

        if request.print_result {
            self.sink.emit(&result);
        }

        Ok(result)
    }

    /// Translate, logging soft failures and returning `None` for them.
    ///
    /// Only a rate limit is returned as an error so callers can back off.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<Option<TranslationResult>> {
        match self.try_translate(request).await {
            Ok(result) => Ok(Some(result)),
            Err(e) if e.is_rate_limited() => Err(e),
            Err(TranslationError::UpstreamError { status }) => {
                error!("Error {}", status);
                Ok(None)
            }
            Err(e) => {
                error!("Translation failed: {}", e);
                Ok(None)
            }
        }
    }

    /// Positional form of [`DeepLClient::translate`]
    pub async fn translate_text(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        alternative_count: i64,
        print_result: bool,
    ) -> Result<Option<TranslationResult>> {
        let request = TranslationRequest::new(text)
            .with_source_lang(source_lang)
            .with_target_lang(target_lang)
            .with_alternatives(alternative_count)
            .with_print_result(print_result);
        self.translate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::RangeInclusive;

    #[derive(Debug)]
    struct LowestRandom;

    impl RandomSource for LowestRandom {
        fn next_in_range(&self, range: RangeInclusive<u64>) -> u64 {
            *range.start()
        }
    }

    fn fixed_client() -> DeepLClient {
        DeepLClient::new(TranslatorConfig::default())
            .unwrap()
            .with_random_source(Arc::new(LowestRandom))
            .with_clock(|| 1_700_000_000_000)
    }

    #[test]
    fn test_client_creation() {
        let client = DeepLClient::new(TranslatorConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().headers.len(), 11);
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = TranslatorConfig {
            endpoint: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            DeepLClient::new(config),
            Err(TranslationError::InternalError(_))
        ));
    }

    #[test]
    fn test_build_payload_is_deterministic_with_fixed_sources() {
        let client = fixed_client();
        let request = TranslationRequest::new("Hi there").with_source_lang("en");
        let (id, body) = client.build_payload(&request).unwrap();

        assert_eq!(id, 8_300_000_000);
        // one 'i' so the timestamp moves to the next even millisecond
        assert!(body.contains(r#""timestamp":1700000000002"#));
        assert!(body.contains(r#""method": "LMT_handle_texts""#));
        assert!(body.contains(r#""source_lang_user_selected":"EN""#));
    }

    #[test]
    fn test_build_payload_without_i_keeps_clock() {
        let client = fixed_client();
        let (_, body) = client.build_payload(&TranslationRequest::new("Hello")).unwrap();
        assert!(body.contains(r#""timestamp":1700000000000"#));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_soft_failure() {
        let config = TranslatorConfig {
            endpoint: "http://127.0.0.1:9/jsonrpc".to_string(),
            timeout_ms: 2000,
            ..Default::default()
        };
        let client = DeepLClient::new(config).unwrap();
        let result = client.translate(&TranslationRequest::new("Hello")).await;
        assert!(matches!(result, Ok(None)));
    }
}
