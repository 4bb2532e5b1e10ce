//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Internal JSON-RPC endpoint used by the mobile apps
pub const DEFAULT_ENDPOINT: &str = "https://www2.deepl.com/jsonrpc";

/// Mobile client identity presented to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// `x-app-os-name`
    pub os_name: String,
    /// `x-app-os-version`
    pub os_version: String,
    /// `x-app-device`
    pub device: String,
    /// `x-app-version`
    pub app_version: String,
    /// `x-app-build`
    pub app_build: String,
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            os_name: "iOS".to_string(),
            os_version: "16.3.0".to_string(),
            device: "iPhone13,2".to_string(),
            app_version: "2.9.1".to_string(),
            app_build: "510265".to_string(),
        }
    }
}

impl ClientProfile {
    /// e.g. `DeepL-iOS/2.9.1 iOS 16.3.0 (iPhone13,2)`
    pub fn user_agent(&self) -> String {
        format!(
            "DeepL-{}/{} {} {} ({})",
            self.os_name, self.app_version, self.os_name, self.os_version, self.device
        )
    }

    /// Header set attached verbatim to every request
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("Accept", "*/*".to_string()),
            ("x-app-os-name", self.os_name.clone()),
            ("x-app-os-version", self.os_version.clone()),
            ("Accept-Language", "en-US,en;q=0.9".to_string()),
            ("Accept-Encoding", "gzip, deflate, br".to_string()),
            ("x-app-device", self.device.clone()),
            ("User-Agent", self.user_agent()),
            ("x-app-build", self.app_build.clone()),
            ("x-app-version", self.app_version.clone()),
            ("Connection", "keep-alive".to_string()),
        ]
    }
}

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// JSON-RPC endpoint URL
    pub endpoint: String,
    /// Request timeout applied by the HTTP client
    pub timeout_ms: u64,
    /// Impersonated app identity
    #[serde(default)]
    pub profile: ClientProfile,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 30000,
            profile: ClientProfile::default(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let endpoint =
            std::env::var("DEEPL_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let mut profile = ClientProfile::default();
        if let Ok(version) = std::env::var("DEEPL_APP_VERSION") {
            profile.app_version = version;
        }
        if let Ok(build) = std::env::var("DEEPL_APP_BUILD") {
            profile.app_build = build;
        }
        if let Ok(os_version) = std::env::var("DEEPL_OS_VERSION") {
            profile.os_version = os_version;
        }
        if let Ok(device) = std::env::var("DEEPL_DEVICE") {
            profile.device = device;
        }

        let config = Self {
            endpoint,
            timeout_ms,
            profile,
        };
        info!("Using endpoint {} as {}", config.endpoint, config.profile.user_agent());
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.is_empty() {
            return Err(anyhow::anyhow!("Endpoint is required"));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(anyhow::anyhow!("Endpoint must be an http(s) URL"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent() {
        let profile = ClientProfile::default();
        assert_eq!(profile.user_agent(), "DeepL-iOS/2.9.1 iOS 16.3.0 (iPhone13,2)");
    }

    #[test]
    fn test_default_headers() {
        let headers = ClientProfile::default().headers();
        assert_eq!(headers.len(), 11);
        assert!(headers.contains(&("x-app-build", "510265".to_string())));
        assert!(headers.contains(&("Accept-Encoding", "gzip, deflate, br".to_string())));
    }

    #[test]
    fn test_config_validation() {
        assert!(TranslatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_endpoint() {
        let config = TranslatorConfig {
            endpoint: "www2.deepl.com/jsonrpc".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TranslatorConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = TranslatorConfig::default();
        config.profile.app_version = "3.0.0".to_string();
        config.to_file(&path).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(loaded.profile.app_version, "3.0.0");
    }

    #[test]
    fn test_config_file_without_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"endpoint":"http://localhost:1","timeout_ms":5}"#).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.profile, ClientProfile::default());
    }
}
