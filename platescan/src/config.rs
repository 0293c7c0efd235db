use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub ocr: OcrConfig,
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `None` keeps records in process memory only.
    pub database_url: Option<String>,
    pub auth_token: Option<String>,
    pub seed: bool,
    /// SQLite `busy_timeout` for the libsql store.
    pub busy_timeout_ms: u64,
    /// SQLite `journal_mode` for the libsql store.
    pub journal_mode: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            auth_token: None,
            seed: true,
            busy_timeout_ms: 5000,
            journal_mode: "WAL".to_string(),
        }
    }
}

/// Vision model used to read plates out of images.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_output_tokens: u32,
    pub image_detail: ImageDetailLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDetailLevel {
    Low,
    High,
    Auto,
}

impl std::str::FromStr for ImageDetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            "auto" => Ok(Self::Auto),
            other => Err(format!("expected low, high or auto, got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Answer an unmatched extraction with the fixed demo record (HTTP 203)
    /// instead of a 404.
    pub placeholder_on_miss: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model: "openai/gpt-4o-mini".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 30,
            max_output_tokens: 32,
            image_detail: ImageDetailLevel::Low,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("PLATESCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PLATESCAN_PORT", 8000),
                body_limit: parse_env_or("PLATESCAN_BODY_LIMIT", 20 * 1024 * 1024),
            },
            store: StoreConfig {
                database_url: env_non_empty("DATABASE_URL")
                    .filter(|url| !url.eq_ignore_ascii_case("memory")),
                auth_token: env_non_empty("DATABASE_AUTH_TOKEN"),
                seed: parse_env_or("PLATESCAN_SEED", true),
                busy_timeout_ms: parse_env_or("DATABASE_BUSY_TIMEOUT_MS", 5000),
                journal_mode: env::var("DATABASE_JOURNAL_MODE")
                    .unwrap_or_else(|_| "WAL".to_string()),
            },
            ocr: OcrConfig {
                model: env::var("OCR_MODEL").unwrap_or_else(|_| "openai/gpt-4o-mini".to_string()),
                api_key: env_non_empty("OCR_API_KEY").or_else(|| env_non_empty("OPENAI_API_KEY")),
                base_url: env_non_empty("OCR_BASE_URL"),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 30),
                max_output_tokens: parse_env_or("OCR_MAX_OUTPUT_TOKENS", 32),
                image_detail: parse_env_or("OCR_IMAGE_DETAIL", ImageDetailLevel::Low),
            },
            extract: ExtractConfig {
                placeholder_on_miss: parse_env_or("EXTRACT_PLACEHOLDER_ON_MISS", false),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Providers that speak the OpenAI chat-completions protocol.
pub const KNOWN_OCR_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Split `provider/model` into its parts. Models without a known provider
/// prefix are reported under the `local` provider.
pub fn parse_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_OCR_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    ("local", model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_ocr_config_defaults() {
        std::env::remove_var("OCR_MODEL");
        std::env::remove_var("OCR_TIMEOUT");
        std::env::remove_var("OCR_IMAGE_DETAIL");
        std::env::remove_var("OCR_MAX_OUTPUT_TOKENS");

        let config = Config::default();
        assert_eq!(config.ocr.model, "openai/gpt-4o-mini");
        assert_eq!(config.ocr.timeout_secs, 30);
        assert_eq!(config.ocr.max_output_tokens, 32);
        assert_eq!(config.ocr.image_detail, ImageDetailLevel::Low);
    }

    #[test]
    #[serial]
    fn test_ocr_api_key_prefers_ocr_specific_variable() {
        std::env::set_var("OPENAI_API_KEY", "openai-key");
        std::env::remove_var("OCR_API_KEY");
        assert_eq!(Config::default().ocr.api_key.as_deref(), Some("openai-key"));

        std::env::set_var("OCR_API_KEY", "ocr-key");
        assert_eq!(Config::default().ocr.api_key.as_deref(), Some("ocr-key"));

        std::env::remove_var("OCR_API_KEY");
        std::env::remove_var("OPENAI_API_KEY");
        assert!(Config::default().ocr.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_memory_database_url_means_in_memory_store() {
        std::env::set_var("DATABASE_URL", "memory");
        assert!(Config::default().store.database_url.is_none());

        std::env::set_var("DATABASE_URL", "file:plates.db");
        assert_eq!(
            Config::default().store.database_url.as_deref(),
            Some("file:plates.db")
        );

        std::env::remove_var("DATABASE_URL");
        assert!(Config::default().store.database_url.is_none());
    }

    #[test]
    #[serial]
    fn test_store_pragmas_come_from_env() {
        std::env::remove_var("DATABASE_BUSY_TIMEOUT_MS");
        std::env::remove_var("DATABASE_JOURNAL_MODE");
        let store = Config::default().store;
        assert_eq!(store.busy_timeout_ms, 5000);
        assert_eq!(store.journal_mode, "WAL");

        std::env::set_var("DATABASE_BUSY_TIMEOUT_MS", "250");
        std::env::set_var("DATABASE_JOURNAL_MODE", "delete");
        let store = Config::default().store;
        assert_eq!(store.busy_timeout_ms, 250);
        assert_eq!(store.journal_mode, "delete");

        std::env::remove_var("DATABASE_BUSY_TIMEOUT_MS");
        std::env::remove_var("DATABASE_JOURNAL_MODE");
    }

    #[test]
    #[serial]
    fn test_placeholder_disabled_by_default() {
        std::env::remove_var("EXTRACT_PLACEHOLDER_ON_MISS");
        assert!(!Config::default().extract.placeholder_on_miss);

        std::env::set_var("EXTRACT_PLACEHOLDER_ON_MISS", "true");
        assert!(Config::default().extract.placeholder_on_miss);
        std::env::remove_var("EXTRACT_PLACEHOLDER_ON_MISS");
    }

    #[test]
    #[serial]
    fn test_parse_env_or_invalid_value_uses_default() {
        std::env::set_var("__TEST_PLATESCAN_PORT", "not-a-port");
        let result: u16 = parse_env_or("__TEST_PLATESCAN_PORT", 8000);
        assert_eq!(result, 8000);
        std::env::remove_var("__TEST_PLATESCAN_PORT");
    }

    #[test]
    fn test_image_detail_parsing() {
        assert_eq!("HIGH".parse::<ImageDetailLevel>(), Ok(ImageDetailLevel::High));
        assert_eq!(" auto ".parse::<ImageDetailLevel>(), Ok(ImageDetailLevel::Auto));
        assert!("medium".parse::<ImageDetailLevel>().is_err());
    }

    #[test]
    fn test_parse_provider_model() {
        assert_eq!(
            parse_provider_model("openai/gpt-4o-mini"),
            ("openai", "gpt-4o-mini")
        );
        assert_eq!(
            parse_provider_model("openrouter/openai/gpt-4o"),
            ("openrouter", "openai/gpt-4o")
        );
        assert_eq!(parse_provider_model("llava"), ("local", "llava"));
    }
}
