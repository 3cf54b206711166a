use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
const DEFAULT_NOTICE_TTL_SECS: u64 = 3;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub board: BoardConfig,
    pub generation: GenerationConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let notice_ttl = read_secs("APP_NOTICE_TTL_SECS", DEFAULT_NOTICE_TTL_SECS)?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_key = env::var("GENAI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model =
            env::var("GENAI_MODEL").unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());
        let endpoint =
            env::var("GENAI_ENDPOINT").unwrap_or_else(|_| DEFAULT_GENERATION_ENDPOINT.to_string());
        let timeout = read_secs("GENAI_TIMEOUT_SECS", DEFAULT_GENERATION_TIMEOUT_SECS)?;

        Ok(Self {
            environment,
            board: BoardConfig { notice_ttl },
            generation: GenerationConfig {
                api_key,
                model,
                endpoint,
                timeout,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn read_secs(var: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

/// Session behavior.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// How long a notice stays visible before it auto-dismisses.
    pub notice_ttl: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        }
    }
}

/// Settings for the generative text service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GENERATION_MODEL.to_string(),
            endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str },
    MissingApiKey,
    HttpClient(reqwest::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a whole number of seconds")
            }
            ConfigError::MissingApiKey => {
                write!(f, "GENAI_API_KEY (or API_KEY) must be set to generate descriptions")
            }
            ConfigError::HttpClient(err) => write!(f, "unable to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidNumber { .. } | ConfigError::MissingApiKey => None,
            ConfigError::HttpClient(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "APP_NOTICE_TTL_SECS",
            "GENAI_API_KEY",
            "API_KEY",
            "GENAI_MODEL",
            "GENAI_ENDPOINT",
            "GENAI_TIMEOUT_SECS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.board.notice_ttl, Duration::from_secs(3));
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.generation.model, DEFAULT_GENERATION_MODEL);
        assert_eq!(config.generation.timeout, Duration::from_secs(60));
    }

    #[test]
    fn api_key_falls_back_to_legacy_variable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("API_KEY", "legacy-key");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.generation.api_key.as_deref(), Some("legacy-key"));

        env::set_var("GENAI_API_KEY", "primary-key");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.generation.api_key.as_deref(), Some("primary-key"));
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_NOTICE_TTL_SECS", "soon");
        match AppConfig::load() {
            Err(ConfigError::InvalidNumber { var }) => assert_eq!(var, "APP_NOTICE_TTL_SECS"),
            other => panic!("expected invalid number, got {other:?}"),
        }
        reset_env();
    }
}
