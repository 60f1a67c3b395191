use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POLICY_PATH: &str = "config/settings.yaml";
pub const DEFAULT_NARRATIVE_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_NARRATIVE_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_NARRATIVE_TIMEOUT_SECS: u64 = 10;

/// Distinguishes runtime behavior for different stages of the service.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub policy: PolicySourceConfig,
    pub narrative: NarrativeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let policy_path = env::var("PAYOUT_POLICY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_POLICY_PATH));

        let api_key = env::var("GROQ_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let model =
            env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_NARRATIVE_MODEL.to_string());
        let timeout_secs = match env::var("NARRATIVE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidNarrativeTimeout)?,
            Err(_) => DEFAULT_NARRATIVE_TIMEOUT_SECS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            policy: PolicySourceConfig {
                path: policy_path,
                // Production deployments must ship their own policy document.
                allow_default: environment != AppEnvironment::Production,
            },
            narrative: NarrativeConfig {
                api_key,
                model,
                endpoint: DEFAULT_NARRATIVE_ENDPOINT.to_string(),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the payout policy document lives and whether the built-in policy may stand in.
#[derive(Debug, Clone)]
pub struct PolicySourceConfig {
    pub path: PathBuf,
    pub allow_default: bool,
}

/// Settings for the outbound audit narrative generator.
#[derive(Clone)]
pub struct NarrativeConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl fmt::Debug for NarrativeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrativeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNarrativeTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNarrativeTimeout => {
                write!(f, "NARRATIVE_TIMEOUT_SECS must be a positive whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNarrativeTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
