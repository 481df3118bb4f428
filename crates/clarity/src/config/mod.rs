use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEEDBACK_URL: &str =
    "https://<api-id>.execute-api.us-east-1.amazonaws.com/Dev/salary-analysis";
pub const DEFAULT_PREDICTION_URL: &str =
    "https://svo7xmgnz5.execute-api.us-east-1.amazonaws.com/get-salary-predict";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_SESSIONS: usize = 1_000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 1_800;

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
    pub remote: RemoteConfig,
    pub benchmarks: BenchmarkConfig,
    pub sessions: SessionConfig,
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

        let feedback_url =
            env::var("CLARITY_FEEDBACK_URL").unwrap_or_else(|_| DEFAULT_FEEDBACK_URL.to_string());
        let prediction_url = env::var("CLARITY_PREDICTION_URL")
            .unwrap_or_else(|_| DEFAULT_PREDICTION_URL.to_string());
        let request_timeout_secs = match env::var("CLARITY_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let csv_path = env::var("CLARITY_BENCHMARKS_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let max_sessions = positive_var("CLARITY_MAX_SESSIONS", DEFAULT_MAX_SESSIONS as u64)
            .ok_or(ConfigError::InvalidSessionLimit)? as usize;
        let idle_secs = positive_var("CLARITY_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)
            .ok_or(ConfigError::InvalidSessionLimit)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            remote: RemoteConfig {
                feedback_url,
                prediction_url,
                request_timeout_secs,
            },
            benchmarks: BenchmarkConfig { csv_path },
            sessions: SessionConfig {
                max_sessions,
                idle_secs,
            },
        })
    }
}

/// `default` when unset, `None` when set to anything but a positive integer.
fn positive_var(name: &str, default: u64) -> Option<u64> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().ok().filter(|value| *value > 0),
        Err(_) => Some(default),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Endpoints for the external feedback and salary-prediction services.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub feedback_url: String,
    pub prediction_url: String,
    pub request_timeout_secs: u64,
}

impl RemoteConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Optional override for the reference salary benchmarks.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkConfig {
    pub csv_path: Option<PathBuf>,
}

/// Bounds on the in-memory session registry.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub max_sessions: usize,
    pub idle_secs: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidSessionLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => write!(
                f,
                "CLARITY_REQUEST_TIMEOUT_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidSessionLimit => write!(
                f,
                "CLARITY_MAX_SESSIONS and CLARITY_SESSION_IDLE_SECS must be positive integers"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout
            | ConfigError::InvalidSessionLimit => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
