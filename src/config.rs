/*
 * Responsibility
 * - Environment variable / settings loading (PORT, CORS, limits, log level)
 * - Startup validation: flat rule checklist producing errors + warnings
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Testing,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(
            &std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        )
    }

    /// Unknown values fall back to development.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    Rejected(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::Rejected(errors) => {
                write!(f, "configuration validation failed:")?;
                for e in errors {
                    write!(f, "\n  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub app_name: String,
    pub version: &'static str,
    pub debug: bool,

    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,

    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let app_name =
            std::env::var("APP_NAME").unwrap_or_else(|_| "demo-api".to_string());

        // Debug defaults on outside production, off in production.
        let debug = std::env::var("DEBUG")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(!app_env.is_production());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let log_level =
            std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            app_name,
            version: env!("CARGO_PKG_VERSION"),
            debug,
            cors_allowed_origins,
            log_level,
            request_body_limit_bytes,
            request_timeout_seconds,
        })
    }

    /// Run the startup checklist. Callers decide what to do with warnings;
    /// errors are meant to abort before the listener binds.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.app_env.is_production() && self.debug {
            report
                .errors
                .push("DEBUG must be disabled in production".to_string());
        }

        if self.app_env.is_development() && !self.debug {
            report
                .warnings
                .push("DEBUG is typically enabled in development".to_string());
        }

        if self.cors_allowed_origins.is_empty() {
            report
                .warnings
                .push("no CORS origins configured".to_string());
        }

        if self.app_env.is_production() {
            for origin in &self.cors_allowed_origins {
                if origin == "*"
                    || origin.contains("localhost")
                    || origin.contains("127.0.0.1")
                {
                    report.errors.push(format!(
                        "production CORS origin '{}' is not secure",
                        origin
                    ));
                }
            }
        }

        if EnvFilter::try_new(&self.log_level).is_err() {
            report.errors.push(format!(
                "LOG_LEVEL '{}' is not a valid filter directive",
                self.log_level
            ));
        } else if self.app_env.is_production()
            && matches!(self.log_level.as_str(), "debug" | "trace")
        {
            report.warnings.push(format!(
                "'{}' log level is not recommended in production",
                self.log_level
            ));
        }

        if self.request_body_limit_bytes == 0 {
            report
                .errors
                .push("REQUEST_BODY_LIMIT_BYTES must be positive".to_string());
        }

        if self.request_timeout_seconds == 0 {
            report
                .errors
                .push("REQUEST_TIMEOUT_SECONDS must be positive".to_string());
        }

        report
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<Vec<String>, ConfigError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ConfigError::Rejected(self.errors))
        }
    }
}
