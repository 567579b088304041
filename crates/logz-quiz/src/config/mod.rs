use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_BOOKING_URL: &str = "https://calendly.com/vicente-logztech/45min";

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
    pub mail: MailConfig,
    pub booking_url: String,
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
        let booking_url =
            non_empty_var("BOOKING_URL").unwrap_or_else(|| DEFAULT_BOOKING_URL.to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail: MailConfig::from_env(),
            booking_url,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Raw mail transport settings. Values are kept as read from the environment;
/// [`MailConfig::transport_settings`] validates them when the transport is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailConfig {
    pub host: Option<String>,
    pub port: Option<String>,
    pub secure: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
    pub internal_recipients: Vec<String>,
    pub default_bcc: Vec<String>,
}

impl MailConfig {
    pub fn from_env() -> Self {
        let internal_recipients = non_empty_var("MAIL_TO")
            .map(|raw| parse_address_list(&raw))
            .unwrap_or_default();
        // MAIL_TO doubles as the default BCC; SMTP_BCC only applies when it is absent.
        let default_bcc = env::var("MAIL_TO")
            .or_else(|_| env::var("SMTP_BCC"))
            .map(|raw| parse_address_list(&raw))
            .unwrap_or_default();

        Self {
            host: non_empty_var("SMTP_HOST"),
            port: non_empty_var("SMTP_PORT"),
            secure: parse_boolean(env::var("SMTP_SECURE").ok().as_deref(), false),
            user: non_empty_var("SMTP_USER"),
            password: non_empty_var("SMTP_PASS"),
            from: non_empty_var("MAIL_FROM"),
            internal_recipients,
            default_bcc,
        }
    }

    /// Validate the raw settings into everything needed to open an SMTP session.
    pub fn transport_settings(&self) -> Result<TransportSettings, MailConfigError> {
        let host = self.host.clone().ok_or(MailConfigError::MissingHost)?;
        let port = self
            .port
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u16>().ok())
            .ok_or(MailConfigError::InvalidPort)?;

        let (user, password) = match (&self.user, &self.password) {
            (Some(user), Some(password)) => (user.clone(), password.clone()),
            _ => return Err(MailConfigError::MissingCredentials),
        };

        let from = self
            .from
            .clone()
            .unwrap_or_else(|| format!("Log Z <{user}>"));

        Ok(TransportSettings {
            host,
            port,
            secure: self.secure,
            user,
            password,
            from,
            default_bcc: self.default_bcc.clone(),
        })
    }
}

/// Validated SMTP settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub user: String,
    pub password: String,
    pub from: String,
    pub default_bcc: Vec<String>,
}

/// Split a comma-separated address list, dropping blank entries.
pub fn parse_address_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lenient boolean parsing; unrecognized values yield `fallback`.
pub fn parse_boolean(value: Option<&str>, fallback: bool) -> bool {
    let Some(value) = value else {
        return fallback;
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        _ => fallback,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

/// Mail transport settings that cannot produce a working SMTP session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailConfigError {
    #[error("SMTP_HOST environment variable is required")]
    MissingHost,
    #[error("SMTP_PORT environment variable is required and must be a number")]
    InvalidPort,
    #[error("SMTP_USER and SMTP_PASS environment variables are required")]
    MissingCredentials,
}
