use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::roster::domain::{SeasonWindow, SeasonWindowError};
use crate::workflows::roster::engine::{
    PreferredDayPolicy, SchedulingPolicy, DEFAULT_MONTHLY_CAP, DEFAULT_SHUFFLE_SEED,
};

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
    pub scheduling: SchedulingPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ROSTER_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("ROSTER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("ROSTER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scheduling: load_scheduling_policy()?,
        })
    }
}

fn load_scheduling_policy() -> Result<SchedulingPolicy, ConfigError> {
    let default_monthly_cap = match env::var("ROSTER_DEFAULT_MONTHLY_CAP") {
        Ok(value) => match value.trim().parse::<u8>() {
            Ok(cap) if cap > 0 => cap,
            _ => return Err(ConfigError::InvalidMonthlyCap),
        },
        Err(_) => DEFAULT_MONTHLY_CAP,
    };

    let shuffle_seed = match env::var("ROSTER_SHUFFLE_SEED") {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidShuffleSeed)?,
        Err(_) => DEFAULT_SHUFFLE_SEED,
    };

    let preferred_day_policy =
        match env::var("ROSTER_PREFERRED_DAY_POLICY") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "hard" => PreferredDayPolicy::Hard,
                "soft" => PreferredDayPolicy::Soft,
                _ => return Err(ConfigError::InvalidPreferredDayPolicy { value }),
            },
            Err(_) => PreferredDayPolicy::Hard,
        };

    let season = load_season()?;

    Ok(SchedulingPolicy {
        default_monthly_cap,
        preferred_day_policy,
        shuffle_seed,
        season,
    })
}

fn load_season() -> Result<Option<SeasonWindow>, ConfigError> {
    let start = env::var("ROSTER_SEASON_START").ok();
    let end = env::var("ROSTER_SEASON_END").ok();

    match (start, end) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let (start_month, start_day) = parse_month_day(&start)?;
            let (end_month, end_day) = parse_month_day(&end)?;
            let window = SeasonWindow::new(start_month, start_day, end_month, end_day)
                .map_err(|source| ConfigError::InvalidSeason { source })?;
            Ok(Some(window))
        }
        _ => Err(ConfigError::PartialSeason),
    }
}

fn parse_month_day(value: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidSeasonBound {
        value: value.to_string(),
    };

    let (month, day) = value.trim().split_once('-').ok_or_else(|| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    let day = day.parse::<u32>().map_err(|_| invalid())?;
    Ok((month, day))
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMonthlyCap,
    InvalidShuffleSeed,
    InvalidPreferredDayPolicy { value: String },
    PartialSeason,
    InvalidSeasonBound { value: String },
    InvalidSeason { source: SeasonWindowError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "ROSTER_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "ROSTER_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMonthlyCap => {
                write!(f, "ROSTER_DEFAULT_MONTHLY_CAP must be a positive integer")
            }
            ConfigError::InvalidShuffleSeed => {
                write!(f, "ROSTER_SHUFFLE_SEED must be an unsigned integer")
            }
            ConfigError::InvalidPreferredDayPolicy { value } => {
                write!(
                    f,
                    "ROSTER_PREFERRED_DAY_POLICY must be 'hard' or 'soft', got '{}'",
                    value
                )
            }
            ConfigError::PartialSeason => {
                write!(
                    f,
                    "ROSTER_SEASON_START and ROSTER_SEASON_END must be set together"
                )
            }
            ConfigError::InvalidSeasonBound { value } => {
                write!(f, "season bound '{}' must use the MM-DD form", value)
            }
            ConfigError::InvalidSeason { source } => {
                write!(f, "season bounds rejected: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidSeason { source } => Some(source),
            _ => None,
        }
    }
}
