use std::path::PathBuf;
use std::time::Duration;

use tracing::error;

use crate::cli::{AutoStopCli, DiskMonitorCli, ScanLogsCli};

pub const DEFAULT_THRESHOLD: f64 = 80.0;
pub const DEFAULT_SMTP_PORT: u16 = 25;
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    pub log_group: String,
    pub region: String,
    pub pattern: String,
    pub lookback_minutes: u32,
    pub limit: i32,
}

impl From<&ScanLogsCli> for ScannerConfig {
    fn from(cli: &ScanLogsCli) -> Self {
        Self {
            log_group: cli.log_group.clone(),
            region: cli.region.clone(),
            pattern: cli.pattern.clone(),
            lookback_minutes: cli.lookback_minutes,
            limit: cli.limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    /// Present only when both username and password are set and non-empty.
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub threshold: f64,
    pub path: PathBuf,
    pub from: String,
    pub to: String,
    pub smtp: SmtpConfig,
}

impl From<&DiskMonitorCli> for MonitorConfig {
    fn from(cli: &DiskMonitorCli) -> Self {
        let credentials = match (non_empty(&cli.smtp_username), non_empty(&cli.smtp_password)) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => None,
        };

        Self {
            threshold: parse_threshold(&cli.threshold),
            path: PathBuf::from(&cli.path),
            from: cli.from.clone(),
            to: cli.to.clone(),
            smtp: SmtpConfig {
                server: cli.smtp_server.clone(),
                port: parse_port(&cli.smtp_port),
                credentials,
                timeout: SMTP_TIMEOUT,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopperConfig {
    pub region: String,
}

impl From<&AutoStopCli> for StopperConfig {
    fn from(cli: &AutoStopCli) -> Self {
        Self {
            region: cli.region.clone(),
        }
    }
}

/// Parse a percentage threshold, falling back to the default on garbage.
pub fn parse_threshold(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => {
            error!("Invalid threshold value. Using default: 80");
            DEFAULT_THRESHOLD
        }
    }
}

pub fn parse_port(raw: &str) -> u16 {
    raw.trim().parse::<u16>().unwrap_or_else(|_| {
        error!(
            "Invalid SMTP port '{}'. Using default: {}",
            raw, DEFAULT_SMTP_PORT
        );
        DEFAULT_SMTP_PORT
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
