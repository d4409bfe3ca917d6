use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStreamRef {
    pub log_group: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub stream: String,
    pub message: String,
    pub timestamp: Option<i64>,
}

impl LogEvent {
    /// Build an event, trimming surrounding whitespace from the message.
    pub fn new(stream: impl Into<String>, message: &str, timestamp: Option<i64>) -> Self {
        Self {
            stream: stream.into(),
            message: message.trim().to_string(),
            timestamp,
        }
    }
}

/// Inclusive time range in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeWindow {
    pub fn trailing(now_ms: i64, lookback_minutes: u32) -> Self {
        Self {
            start_ms: now_ms - i64::from(lookback_minutes) * 60 * 1000,
            end_ms: now_ms,
        }
    }

    pub fn trailing_from_now(lookback_minutes: u32) -> Self {
        Self::trailing(chrono::Utc::now().timestamp_millis(), lookback_minutes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskSample {
    pub path: PathBuf,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
}

impl AlertMessage {
    pub const DISK_SUBJECT: &'static str = "🚨 Disk Space Alert";

    pub fn disk_usage(usage: f64, from: &str, to: &str) -> Self {
        Self {
            subject: Self::DISK_SUBJECT.to_string(),
            body: format!("Disk usage is critically high: {:.2}%", usage),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceFilter {
    pub name: String,
    pub values: Vec<String>,
}

impl InstanceFilter {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            values: vec![value.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reservation {
    pub instances: Vec<InstanceRef>,
}
