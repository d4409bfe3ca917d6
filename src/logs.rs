//! Scanning recent CloudWatch log streams for a filter pattern.

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::Client;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::types::OrderBy;
use tracing::{debug, error, warn};

use crate::error::BackendError;
use crate::types::{LogEvent, LogStreamRef, TimeWindow};

pub const DEFAULT_STREAM_LIMIT: i32 = 5;
pub const DEFAULT_LOOKBACK_MINUTES: u32 = 60;

/// The two log queries the scanner needs.
#[async_trait]
pub trait LogBackend: Send + Sync {
    /// Streams ordered by last event time, newest first.
    async fn describe_log_streams(
        &self,
        log_group: &str,
        limit: i32,
    ) -> Result<Vec<LogStreamRef>, BackendError>;

    async fn filter_log_events(
        &self,
        log_group: &str,
        stream: &str,
        pattern: &str,
        window: TimeWindow,
    ) -> Result<Vec<LogEvent>, BackendError>;
}

pub struct CloudWatchLogs {
    client: Client,
}

impl CloudWatchLogs {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn connect(region: &str) -> Self {
        let config = crate::aws::load_config(region).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl LogBackend for CloudWatchLogs {
    async fn describe_log_streams(
        &self,
        log_group: &str,
        limit: i32,
    ) -> Result<Vec<LogStreamRef>, BackendError> {
        let resp = self
            .client
            .describe_log_streams()
            .log_group_name(log_group)
            .order_by(OrderBy::LastEventTime)
            .descending(true)
            .limit(limit)
            .send()
            .await
            .map_err(|e| BackendError::Logs(DisplayErrorContext(&e).to_string()))?;

        Ok(resp
            .log_streams()
            .iter()
            .filter_map(|s| s.log_stream_name())
            .map(|name| LogStreamRef {
                log_group: log_group.to_string(),
                name: name.to_string(),
            })
            .collect())
    }

    async fn filter_log_events(
        &self,
        log_group: &str,
        stream: &str,
        pattern: &str,
        window: TimeWindow,
    ) -> Result<Vec<LogEvent>, BackendError> {
        let resp = self
            .client
            .filter_log_events()
            .log_group_name(log_group)
            .log_stream_names(stream)
            .start_time(window.start_ms)
            .end_time(window.end_ms)
            .filter_pattern(pattern)
            .send()
            .await
            .map_err(|e| BackendError::Logs(DisplayErrorContext(&e).to_string()))?;

        Ok(resp
            .events()
            .iter()
            .map(|event| {
                LogEvent::new(
                    event.log_stream_name().unwrap_or(stream),
                    event.message().unwrap_or_default(),
                    event.timestamp(),
                )
            })
            .collect())
    }
}

/// Names of the `limit` most recently active streams. Empty on any backend error.
pub async fn list_recent_streams<B>(backend: &B, log_group: &str, limit: i32) -> Vec<String>
where
    B: LogBackend + ?Sized,
{
    match backend.describe_log_streams(log_group, limit).await {
        Ok(streams) => streams
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|s| s.name)
            .collect(),
        Err(e) => {
            error!("Error fetching log streams: {}", e);
            Vec::new()
        }
    }
}

/// Scan each stream for `pattern` over the trailing `lookback_minutes`.
pub async fn scan_pattern<B>(
    backend: &B,
    log_group: &str,
    streams: &[String],
    pattern: &str,
    lookback_minutes: u32,
) -> Vec<LogEvent>
where
    B: LogBackend + ?Sized,
{
    let window = TimeWindow::trailing_from_now(lookback_minutes);
    scan_window(backend, log_group, streams, pattern, window).await
}

/// One request per stream; a failing stream is logged and skipped.
pub async fn scan_window<B>(
    backend: &B,
    log_group: &str,
    streams: &[String],
    pattern: &str,
    window: TimeWindow,
) -> Vec<LogEvent>
where
    B: LogBackend + ?Sized,
{
    let mut matches = Vec::new();

    for stream in streams {
        debug!(
            "Filtering {} in [{}, {}] for '{}'",
            stream, window.start_ms, window.end_ms, pattern
        );
        match backend
            .filter_log_events(log_group, stream, pattern, window)
            .await
        {
            Ok(events) => {
                for event in events {
                    warn!("[{}] {}", stream, event.message);
                    matches.push(event);
                }
            }
            Err(e) => {
                error!("Error scanning log stream {}: {}", stream, e);
            }
        }
    }

    matches
}
