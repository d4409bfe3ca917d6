//! In-memory backends and a log capture writer for unit tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::compute::ComputeBackend;
use crate::config::{DEFAULT_SMTP_PORT, MonitorConfig, SMTP_TIMEOUT, SmtpConfig};
use crate::error::BackendError;
use crate::logs::LogBackend;
use crate::mail::AlertTransport;
use crate::types::{AlertMessage, InstanceFilter, LogEvent, LogStreamRef, Reservation, TimeWindow};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `fut` with a thread-local subscriber and return its output alongside the log text.
pub async fn capture_logs<F: Future>(fut: F) -> (F::Output, String) {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::INFO)
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    let output = fut.await;
    drop(guard);

    let bytes = sink.0.lock().unwrap().clone();
    (output, String::from_utf8(bytes).unwrap())
}

#[derive(Default)]
pub struct FakeLogs {
    streams: Vec<String>,
    events: HashMap<String, Vec<String>>,
    failing_streams: HashSet<String>,
    fail_describe: bool,
    filter_calls: Mutex<Vec<String>>,
    last_window: Mutex<Option<TimeWindow>>,
}

impl FakeLogs {
    pub fn with_streams(names: &[&str]) -> Self {
        Self {
            streams: names.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_describe() -> Self {
        Self {
            fail_describe: true,
            ..Default::default()
        }
    }

    pub fn event(mut self, stream: &str, message: &str) -> Self {
        self.events
            .entry(stream.to_string())
            .or_default()
            .push(message.to_string());
        self
    }

    pub fn fail_stream(mut self, stream: &str) -> Self {
        self.failing_streams.insert(stream.to_string());
        self
    }

    pub fn filter_calls(&self) -> Vec<String> {
        self.filter_calls.lock().unwrap().clone()
    }

    pub fn last_window(&self) -> Option<TimeWindow> {
        *self.last_window.lock().unwrap()
    }
}

#[async_trait]
impl LogBackend for FakeLogs {
    async fn describe_log_streams(
        &self,
        log_group: &str,
        _limit: i32,
    ) -> Result<Vec<LogStreamRef>, BackendError> {
        if self.fail_describe {
            return Err(BackendError::Logs("ResourceNotFoundException".to_string()));
        }
        // Ignores the limit so callers' truncation is exercised.
        Ok(self
            .streams
            .iter()
            .map(|name| LogStreamRef {
                log_group: log_group.to_string(),
                name: name.clone(),
            })
            .collect())
    }

    async fn filter_log_events(
        &self,
        _log_group: &str,
        stream: &str,
        pattern: &str,
        window: TimeWindow,
    ) -> Result<Vec<LogEvent>, BackendError> {
        self.filter_calls.lock().unwrap().push(stream.to_string());
        *self.last_window.lock().unwrap() = Some(window);

        if self.failing_streams.contains(stream) {
            return Err(BackendError::Logs(format!("throttled on {}", stream)));
        }
        Ok(self
            .events
            .get(stream)
            .into_iter()
            .flatten()
            .filter(|message| message.contains(pattern))
            .map(|message| LogEvent::new(stream, message, Some(window.end_ms)))
            .collect())
    }
}

#[derive(Default)]
pub struct FakeCompute {
    reservations: Vec<Reservation>,
    fail_describe: bool,
    fail_stop: bool,
    described: Mutex<Vec<Vec<InstanceFilter>>>,
    stopped: Mutex<Vec<Vec<String>>>,
}

impl FakeCompute {
    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        Self {
            reservations,
            ..Default::default()
        }
    }

    pub fn failing_describe() -> Self {
        Self {
            fail_describe: true,
            ..Default::default()
        }
    }

    pub fn failing_stop() -> Self {
        Self {
            fail_stop: true,
            ..Default::default()
        }
    }

    pub fn described_filters(&self) -> Vec<Vec<InstanceFilter>> {
        self.described.lock().unwrap().clone()
    }

    pub fn stop_calls(&self) -> Vec<Vec<String>> {
        self.stopped.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComputeBackend for FakeCompute {
    async fn describe_instances(
        &self,
        filters: &[InstanceFilter],
    ) -> Result<Vec<Reservation>, BackendError> {
        self.described.lock().unwrap().push(filters.to_vec());
        if self.fail_describe {
            return Err(BackendError::Compute("UnauthorizedOperation".to_string()));
        }
        Ok(self.reservations.clone())
    }

    async fn stop_instances(&self, ids: &[String]) -> Result<(), BackendError> {
        self.stopped.lock().unwrap().push(ids.to_vec());
        if self.fail_stop {
            return Err(BackendError::Compute("IncorrectInstanceState".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeMailer {
    fail: bool,
    attempts: Mutex<Vec<AlertMessage>>,
}

impl FakeMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Messages the fake accepted.
    pub fn sent(&self) -> Vec<AlertMessage> {
        if self.fail {
            return Vec::new();
        }
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl AlertTransport for FakeMailer {
    async fn send(&self, message: &AlertMessage) -> Result<(), BackendError> {
        self.attempts.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(BackendError::Smtp("connection refused".to_string()));
        }
        Ok(())
    }
}

pub fn monitor_config(threshold: f64) -> MonitorConfig {
    MonitorConfig {
        threshold,
        path: PathBuf::from("/"),
        from: "devops@example.com".to_string(),
        to: "admin@example.com".to_string(),
        smtp: SmtpConfig {
            server: "localhost".to_string(),
            port: DEFAULT_SMTP_PORT,
            credentials: None,
            timeout: SMTP_TIMEOUT,
        },
    }
}
