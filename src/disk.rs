//! Filesystem usage sampling and threshold alerting.

use std::path::Path;

use nix::sys::statvfs::statvfs;
use tracing::{error, info, warn};

use crate::config::MonitorConfig;
use crate::error::DiskError;
use crate::mail::AlertTransport;
use crate::types::{AlertMessage, DiskSample};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    WithinLimits,
    Alerted { delivered: bool },
}

/// `used / total` as a percentage, or `None` for a zero-sized filesystem.
pub fn usage_percent(total: u64, used: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(used as f64 / total as f64 * 100.0)
}

/// Sample the filesystem containing `path`, counting used space the way `df` does.
pub fn sample_usage(path: &Path) -> Result<DiskSample, DiskError> {
    let stat = statvfs(path).map_err(|source| DiskError::Statvfs {
        path: path.to_path_buf(),
        source,
    })?;

    let fragment = stat.fragment_size() as u64;
    let total = stat.blocks() as u64 * fragment;
    let used = (stat.blocks() as u64).saturating_sub(stat.blocks_free() as u64) * fragment;
    let percent =
        usage_percent(total, used).ok_or_else(|| DiskError::EmptyFilesystem(path.to_path_buf()))?;

    Ok(DiskSample {
        path: path.to_path_buf(),
        total_bytes: total,
        used_bytes: used,
        percent,
    })
}

/// Send a usage alert. Transport failures are logged and swallowed.
pub async fn send_alert<T>(transport: &T, usage: f64, from: &str, to: &str) -> bool
where
    T: AlertTransport + ?Sized,
{
    let message = AlertMessage::disk_usage(usage, from, to);
    match transport.send(&message).await {
        Ok(()) => {
            warn!("Disk usage alert sent: {:.2}%", usage);
            true
        }
        Err(e) => {
            error!("Failed to send alert email: {}", e);
            false
        }
    }
}

pub async fn evaluate<T>(usage: f64, config: &MonitorConfig, transport: &T) -> Verdict
where
    T: AlertTransport + ?Sized,
{
    info!(
        "Disk usage at {:.2}% (threshold: {}%)",
        usage, config.threshold
    );

    if usage > config.threshold {
        let delivered = send_alert(transport, usage, &config.from, &config.to).await;
        Verdict::Alerted { delivered }
    } else {
        info!("Disk usage within safe limits.");
        Verdict::WithinLimits
    }
}

pub async fn check_and_alert<T>(config: &MonitorConfig, transport: &T) -> Result<Verdict, DiskError>
where
    T: AlertTransport + ?Sized,
{
    let sample = sample_usage(&config.path)?;
    Ok(evaluate(sample.percent, config, transport).await)
}
