//! One-shot operational checks: CloudWatch log scanning, disk usage alerting
//! and EC2 auto-stop. Each binary under `src/bin` drives one module.

pub mod aws;
pub mod cli;
pub mod compute;
pub mod config;
pub mod disk;
pub mod error;
pub mod logging;
pub mod logs;
pub mod mail;
#[cfg(test)]
mod testing;
pub mod types;

pub use error::{BackendError, DiskError};
