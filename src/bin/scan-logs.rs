use clap::Parser;
use tracing::info;

use opswatch::cli::ScanLogsCli;
use opswatch::config::ScannerConfig;
use opswatch::logging;
use opswatch::logs::{CloudWatchLogs, list_recent_streams, scan_pattern};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ScanLogsCli::parse();
    logging::init(cli.verbose);

    let config = ScannerConfig::from(&cli);
    let backend = CloudWatchLogs::connect(&config.region).await;

    let streams = list_recent_streams(&backend, &config.log_group, config.limit).await;
    if streams.is_empty() {
        info!("No recent log streams found.");
        return Ok(());
    }

    scan_pattern(
        &backend,
        &config.log_group,
        &streams,
        &config.pattern,
        config.lookback_minutes,
    )
    .await;

    Ok(())
}
