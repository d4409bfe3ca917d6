use clap::Parser;
use tracing::debug;

use opswatch::cli::DiskMonitorCli;
use opswatch::config::MonitorConfig;
use opswatch::disk::check_and_alert;
use opswatch::logging;
use opswatch::mail::SmtpAlertTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment alone may carry the settings.
    let dotenv = dotenvy::dotenv();

    let cli = DiskMonitorCli::parse();
    logging::init(cli.verbose);
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let config = MonitorConfig::from(&cli);
    let transport = SmtpAlertTransport::new(config.smtp.clone());
    check_and_alert(&config, &transport).await?;

    Ok(())
}
