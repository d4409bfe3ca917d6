use clap::Parser;

use opswatch::cli::AutoStopCli;
use opswatch::compute::{Ec2Compute, find_tagged_running_instances, stop_instances};
use opswatch::config::StopperConfig;
use opswatch::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = AutoStopCli::parse();
    logging::init(cli.verbose);

    let config = StopperConfig::from(&cli);
    let backend = Ec2Compute::connect(&config.region).await;

    let ids = find_tagged_running_instances(&backend).await;
    stop_instances(&backend, &ids).await;

    Ok(())
}
