use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Load shared SDK configuration using the default credential chain.
pub async fn load_config(region: &str) -> SdkConfig {
    debug!("Loading AWS configuration for region {}", region);
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}
