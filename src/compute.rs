use async_trait::async_trait;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::Filter;
use tracing::{error, info};

use crate::error::BackendError;
use crate::types::{InstanceFilter, InstanceRef, Reservation};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const AUTO_STOP_TAG: &str = "tag:AutoStop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    NothingToStop,
    Issued,
    Failed,
}

#[async_trait]
pub trait ComputeBackend: Send + Sync {
    async fn describe_instances(
        &self,
        filters: &[InstanceFilter],
    ) -> Result<Vec<Reservation>, BackendError>;

    async fn stop_instances(&self, ids: &[String]) -> Result<(), BackendError>;
}

pub struct Ec2Compute {
    client: Client,
}

impl Ec2Compute {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn connect(region: &str) -> Self {
        let config = crate::aws::load_config(region).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl ComputeBackend for Ec2Compute {
    async fn describe_instances(
        &self,
        filters: &[InstanceFilter],
    ) -> Result<Vec<Reservation>, BackendError> {
        let sdk_filters = filters
            .iter()
            .map(|f| {
                Filter::builder()
                    .name(&f.name)
                    .set_values(Some(f.values.clone()))
                    .build()
            })
            .collect();

        let resp = self
            .client
            .describe_instances()
            .set_filters(Some(sdk_filters))
            .send()
            .await
            .map_err(|e| BackendError::Compute(DisplayErrorContext(&e).to_string()))?;

        Ok(resp
            .reservations()
            .iter()
            .map(|res| Reservation {
                instances: res
                    .instances()
                    .iter()
                    .filter_map(|inst| inst.instance_id())
                    .map(|id| InstanceRef { id: id.to_string() })
                    .collect(),
            })
            .collect())
    }

    async fn stop_instances(&self, ids: &[String]) -> Result<(), BackendError> {
        self.client
            .stop_instances()
            .set_instance_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|e| BackendError::Compute(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// `AutoStop=true` and currently running.
pub fn auto_stop_filters() -> Vec<InstanceFilter> {
    vec![
        InstanceFilter::new(AUTO_STOP_TAG, "true"),
        InstanceFilter::new("instance-state-name", "running"),
    ]
}

pub fn flatten_instance_ids(reservations: Vec<Reservation>) -> Vec<String> {
    reservations
        .into_iter()
        .flat_map(|res| res.instances)
        .map(|inst| inst.id)
        .collect()
}

pub async fn find_tagged_running_instances<B>(backend: &B) -> Vec<String>
where
    B: ComputeBackend + ?Sized,
{
    match backend.describe_instances(&auto_stop_filters()).await {
        Ok(reservations) => flatten_instance_ids(reservations),
        Err(e) => {
            error!("Failed to describe instances: {}", e);
            Vec::new()
        }
    }
}

/// Issue a single stop call for the whole batch. An empty batch is a no-op.
pub async fn stop_instances<B>(backend: &B, ids: &[String]) -> StopOutcome
where
    B: ComputeBackend + ?Sized,
{
    if ids.is_empty() {
        info!("No instances to stop.");
        return StopOutcome::NothingToStop;
    }

    info!("Stopping instances: {:?}", ids);
    match backend.stop_instances(ids).await {
        Ok(()) => {
            info!("Stop command issued successfully.");
            StopOutcome::Issued
        }
        Err(e) => {
            error!("Failed to stop instances: {}", e);
            StopOutcome::Failed
        }
    }
}
