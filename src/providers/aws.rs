//! AWS implementations of the capability traits
//!
//! Thin wrappers over the SDK clients: each call maps one inventory or
//! metrics API onto the provider-agnostic summaries. No retry or pagination
//! handling; a failed call propagates and aborts the run.

use crate::error::{CostctlError, Result};
use crate::metrics::{LookbackWindow, MetricQuery, MetricUnit, Statistic};
use crate::provider::{
    AddressSummary, ComputeInstance, ComputeInventory, DatabaseInventory, DbInstance,
    MetricSource, SnapshotSummary, VolumeSummary,
};
use async_trait::async_trait;
use aws_sdk_cloudwatch::primitives::DateTime as SdkDateTime;
use aws_sdk_cloudwatch::types::{Datapoint, Dimension};
use aws_sdk_ec2::types::Filter;
use tracing::debug;

/// EC2-backed compute inventory.
pub struct AwsCompute {
    client: aws_sdk_ec2::Client,
}

impl AwsCompute {
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ComputeInventory for AwsCompute {
    async fn running_instances(&self) -> Result<Vec<ComputeInstance>> {
        let response = self
            .client
            .describe_instances()
            .filters(
                Filter::builder()
                    .name("instance-state-name")
                    .values("running")
                    .build(),
            )
            .send()
            .await
            .map_err(|e| CostctlError::Aws(format!("Failed to list EC2 instances: {}", e)))?;

        let mut instances = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                if let Some(id) = instance.instance_id() {
                    let instance_type = instance
                        .instance_type()
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_else(|| "unknown".to_string());
                    let name = instance
                        .tags()
                        .iter()
                        .find(|t| t.key() == Some("Name"))
                        .and_then(|t| t.value())
                        .map(str::to_string);

                    instances.push(ComputeInstance {
                        id: id.to_string(),
                        instance_type,
                        name,
                    });
                }
            }
        }
        debug!("Listed {} running EC2 instances", instances.len());
        Ok(instances)
    }

    async fn volumes(&self, state_filter: Option<&str>) -> Result<Vec<VolumeSummary>> {
        let mut request = self.client.describe_volumes();
        if let Some(state) = state_filter {
            request = request.filters(Filter::builder().name("status").values(state).build());
        }
        let response = request
            .send()
            .await
            .map_err(|e| CostctlError::Aws(format!("Failed to list EBS volumes: {}", e)))?;

        Ok(response
            .volumes()
            .iter()
            .map(|v| VolumeSummary {
                id: v.volume_id().unwrap_or("unknown").to_string(),
                state: v
                    .state()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                size_gib: v.size(),
            })
            .collect())
    }

    async fn owned_snapshots(&self) -> Result<Vec<SnapshotSummary>> {
        let response = self
            .client
            .describe_snapshots()
            .owner_ids("self")
            .send()
            .await
            .map_err(|e| CostctlError::Aws(format!("Failed to list snapshots: {}", e)))?;

        Ok(response
            .snapshots()
            .iter()
            .map(|s| SnapshotSummary {
                id: s.snapshot_id().unwrap_or("unknown").to_string(),
                source_volume_id: s.volume_id().map(str::to_string),
            })
            .collect())
    }

    async fn addresses(&self) -> Result<Vec<AddressSummary>> {
        let response = self
            .client
            .describe_addresses()
            .send()
            .await
            .map_err(|e| CostctlError::Aws(format!("Failed to list Elastic IPs: {}", e)))?;

        Ok(response
            .addresses()
            .iter()
            .map(|a| AddressSummary {
                public_ip: a.public_ip().unwrap_or("unknown").to_string(),
                instance_id: a.instance_id().map(str::to_string),
                network_interface_id: a.network_interface_id().map(str::to_string),
            })
            .collect())
    }
}

/// RDS-backed database inventory.
pub struct AwsDatabase {
    client: aws_sdk_rds::Client,
}

impl AwsDatabase {
    pub fn new(client: aws_sdk_rds::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DatabaseInventory for AwsDatabase {
    async fn db_instances(&self) -> Result<Vec<DbInstance>> {
        let response = self
            .client
            .describe_db_instances()
            .send()
            .await
            .map_err(|e| CostctlError::Rds(format!("Failed to list RDS instances: {}", e)))?;

        let mut databases = Vec::new();
        for db in response.db_instances() {
            if let Some(id) = db.db_instance_identifier() {
                databases.push(DbInstance {
                    id: id.to_string(),
                    instance_class: db.db_instance_class().unwrap_or("unknown").to_string(),
                    allocated_storage_gib: db.allocated_storage().unwrap_or(0),
                });
            }
        }
        debug!("Listed {} RDS instances", databases.len());
        Ok(databases)
    }
}

/// CloudWatch-backed metric source.
pub struct CloudWatchMetrics {
    client: aws_sdk_cloudwatch::Client,
}

impl CloudWatchMetrics {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricSource for CloudWatchMetrics {
    async fn metric_series(
        &self,
        query: &MetricQuery,
        window: &LookbackWindow,
    ) -> Result<Vec<f64>> {
        // Dimension requires both name and value; the builder enforces that.
        let dimension = Dimension::builder()
            .name(&query.dimension_name)
            .value(&query.resource_id)
            .build()
            .map_err(|e| CostctlError::CloudWatch(format!("Invalid metric dimension: {}", e)))?;

        let mut request = self
            .client
            .get_metric_statistics()
            .namespace(&query.namespace)
            .metric_name(&query.metric_name)
            .dimensions(dimension)
            .start_time(SdkDateTime::from_secs(window.start.timestamp()))
            .end_time(SdkDateTime::from_secs(window.end.timestamp()))
            .period(LookbackWindow::PERIOD_SECS)
            .statistics(to_sdk_statistic(query.statistic));
        if let Some(unit) = query.unit {
            request = request.unit(to_sdk_unit(unit));
        }

        let response = request.send().await.map_err(|e| {
            CostctlError::CloudWatch(format!(
                "Failed to fetch {} for {}: {}",
                query.metric_name, query.resource_id, e
            ))
        })?;

        let mut points: Vec<(i64, f64)> = response
            .datapoints()
            .iter()
            .filter_map(|dp| {
                let ts = dp.timestamp()?.secs();
                let value = statistic_value(dp, query.statistic)?;
                Some((ts, value))
            })
            .collect();
        points.sort_by_key(|(ts, _)| *ts);

        debug!(
            "{} datapoints of {} for {}",
            points.len(),
            query.metric_name,
            query.resource_id
        );
        Ok(points.into_iter().map(|(_, value)| value).collect())
    }
}

fn to_sdk_statistic(statistic: Statistic) -> aws_sdk_cloudwatch::types::Statistic {
    use aws_sdk_cloudwatch::types::Statistic as Sdk;
    match statistic {
        Statistic::Average => Sdk::Average,
        Statistic::Sum => Sdk::Sum,
        Statistic::Minimum => Sdk::Minimum,
        Statistic::Maximum => Sdk::Maximum,
    }
}

fn to_sdk_unit(unit: MetricUnit) -> aws_sdk_cloudwatch::types::StandardUnit {
    use aws_sdk_cloudwatch::types::StandardUnit as Sdk;
    match unit {
        MetricUnit::Percent => Sdk::Percent,
        MetricUnit::Bytes => Sdk::Bytes,
        MetricUnit::Count => Sdk::Count,
    }
}

fn statistic_value(dp: &Datapoint, statistic: Statistic) -> Option<f64> {
    match statistic {
        Statistic::Average => dp.average(),
        Statistic::Sum => dp.sum(),
        Statistic::Minimum => dp.minimum(),
        Statistic::Maximum => dp.maximum(),
    }
}
