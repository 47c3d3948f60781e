//! Provider-agnostic trait definitions for cloud inventory and metrics
//!
//! These traits are the seam between report orchestration and the AWS SDK:
//! reports only see inventory summaries and metric series, so tests can
//! substitute deterministic in-memory fakes for live clients. The AWS
//! implementations live in `providers::aws`.

use crate::error::Result;
use crate::metrics::{LookbackWindow, MetricQuery};
use async_trait::async_trait;

/// Resource identifier (instance ID, volume ID, etc.)
pub type ResourceId = String;

/// A running virtual machine in the provider's inventory.
#[derive(Debug, Clone)]
pub struct ComputeInstance {
    pub id: ResourceId,
    pub instance_type: String,
    /// Display name, from the `Name` tag when present.
    pub name: Option<String>,
}

/// A managed database server in the provider's inventory.
#[derive(Debug, Clone)]
pub struct DbInstance {
    pub id: ResourceId,
    pub instance_class: String,
    /// Provisioned storage in GiB.
    pub allocated_storage_gib: i32,
}

/// A block storage volume.
#[derive(Debug, Clone)]
pub struct VolumeSummary {
    pub id: ResourceId,
    /// Provider state string: "available", "in-use", ...
    pub state: String,
    pub size_gib: Option<i32>,
}

/// A storage snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotSummary {
    pub id: ResourceId,
    /// Volume the snapshot was taken from. The provider may keep the id
    /// after the volume is deleted, or reuse it for an unrelated volume.
    pub source_volume_id: Option<ResourceId>,
}

/// An allocated public address.
#[derive(Debug, Clone)]
pub struct AddressSummary {
    pub public_ip: String,
    pub instance_id: Option<ResourceId>,
    pub network_interface_id: Option<ResourceId>,
}

/// Compute-side inventory: instances, volumes, snapshots, addresses.
#[async_trait]
pub trait ComputeInventory: Send + Sync {
    /// List instances currently in the running state.
    async fn running_instances(&self) -> Result<Vec<ComputeInstance>>;

    /// List volumes, optionally filtered by state ("available", "in-use").
    async fn volumes(&self, state_filter: Option<&str>) -> Result<Vec<VolumeSummary>>;

    /// List snapshots owned by the calling account.
    async fn owned_snapshots(&self) -> Result<Vec<SnapshotSummary>>;

    /// List allocated public addresses.
    async fn addresses(&self) -> Result<Vec<AddressSummary>>;
}

/// Database-side inventory.
#[async_trait]
pub trait DatabaseInventory: Send + Sync {
    async fn db_instances(&self) -> Result<Vec<DbInstance>>;
}

/// A source of aggregated metric series.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fetch one metric series over the window, samples sorted by timestamp
    /// ascending. An empty series is a valid response, not an error.
    async fn metric_series(&self, query: &MetricQuery, window: &LookbackWindow)
        -> Result<Vec<f64>>;
}
