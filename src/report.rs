//! Advisory report orchestration and printing
//!
//! Gather functions pull inventory through the capability traits, average
//! each metric series, and classify — returning row structs that the
//! printing layer renders. Everything runs sequentially: each inventory
//! call and metric fetch completes before the next begins, and a failure
//! aborts the run leaving whatever was already printed on screen (the
//! `Report complete.` trailer only appears on a full run).

use console::style;
use tracing::info;

use crate::audit;
use crate::classify::{classify_compute, classify_database, Assessment, ComputeUsage, DbUsage};
use crate::config::Config;
use crate::error::Result;
use crate::metrics::{average_or_zero, LookbackWindow, MetricQuery, MetricUnit};
use crate::provider::{
    AddressSummary, ComputeInstance, ComputeInventory, DatabaseInventory, DbInstance,
    MetricSource, SnapshotSummary, VolumeSummary,
};
use crate::utils::{bytes_to_gib, gib_to_bytes};

/// One assessed compute instance.
#[derive(Debug, Clone)]
pub struct ComputeReportRow {
    pub instance: ComputeInstance,
    pub usage: ComputeUsage,
    pub assessment: Assessment,
}

/// One assessed database instance.
#[derive(Debug, Clone)]
pub struct DatabaseReportRow {
    pub database: DbInstance,
    pub usage: DbUsage,
    pub assessment: Assessment,
}

/// Orphaned-resource listings for the audit section.
#[derive(Debug, Clone)]
pub struct UnusedResources {
    pub unattached_volumes: Vec<VolumeSummary>,
    pub unused_snapshots: Vec<SnapshotSummary>,
    pub unassociated_addresses: Vec<AddressSummary>,
}

/// Fetch, average, and classify every running compute instance.
pub async fn assess_compute(
    inventory: &dyn ComputeInventory,
    metrics: &dyn MetricSource,
    config: &Config,
) -> Result<Vec<ComputeReportRow>> {
    let window = LookbackWindow::days(config.report.lookback_days);
    let instances = inventory.running_instances().await?;
    info!("Assessing {} running compute instances", instances.len());

    let mut rows = Vec::with_capacity(instances.len());
    for instance in instances {
        let cpu = fetch_average(
            metrics,
            MetricQuery::ec2(&instance.id, "CPUUtilization").with_unit(MetricUnit::Percent),
            &window,
        )
        .await?;
        let net_in = fetch_average(
            metrics,
            MetricQuery::ec2(&instance.id, "NetworkIn").with_unit(MetricUnit::Bytes),
            &window,
        )
        .await?;
        let net_out = fetch_average(
            metrics,
            MetricQuery::ec2(&instance.id, "NetworkOut").with_unit(MetricUnit::Bytes),
            &window,
        )
        .await?;
        let disk_read = fetch_average(
            metrics,
            MetricQuery::ec2(&instance.id, "DiskReadOps").with_unit(MetricUnit::Count),
            &window,
        )
        .await?;
        let disk_write = fetch_average(
            metrics,
            MetricQuery::ec2(&instance.id, "DiskWriteOps").with_unit(MetricUnit::Count),
            &window,
        )
        .await?;

        let usage = ComputeUsage {
            cpu_percent: cpu,
            network_bytes_per_sec: net_in + net_out,
            disk_ops_per_sec: disk_read + disk_write,
        };
        let assessment = classify_compute(&usage, &config.thresholds);
        rows.push(ComputeReportRow {
            instance,
            usage,
            assessment,
        });
    }
    Ok(rows)
}

/// Fetch, average, and classify every database instance.
pub async fn assess_databases(
    inventory: &dyn DatabaseInventory,
    metrics: &dyn MetricSource,
    config: &Config,
) -> Result<Vec<DatabaseReportRow>> {
    let window = LookbackWindow::days(config.report.lookback_days);
    let databases = inventory.db_instances().await?;
    info!("Assessing {} database instances", databases.len());

    let mut rows = Vec::with_capacity(databases.len());
    for database in databases {
        let cpu = fetch_average(
            metrics,
            MetricQuery::rds(&database.id, "CPUUtilization").with_unit(MetricUnit::Percent),
            &window,
        )
        .await?;
        let free_storage = fetch_average(
            metrics,
            MetricQuery::rds(&database.id, "FreeStorageSpace").with_unit(MetricUnit::Bytes),
            &window,
        )
        .await?;

        let usage = DbUsage {
            cpu_percent: cpu,
            free_storage_bytes: free_storage,
        };
        let allocated_bytes = gib_to_bytes(database.allocated_storage_gib);
        let assessment = classify_database(&usage, allocated_bytes, &config.thresholds);
        rows.push(DatabaseReportRow {
            database,
            usage,
            assessment,
        });
    }
    Ok(rows)
}

/// Gather the three orphaned-resource listings.
pub async fn audit_unused(inventory: &dyn ComputeInventory) -> Result<UnusedResources> {
    let available = inventory.volumes(Some("available")).await?;
    let unattached: Vec<VolumeSummary> = audit::unattached_volumes(&available)
        .into_iter()
        .cloned()
        .collect();

    let all_volumes = inventory.volumes(None).await?;
    let in_use = audit::in_use_volume_ids(&all_volumes);
    let snapshots = inventory.owned_snapshots().await?;
    let unused_snapshots: Vec<SnapshotSummary> = audit::unused_snapshots(&snapshots, &in_use)
        .into_iter()
        .cloned()
        .collect();

    let addresses = inventory.addresses().await?;
    let unassociated: Vec<AddressSummary> = audit::unassociated_addresses(&addresses)
        .into_iter()
        .cloned()
        .collect();

    Ok(UnusedResources {
        unattached_volumes: unattached,
        unused_snapshots,
        unassociated_addresses: unassociated,
    })
}

async fn fetch_average(
    metrics: &dyn MetricSource,
    query: MetricQuery,
    window: &LookbackWindow,
) -> Result<f64> {
    let series = metrics.metric_series(&query, window).await?;
    Ok(average_or_zero(&series))
}

/// Run the full advisory report, printing section by section.
pub async fn run(
    config: &Config,
    compute: &dyn ComputeInventory,
    databases: &dyn DatabaseInventory,
    metrics: &dyn MetricSource,
) -> Result<()> {
    config.validate()?;

    print_header("\n📊 AWS Cost Optimization Report");

    print_header("\n🔹 EC2 Instances Rightsizing and Utilization");
    let compute_rows = assess_compute(compute, metrics, config).await?;
    print_compute_rows(&compute_rows);

    print_header("\n🔹 RDS Instances Rightsizing and Utilization");
    let database_rows = assess_databases(databases, metrics, config).await?;
    print_database_rows(&database_rows);

    print_header("🔍 Unused AWS Resources Audit");
    let unused = audit_unused(compute).await?;
    print_unused_resources(&unused);

    println!("\nReport complete.\n");
    Ok(())
}

fn print_header(title: &str) {
    println!("{}", style(title).bold());
    println!("{}", "-".repeat(35));
}

fn print_compute_rows(rows: &[ComputeReportRow]) {
    for row in rows {
        println!(
            "Instance: {} ({})",
            row.instance.id,
            row.instance.name.as_deref().unwrap_or("N/A")
        );
        println!("Type: {}", row.instance.instance_type);
        println!(" - Avg CPU: {:.2}%", row.usage.cpu_percent);
        println!(" - Avg Network: {:.2} Bytes/s", row.usage.network_bytes_per_sec);
        println!(" - Avg Disk Ops: {:.2} ops/s", row.usage.disk_ops_per_sec);
        println!(" → {}\n", row.assessment.label());
    }
}

fn print_database_rows(rows: &[DatabaseReportRow]) {
    for row in rows {
        println!("DB Instance: {}", row.database.id);
        println!("Type: {}", row.database.instance_class);
        println!(" - Avg CPU: {:.2}%", row.usage.cpu_percent);
        println!(
            " - Free Storage: {:.2} GB",
            bytes_to_gib(row.usage.free_storage_bytes)
        );
        println!(
            " - Allocated Storage: {:.2} GB",
            f64::from(row.database.allocated_storage_gib)
        );
        println!(" → {}\n", row.assessment.label());
    }
}

fn print_unused_resources(unused: &UnusedResources) {
    println!(
        "📦 Unattached EBS Volumes: {}",
        unused.unattached_volumes.len()
    );
    for volume in &unused.unattached_volumes {
        match volume.size_gib {
            Some(size) => println!(" - {} ({} GiB)", volume.id, size),
            None => println!(" - {}", volume.id),
        }
    }

    println!("\n📸 Unused Snapshots: {}", unused.unused_snapshots.len());
    for snapshot in &unused.unused_snapshots {
        println!(" - {}", snapshot.id);
    }

    println!(
        "\n🌐 Unassociated Elastic IPs: {}",
        unused.unassociated_addresses.len()
    );
    for address in &unused.unassociated_addresses {
        println!(" - {}", address.public_ip);
    }
}
