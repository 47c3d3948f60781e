//! Utilization classification
//!
//! Pure functions from averaged metrics and static thresholds to an
//! [`Assessment`]. No resource's status depends on any other resource, so
//! everything here is synchronous and side-effect free.
//!
//! Compute and database classification are deliberately asymmetric:
//! databases never report `Overprovisioned`, only `Utilized` or `Review`.

use std::fmt;

use crate::config::Thresholds;

/// Averaged utilization for one compute instance over the lookback window.
#[derive(Debug, Clone, Copy)]
pub struct ComputeUsage {
    pub cpu_percent: f64,
    /// Network in + out, bytes/sec.
    pub network_bytes_per_sec: f64,
    /// Disk read + write operations/sec.
    pub disk_ops_per_sec: f64,
}

/// Averaged utilization for one database instance.
#[derive(Debug, Clone, Copy)]
pub struct DbUsage {
    pub cpu_percent: f64,
    pub free_storage_bytes: f64,
}

/// Advisory status assigned to a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationStatus {
    Utilized,
    Overprovisioned,
    Review,
}

impl fmt::Display for UtilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilizationStatus::Utilized => write!(f, "✅ Utilized"),
            UtilizationStatus::Overprovisioned => write!(f, "🔴 Overprovisioned"),
            UtilizationStatus::Review => write!(f, "⚠️ Review"),
        }
    }
}

/// A human-readable observation attached to a `Review` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    LowCpu,
    LowNetwork,
    LowDiskOps,
    UnderutilizedStorage,
    StorageNearlyFull,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Note::LowCpu => "Low CPU",
            Note::LowNetwork => "Low Network",
            Note::LowDiskOps => "Low Disk Ops",
            Note::UnderutilizedStorage => "Underutilized Storage",
            Note::StorageNearlyFull => "Storage Nearly Full",
        };
        write!(f, "{}", label)
    }
}

/// Status plus supporting notes for one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub status: UtilizationStatus,
    pub notes: Vec<Note>,
}

impl Assessment {
    fn utilized() -> Self {
        Self {
            status: UtilizationStatus::Utilized,
            notes: Vec::new(),
        }
    }

    /// Report label: `⚠️ Review: Low CPU, Low Network`, or the bare status
    /// when there are no notes.
    pub fn label(&self) -> String {
        if self.notes.is_empty() {
            self.status.to_string()
        } else {
            let joined = self
                .notes
                .iter()
                .map(Note::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", self.status, joined)
        }
    }
}

/// Classify a compute instance.
///
/// All three metrics below threshold dominates: the instance is
/// `Overprovisioned` with no notes. Otherwise each individually-low metric
/// contributes a note and any note demotes the status to `Review`.
pub fn classify_compute(usage: &ComputeUsage, thresholds: &Thresholds) -> Assessment {
    let cpu_low = usage.cpu_percent < thresholds.cpu_percent;
    let network_low = usage.network_bytes_per_sec < thresholds.network_bytes_per_sec;
    let disk_low = usage.disk_ops_per_sec < thresholds.disk_ops_per_sec;

    if cpu_low && network_low && disk_low {
        return Assessment {
            status: UtilizationStatus::Overprovisioned,
            notes: Vec::new(),
        };
    }

    let mut notes = Vec::new();
    if cpu_low {
        notes.push(Note::LowCpu);
    }
    if network_low {
        notes.push(Note::LowNetwork);
    }
    if disk_low {
        notes.push(Note::LowDiskOps);
    }

    if notes.is_empty() {
        Assessment::utilized()
    } else {
        Assessment {
            status: UtilizationStatus::Review,
            notes,
        }
    }
}

/// Classify a database instance.
///
/// Storage notes are exclusive-else with strict boundaries: free storage
/// above 80% of allocated reads as underutilized, below 10% as nearly full,
/// and exactly 80% or 10% triggers neither. Databases have no
/// `Overprovisioned` state.
pub fn classify_database(
    usage: &DbUsage,
    allocated_storage_bytes: f64,
    thresholds: &Thresholds,
) -> Assessment {
    let mut notes = Vec::new();

    if usage.cpu_percent < thresholds.cpu_percent {
        notes.push(Note::LowCpu);
    }

    if usage.free_storage_bytes > 0.8 * allocated_storage_bytes {
        notes.push(Note::UnderutilizedStorage);
    } else if usage.free_storage_bytes < 0.1 * allocated_storage_bytes {
        notes.push(Note::StorageNearlyFull);
    }

    if notes.is_empty() {
        Assessment::utilized()
    } else {
        Assessment {
            status: UtilizationStatus::Review,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds {
            cpu_percent: 40.0,
            network_bytes_per_sec: 1_000_000.0,
            disk_ops_per_sec: 100.0,
        }
    }

    #[test]
    fn test_all_low_is_overprovisioned_with_no_notes() {
        let usage = ComputeUsage {
            cpu_percent: 10.0,
            network_bytes_per_sec: 500.0,
            disk_ops_per_sec: 5.0,
        };
        let assessment = classify_compute(&usage, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Overprovisioned);
        assert!(assessment.notes.is_empty());
        assert_eq!(assessment.label(), "🔴 Overprovisioned");
    }

    #[test]
    fn test_none_low_is_utilized() {
        let usage = ComputeUsage {
            cpu_percent: 75.0,
            network_bytes_per_sec: 5_000_000.0,
            disk_ops_per_sec: 500.0,
        };
        let assessment = classify_compute(&usage, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Utilized);
        assert!(assessment.notes.is_empty());
    }

    #[test]
    fn test_single_low_metric_is_review_with_one_note() {
        let usage = ComputeUsage {
            cpu_percent: 10.0,
            network_bytes_per_sec: 5_000_000.0,
            disk_ops_per_sec: 500.0,
        };
        let assessment = classify_compute(&usage, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Review);
        assert_eq!(assessment.notes, vec![Note::LowCpu]);
        assert_eq!(assessment.label(), "⚠️ Review: Low CPU");
    }

    #[test]
    fn test_two_low_metrics_join_notes_in_order() {
        let usage = ComputeUsage {
            cpu_percent: 10.0,
            network_bytes_per_sec: 500.0,
            disk_ops_per_sec: 500.0,
        };
        let assessment = classify_compute(&usage, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Review);
        assert_eq!(assessment.notes, vec![Note::LowCpu, Note::LowNetwork]);
        assert_eq!(assessment.label(), "⚠️ Review: Low CPU, Low Network");
    }

    #[test]
    fn test_at_threshold_is_not_low() {
        // Thresholds compare with strict <, so exactly-at is not low.
        let usage = ComputeUsage {
            cpu_percent: 40.0,
            network_bytes_per_sec: 1_000_000.0,
            disk_ops_per_sec: 100.0,
        };
        let assessment = classify_compute(&usage, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Utilized);
    }

    #[test]
    fn test_database_underutilized_storage() {
        let gib = 1024.0 * 1024.0 * 1024.0;
        let usage = DbUsage {
            cpu_percent: 60.0,
            free_storage_bytes: 90.0 * gib,
        };
        let assessment = classify_database(&usage, 100.0 * gib, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Review);
        assert_eq!(assessment.notes, vec![Note::UnderutilizedStorage]);
    }

    #[test]
    fn test_database_storage_nearly_full() {
        let usage = DbUsage {
            cpu_percent: 60.0,
            free_storage_bytes: 5.0,
        };
        let assessment = classify_database(&usage, 100.0, &thresholds());
        assert_eq!(assessment.notes, vec![Note::StorageNearlyFull]);
    }

    #[test]
    fn test_database_storage_boundaries_are_strict() {
        let usage_at_80 = DbUsage {
            cpu_percent: 60.0,
            free_storage_bytes: 80.0,
        };
        let assessment = classify_database(&usage_at_80, 100.0, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Utilized);

        let usage_at_10 = DbUsage {
            cpu_percent: 60.0,
            free_storage_bytes: 10.0,
        };
        let assessment = classify_database(&usage_at_10, 100.0, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Utilized);
    }

    #[test]
    fn test_database_never_overprovisioned() {
        // Low CPU and underutilized storage together still read as Review.
        let usage = DbUsage {
            cpu_percent: 1.0,
            free_storage_bytes: 99.0,
        };
        let assessment = classify_database(&usage, 100.0, &thresholds());
        assert_eq!(assessment.status, UtilizationStatus::Review);
        assert_eq!(
            assessment.notes,
            vec![Note::LowCpu, Note::UnderutilizedStorage]
        );
    }
}
