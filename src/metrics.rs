//! Metric query primitives
//!
//! A [`MetricQuery`] names one measurement for one resource; the lookback
//! window is fixed per run and aggregates into one 24-hour bucket per day.
//! Fetching happens behind [`crate::provider::MetricSource`] so reports can
//! run against deterministic fakes.

use chrono::{DateTime, Duration, Utc};

/// Aggregation statistic requested from the metrics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Average,
    Sum,
    Minimum,
    Maximum,
}

/// Unit hint passed through to the metrics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Percent,
    Bytes,
    Count,
}

/// One metric request for one resource.
#[derive(Debug, Clone)]
pub struct MetricQuery {
    pub resource_id: String,
    pub metric_name: String,
    pub namespace: String,
    pub statistic: Statistic,
    pub unit: Option<MetricUnit>,
    pub dimension_name: String,
}

impl MetricQuery {
    /// Query an EC2 instance metric, dimensioned by `InstanceId`.
    pub fn ec2(resource_id: &str, metric_name: &str) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            metric_name: metric_name.to_string(),
            namespace: "AWS/EC2".to_string(),
            statistic: Statistic::Average,
            unit: None,
            dimension_name: "InstanceId".to_string(),
        }
    }

    /// Query an RDS instance metric, dimensioned by `DBInstanceIdentifier`.
    pub fn rds(resource_id: &str, metric_name: &str) -> Self {
        Self {
            resource_id: resource_id.to_string(),
            metric_name: metric_name.to_string(),
            namespace: "AWS/RDS".to_string(),
            statistic: Statistic::Average,
            unit: None,
            dimension_name: "DBInstanceIdentifier".to_string(),
        }
    }

    pub fn with_unit(mut self, unit: MetricUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_statistic(mut self, statistic: Statistic) -> Self {
        self.statistic = statistic;
        self
    }
}

/// Time range for metric queries, one aggregated sample per day.
#[derive(Debug, Clone, Copy)]
pub struct LookbackWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl LookbackWindow {
    /// Aggregation period per sample: 24 hours.
    pub const PERIOD_SECS: i32 = 86_400;

    pub fn days(days: u32) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }
}

/// Average a metric series, treating a missing series as a single zero
/// sample. A resource with no datapoints (brand-new, or metrics disabled)
/// therefore averages to 0.0 and can classify as underutilized rather than
/// erroring out.
pub fn average_or_zero(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}
