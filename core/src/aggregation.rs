//! Period aggregation of observations.
//!
//! Pure functions over an observation slice: every call regroups from
//! scratch, nothing is cached between calls.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CarbonError;
use crate::models::{Observation, SubmitterId, VerificationStatus};
use crate::period::Period;

/// Capture totals for one period bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    /// Period key (`YYYY-MM-DD` or `YYYY-MM`)
    pub period: String,
    /// All statuses, rejected included
    pub total_capture: f64,
    pub verified_capture: f64,
    pub pending_capture: f64,
    /// Distinct submitters seen in the bucket
    pub submitter_count: u32,
    /// Region name -> capture, all statuses
    pub region_breakdown: HashMap<String, f64>,
}

struct BucketAccumulator<'a> {
    period: String,
    total_capture: f64,
    verified_capture: f64,
    pending_capture: f64,
    submitters: HashSet<&'a SubmitterId>,
    region_breakdown: HashMap<String, f64>,
}

impl<'a> BucketAccumulator<'a> {
    fn new(period: String) -> Self {
        Self {
            period,
            total_capture: 0.0,
            verified_capture: 0.0,
            pending_capture: 0.0,
            submitters: HashSet::new(),
            region_breakdown: HashMap::new(),
        }
    }

    fn add(&mut self, obs: &'a Observation) {
        let amount = obs.amount();
        self.total_capture += amount;
        match obs.capture.verification {
            VerificationStatus::Verified => self.verified_capture += amount,
            VerificationStatus::Pending => self.pending_capture += amount,
            VerificationStatus::Rejected => {}
        }
        self.submitters.insert(&obs.submitter_id);
        *self
            .region_breakdown
            .entry(obs.region().to_string())
            .or_insert(0.0) += amount;
    }

    fn finish(self) -> PeriodBucket {
        PeriodBucket {
            period: self.period,
            total_capture: self.total_capture,
            verified_capture: self.verified_capture,
            pending_capture: self.pending_capture,
            submitter_count: self.submitters.len() as u32,
            region_breakdown: self.region_breakdown,
        }
    }
}

/// Group observations into period buckets.
///
/// Buckets come back in the order their key was first seen, so a
/// timestamp-sorted input yields chronological buckets.
pub fn aggregate_by_period(
    observations: &[Observation],
    period: Period,
) -> Result<Vec<PeriodBucket>, CarbonError> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<BucketAccumulator<'_>> = Vec::new();

    for obs in observations {
        let key = period.key_for(obs.timestamp_unix)?;
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                buckets.push(BucketAccumulator::new(key.clone()));
                index.insert(key, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].add(obs);
    }

    tracing::debug!(
        period = period.as_str(),
        observations = observations.len(),
        buckets = buckets.len(),
        "aggregated observations"
    );

    Ok(buckets.into_iter().map(BucketAccumulator::finish).collect())
}

/// Observations falling inside the bucket identified by `key`.
pub fn observations_in_bucket<'a>(
    observations: &'a [Observation],
    period: Period,
    key: &str,
) -> Result<Vec<&'a Observation>, CarbonError> {
    let (start, end) = period.bounds(key)?;
    Ok(observations
        .iter()
        .filter(|o| o.timestamp_unix >= start && o.timestamp_unix < end)
        .collect())
}

/// Growth of verified capture between consecutive buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Percent change of the last bucket over the one before it
    pub growth_rate_percent: Option<f64>,
    /// Linear projection, set only for the last three buckets
    pub projection: Vec<Option<f64>>,
}

impl TrendReport {
    pub fn compute(buckets: &[PeriodBucket]) -> Self {
        let growth_rate_percent = match buckets {
            [.., previous, current] if previous.verified_capture != 0.0 => Some(
                (current.verified_capture - previous.verified_capture) / previous.verified_capture
                    * 100.0,
            ),
            _ => None,
        };

        let g = growth_rate_percent.unwrap_or(0.0) / 100.0;
        let n = buckets.len() as f64;
        let projection = buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| {
                if i + 3 < buckets.len() {
                    None
                } else {
                    // Steps 1..=3 across the final three buckets
                    Some(bucket.verified_capture * (1.0 + g * (i as f64 - n + 4.0)))
                }
            })
            .collect();

        Self {
            growth_rate_percent,
            projection,
        }
    }
}
