//! Global summary statistics over an observation collection.
//!
//! Ratios with an empty denominator come back as `None` instead of NaN.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{CaptureMethod, Observation};
use crate::period::SECONDS_PER_DAY;

/// Length of the trailing window reported as `last_7_days_capture`.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Verified capture attributed to one method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct MethodCapture {
    pub method: CaptureMethod,
    pub capture: f64,
    /// Share of verified total capture, 0 when the total is 0
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Verified capture only
    pub total_capture: f64,
    pub unique_submitters: u32,
    pub unique_regions: u32,
    /// Percent of observations verified; `None` for an empty collection
    pub verification_rate: Option<f64>,
    /// One entry per method, in catalog order
    pub method_breakdown: Vec<MethodCapture>,
    /// `None` when there are no submitters
    pub average_capture_per_submitter: Option<f64>,
    /// Verified capture within `[reference - 7d, reference]`
    pub last_7_days_capture: f64,
}

impl Summary {
    /// Compute the summary as seen at `reference_unix`.
    pub fn compute(observations: &[Observation], reference_unix: i64) -> Self {
        let window_start = reference_unix.saturating_sub(RECENT_WINDOW_DAYS * SECONDS_PER_DAY);

        let mut total_capture = 0.0;
        let mut verified_count: u64 = 0;
        let mut method_totals = [0.0f64; CaptureMethod::ALL.len()];
        let mut last_7_days_capture = 0.0;
        let mut submitters = HashSet::new();
        let mut regions = HashSet::new();

        for obs in observations {
            submitters.insert(&obs.submitter_id);
            regions.insert(obs.region());

            if !obs.is_verified() {
                continue;
            }
            let amount = obs.amount();
            verified_count += 1;
            total_capture += amount;
            if let Some(slot) = CaptureMethod::ALL
                .iter()
                .position(|m| *m == obs.capture.method)
            {
                method_totals[slot] += amount;
            }
            if obs.timestamp_unix >= window_start && obs.timestamp_unix <= reference_unix {
                last_7_days_capture += amount;
            }
        }

        let verification_rate = if observations.is_empty() {
            None
        } else {
            Some(verified_count as f64 / observations.len() as f64 * 100.0)
        };

        let average_capture_per_submitter = if submitters.is_empty() {
            None
        } else {
            Some(total_capture / submitters.len() as f64)
        };

        let method_breakdown = CaptureMethod::ALL
            .iter()
            .zip(method_totals)
            .map(|(method, capture)| MethodCapture {
                method: *method,
                capture,
                share_percent: if total_capture > 0.0 {
                    capture / total_capture * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Summary {
            total_capture,
            unique_submitters: submitters.len() as u32,
            unique_regions: regions.len() as u32,
            verification_rate,
            method_breakdown,
            average_capture_per_submitter,
            last_7_days_capture,
        }
    }

    pub fn method_capture(&self, method: CaptureMethod) -> f64 {
        self.method_breakdown
            .iter()
            .find(|m| m.method == method)
            .map(|m| m.capture)
            .unwrap_or(0.0)
    }

    /// Mean verified capture per day over a window of `window_days`.
    pub fn daily_capture_rate(&self, window_days: u32) -> Option<f64> {
        if window_days == 0 {
            None
        } else {
            Some(self.total_capture / f64::from(window_days))
        }
    }
}
