//! Projections consumed by the map and region x period heatmap.

use serde::{Deserialize, Serialize};

use crate::aggregation::PeriodBucket;
use crate::models::Observation;

/// A verified observation as a weighted map point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    /// Capture amount, tCO₂e
    pub intensity: f64,
    pub timestamp_unix: i64,
    pub region_name: String,
}

pub fn heatmap_points(observations: &[Observation]) -> Vec<HeatmapPoint> {
    observations
        .iter()
        .filter(|o| o.is_verified())
        .map(|o| HeatmapPoint {
            lat: o.location.lat,
            lng: o.location.lng,
            intensity: o.amount(),
            timestamp_unix: o.timestamp_unix,
            region_name: o.location.region_name.clone(),
        })
        .collect()
}

/// One heatmap row: a region's capture across the bucket sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct RegionSeries {
    pub region: String,
    /// Parallel to the bucket keys; 0 where the region had no capture
    pub values: Vec<f64>,
}

pub fn region_period_matrix(buckets: &[PeriodBucket], regions: &[&str]) -> Vec<RegionSeries> {
    regions
        .iter()
        .map(|region| RegionSeries {
            region: region.to_string(),
            values: buckets
                .iter()
                .map(|b| b.region_breakdown.get(*region).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect()
}
