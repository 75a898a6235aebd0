//! Everything one dashboard page renders, computed in a single pass.

use serde::{Deserialize, Serialize};

use crate::aggregation::{aggregate_by_period, PeriodBucket, TrendReport};
use crate::catalog::european_regions;
use crate::error::CarbonError;
use crate::heatmap::{heatmap_points, region_period_matrix, HeatmapPoint, RegionSeries};
use crate::insights::{leaderboard, regional_breakdown, RegionalStats, SubmitterRanking};
use crate::models::Observation;
use crate::period::Period;
use crate::summary::Summary;

pub const LEADERBOARD_SIZE: u32 = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub period: Period,
    pub reference_unix: i64,
    pub buckets: Vec<PeriodBucket>,
    pub summary: Summary,
    pub trend: TrendReport,
    pub heatmap: Vec<HeatmapPoint>,
    pub region_matrix: Vec<RegionSeries>,
    pub leaderboard: Vec<SubmitterRanking>,
    pub regions: Vec<RegionalStats>,
}

impl DashboardSnapshot {
    pub fn build(
        observations: &[Observation],
        period: Period,
        reference_unix: i64,
    ) -> Result<Self, CarbonError> {
        let buckets = aggregate_by_period(observations, period)?;
        let region_names: Vec<&str> = european_regions().iter().map(|r| r.name).collect();

        Ok(Self {
            period,
            reference_unix,
            summary: Summary::compute(observations, reference_unix),
            trend: TrendReport::compute(&buckets),
            heatmap: heatmap_points(observations),
            region_matrix: region_period_matrix(&buckets, &region_names),
            leaderboard: leaderboard(observations, reference_unix, LEADERBOARD_SIZE),
            regions: regional_breakdown(observations),
            buckets,
        })
    }

    pub fn to_json(&self) -> Result<String, CarbonError> {
        Ok(serde_json::to_string(self)?)
    }
}
