//! Foreign-callable surface exported through UniFFI.
//!
//! Thin wrappers: inputs arrive as owned values from the host and are
//! handed to the slice-based functions of the core modules.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::aggregation::{aggregate_by_period, observations_in_bucket, PeriodBucket, TrendReport};
use crate::config::GeneratorConfig;
use crate::error::CarbonError;
use crate::generator::generate;
use crate::heatmap::{heatmap_points, region_period_matrix, HeatmapPoint, RegionSeries};
use crate::insights::{
    leaderboard, recent_submissions, regional_breakdown, submitter_ids, submitter_performance,
    RegionalStats, SubmitterPerformance, SubmitterRanking,
};
use crate::models::{Observation, ObservationId, SubmitterId};
use crate::period::Period;
use crate::snapshot::DashboardSnapshot;
use crate::submission::{validate_submission, SubmissionForm, ValidatedSubmission};
use crate::summary::Summary;

/// Seeded dataset with the default configuration.
#[uniffi::export]
pub fn generate_dataset(seed: u64, anchor_unix: i64) -> Result<Vec<Observation>, CarbonError> {
    generate_dataset_with_config(GeneratorConfig::default(), seed, anchor_unix)
}

#[uniffi::export]
pub fn generate_dataset_with_config(
    config: GeneratorConfig,
    seed: u64,
    anchor_unix: i64,
) -> Result<Vec<Observation>, CarbonError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(&mut rng, &config, anchor_unix)
}

#[uniffi::export]
pub fn generator_config_from_json(json: String) -> Result<GeneratorConfig, CarbonError> {
    GeneratorConfig::from_json(&json)
}

#[uniffi::export]
pub fn parse_period(value: String) -> Result<Period, CarbonError> {
    value.parse()
}

#[uniffi::export]
pub fn period_key(period: Period, timestamp_unix: i64) -> Result<String, CarbonError> {
    period.key_for(timestamp_unix)
}

#[uniffi::export]
pub fn aggregate_observations(
    observations: Vec<Observation>,
    period: Period,
) -> Result<Vec<PeriodBucket>, CarbonError> {
    aggregate_by_period(&observations, period)
}

/// Drill-down: the observations inside the bucket keyed `key`.
#[uniffi::export]
pub fn bucket_observations(
    observations: Vec<Observation>,
    period: Period,
    key: String,
) -> Result<Vec<Observation>, CarbonError> {
    Ok(observations_in_bucket(&observations, period, &key)?
        .into_iter()
        .cloned()
        .collect())
}

#[uniffi::export]
pub fn compute_trend(buckets: Vec<PeriodBucket>) -> TrendReport {
    TrendReport::compute(&buckets)
}

#[uniffi::export]
pub fn compute_summary(observations: Vec<Observation>, reference_unix: i64) -> Summary {
    Summary::compute(&observations, reference_unix)
}

#[uniffi::export]
pub fn compute_leaderboard(
    observations: Vec<Observation>,
    reference_unix: i64,
    limit: u32,
) -> Vec<SubmitterRanking> {
    leaderboard(&observations, reference_unix, limit)
}

#[uniffi::export]
pub fn compute_regional_breakdown(observations: Vec<Observation>) -> Vec<RegionalStats> {
    regional_breakdown(&observations)
}

#[uniffi::export]
pub fn compute_heatmap_points(observations: Vec<Observation>) -> Vec<HeatmapPoint> {
    heatmap_points(&observations)
}

#[uniffi::export]
pub fn compute_region_period_matrix(
    buckets: Vec<PeriodBucket>,
    regions: Vec<String>,
) -> Vec<RegionSeries> {
    let regions: Vec<&str> = regions.iter().map(String::as_str).collect();
    region_period_matrix(&buckets, &regions)
}

#[uniffi::export]
pub fn compute_submitter_performance(
    observations: Vec<Observation>,
    submitter_id: SubmitterId,
    reference_unix: i64,
    months: u32,
) -> Result<SubmitterPerformance, CarbonError> {
    submitter_performance(&observations, &submitter_id, reference_unix, months)
}

#[uniffi::export]
pub fn list_recent_submissions(
    observations: Vec<Observation>,
    submitter_id: SubmitterId,
    limit: u32,
) -> Vec<Observation> {
    recent_submissions(&observations, &submitter_id, limit)
}

#[uniffi::export]
pub fn list_submitters(observations: Vec<Observation>) -> Vec<SubmitterId> {
    submitter_ids(&observations)
}

#[uniffi::export]
pub fn validate_submission_form(form: SubmissionForm) -> Result<ValidatedSubmission, CarbonError> {
    validate_submission(&form)
}

/// Hand a validated submission to MRV review as a pending observation.
#[uniffi::export]
pub fn submission_to_observation(
    submission: ValidatedSubmission,
    id: ObservationId,
    submitter_id: SubmitterId,
    submitter_name: String,
    timestamp_unix: i64,
) -> Result<Observation, CarbonError> {
    submission.into_observation(id, submitter_id, submitter_name, timestamp_unix)
}

#[uniffi::export]
pub fn dashboard_snapshot(
    observations: Vec<Observation>,
    period: Period,
    reference_unix: i64,
) -> Result<DashboardSnapshot, CarbonError> {
    DashboardSnapshot::build(&observations, period, reference_unix)
}

#[uniffi::export]
pub fn dashboard_snapshot_json(
    observations: Vec<Observation>,
    period: Period,
    reference_unix: i64,
) -> Result<String, CarbonError> {
    DashboardSnapshot::build(&observations, period, reference_unix)?.to_json()
}
