//! Synthetic observation generator.
//!
//! Produces a window of observations ending at an explicit anchor instant.
//! All randomness comes from the caller's RNG, so a seeded
//! [`rand::rngs::StdRng`] gives a reproducible dataset.

use std::f64::consts::PI;

use rand::Rng;

use crate::catalog::{Region, EQUIPMENT_KITS, REGIONS, SUBMITTER_NAMES};
use crate::config::GeneratorConfig;
use crate::error::CarbonError;
use crate::models::{
    Capture, CaptureMethod, Environment, Location, Observation, ObservationId, SubmitterId,
    VerificationStatus,
};
use crate::period::SECONDS_PER_DAY;

pub const DEPTH_RANGE_M: (f64, f64) = (5.0, 200.0);
pub const TEMPERATURE_RANGE_C: (f64, f64) = (4.0, 22.0);
pub const SALINITY_RANGE_PPT: (f64, f64) = (30.0, 38.0);
pub const PH_RANGE: (f64, f64) = (7.8, 8.3);

/// Generate observations for `config.days` days ending at `anchor_unix`.
///
/// Day `d` is stamped `anchor_unix - d` days. Output is sorted ascending by
/// timestamp.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
    anchor_unix: i64,
) -> Result<Vec<Observation>, CarbonError> {
    config.validate()?;

    let mut observations = Vec::new();
    for day in 0..config.days {
        let timestamp_unix = anchor_unix
            .checked_sub(i64::from(day) * SECONDS_PER_DAY)
            .ok_or(CarbonError::InvalidTimestamp(anchor_unix))?;
        let points = rng.gen_range(config.min_per_day..=config.max_per_day);
        for index in 0..points {
            observations.push(sample_observation(rng, config, day, index, timestamp_unix));
        }
    }

    observations.sort_by_key(|o| o.timestamp_unix);

    tracing::debug!(
        days = config.days,
        count = observations.len(),
        anchor_unix,
        "generated synthetic observations"
    );
    Ok(observations)
}

fn sample_observation<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
    day: u32,
    index: u32,
    timestamp_unix: i64,
) -> Observation {
    let region = pick(rng, &REGIONS);
    let (lat, lng) = coordinate_in_region(rng, region);
    let submitter_id = SubmitterId(format!("F{:03}", rng.gen_range(0..config.submitter_pool)));
    let submitter_name = pick(rng, &SUBMITTER_NAMES).to_string();
    let method = *pick(rng, &CaptureMethod::ALL);
    let amount = sample_in(rng, method.capture_range());
    let verification = sample_verification(rng, config.verified_probability);

    Observation {
        id: ObservationId(format!("{}-{}-{}", submitter_id, day, index)),
        submitter_id,
        submitter_name,
        location: Location {
            lat,
            lng,
            region_name: region.name.to_string(),
            depth_m: sample_in(rng, DEPTH_RANGE_M),
        },
        capture: Capture {
            amount,
            method,
            verification,
        },
        timestamp_unix,
        equipment: pick(rng, &EQUIPMENT_KITS)
            .iter()
            .map(|item| item.to_string())
            .collect(),
        environment: Environment {
            temperature_c: sample_in(rng, TEMPERATURE_RANGE_C),
            salinity_ppt: sample_in(rng, SALINITY_RANGE_PPT),
            ph: sample_in(rng, PH_RANGE),
        },
    }
}

/// Uniform disc sample around the region center, in degrees.
///
/// Not geodesic: longitude spread is not corrected for latitude.
pub fn coordinate_in_region<R: Rng + ?Sized>(rng: &mut R, region: &Region) -> (f64, f64) {
    let angle = rng.gen_range(0.0..2.0 * PI);
    let distance = rng.gen_range(0.0..region.radius_deg);
    (
        region.center_lat + distance * angle.cos(),
        region.center_lng + distance * angle.sin(),
    )
}

fn sample_verification<R: Rng + ?Sized>(rng: &mut R, verified_probability: f64) -> VerificationStatus {
    if rng.gen::<f64>() < verified_probability {
        VerificationStatus::Verified
    } else if rng.gen_bool(0.5) {
        VerificationStatus::Pending
    } else {
        VerificationStatus::Rejected
    }
}

fn sample_in<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    rng.gen_range(min..max)
}

// Only called with the non-empty catalog constants.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
