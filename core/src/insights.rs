//! Per-submitter and per-region rollups behind the dashboard panels.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CarbonError;
use crate::models::{CaptureMethod, Observation, SubmitterId, VerificationStatus};
use crate::period::{trailing_month_keys, Period, SECONDS_PER_DAY};

/// Recency class derived from days since a submitter's last verified entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Active,
    Recent,
    Moderate,
    Inactive,
}

impl ActivityStatus {
    pub fn from_days(days: u64) -> Self {
        if days <= 3 {
            ActivityStatus::Active
        } else if days <= 7 {
            ActivityStatus::Recent
        } else if days <= 14 {
            ActivityStatus::Moderate
        } else {
            ActivityStatus::Inactive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "Active",
            ActivityStatus::Recent => "Recent",
            ActivityStatus::Moderate => "Moderate",
            ActivityStatus::Inactive => "Inactive",
        }
    }
}

/// Whole days between two instants, rounded up.
pub fn days_between(a_unix: i64, b_unix: i64) -> u64 {
    a_unix
        .abs_diff(b_unix)
        .div_ceil(SECONDS_PER_DAY.unsigned_abs())
}

fn by_capture_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ============================================================================
// Leaderboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterRanking {
    pub submitter_id: SubmitterId,
    pub name: String,
    pub total_capture: f64,
    pub entries: u32,
    pub regions_count: u32,
    pub methods_count: u32,
    pub average_capture: f64,
    pub last_activity_unix: i64,
    pub activity: ActivityStatus,
}

struct RankingAccumulator<'a> {
    name: &'a str,
    total_capture: f64,
    entries: u32,
    regions: HashSet<&'a str>,
    methods: HashSet<CaptureMethod>,
    last_activity_unix: i64,
}

/// Top submitters by verified capture, highest first, at most `limit` entries.
pub fn leaderboard(
    observations: &[Observation],
    reference_unix: i64,
    limit: u32,
) -> Vec<SubmitterRanking> {
    let mut order: Vec<&SubmitterId> = Vec::new();
    let mut stats: HashMap<&SubmitterId, RankingAccumulator<'_>> = HashMap::new();

    for obs in observations.iter().filter(|o| o.is_verified()) {
        let entry = stats.entry(&obs.submitter_id).or_insert_with(|| {
            order.push(&obs.submitter_id);
            RankingAccumulator {
                name: &obs.submitter_name,
                total_capture: 0.0,
                entries: 0,
                regions: HashSet::new(),
                methods: HashSet::new(),
                last_activity_unix: obs.timestamp_unix,
            }
        });
        entry.total_capture += obs.amount();
        entry.entries += 1;
        entry.regions.insert(obs.region());
        entry.methods.insert(obs.capture.method);
        entry.last_activity_unix = entry.last_activity_unix.max(obs.timestamp_unix);
    }

    let mut rankings: Vec<SubmitterRanking> = order
        .into_iter()
        .filter_map(|id| {
            let s = stats.remove(id)?;
            let days = days_between(reference_unix, s.last_activity_unix);
            Some(SubmitterRanking {
                submitter_id: id.clone(),
                name: s.name.to_string(),
                total_capture: s.total_capture,
                entries: s.entries,
                regions_count: s.regions.len() as u32,
                methods_count: s.methods.len() as u32,
                average_capture: s.total_capture / f64::from(s.entries),
                last_activity_unix: s.last_activity_unix,
                activity: ActivityStatus::from_days(days),
            })
        })
        .collect();

    // Stable sort keeps first-seen order among ties.
    rankings.sort_by(|a, b| by_capture_desc(a.total_capture, b.total_capture));
    rankings.truncate(limit as usize);
    rankings
}

// ============================================================================
// Regional distribution
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct RegionalStats {
    pub region: String,
    pub total_capture: f64,
    pub submitter_count: u32,
    pub average_depth_m: f64,
    pub methods_count: u32,
}

/// Verified capture per region, highest first.
pub fn regional_breakdown(observations: &[Observation]) -> Vec<RegionalStats> {
    struct Acc<'a> {
        total_capture: f64,
        submitters: HashSet<&'a SubmitterId>,
        depth_sum: f64,
        entries: u32,
        methods: HashSet<CaptureMethod>,
    }

    let mut order: Vec<&str> = Vec::new();
    let mut stats: HashMap<&str, Acc<'_>> = HashMap::new();

    for obs in observations.iter().filter(|o| o.is_verified()) {
        let acc = stats.entry(obs.region()).or_insert_with(|| {
            order.push(obs.region());
            Acc {
                total_capture: 0.0,
                submitters: HashSet::new(),
                depth_sum: 0.0,
                entries: 0,
                methods: HashSet::new(),
            }
        });
        acc.total_capture += obs.amount();
        acc.submitters.insert(&obs.submitter_id);
        acc.depth_sum += obs.location.depth_m;
        acc.entries += 1;
        acc.methods.insert(obs.capture.method);
    }

    let mut regions: Vec<RegionalStats> = order
        .into_iter()
        .filter_map(|region| {
            let acc = stats.remove(region)?;
            Some(RegionalStats {
                region: region.to_string(),
                total_capture: acc.total_capture,
                submitter_count: acc.submitters.len() as u32,
                average_depth_m: acc.depth_sum / f64::from(acc.entries),
                methods_count: acc.methods.len() as u32,
            })
        })
        .collect();

    regions.sort_by(|a, b| by_capture_desc(a.total_capture, b.total_capture));
    regions
}

// ============================================================================
// Submitter performance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCapture {
    /// `YYYY-MM`
    pub month: String,
    pub capture: f64,
    pub submissions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterPerformance {
    pub submitter_id: SubmitterId,
    pub verified_capture: f64,
    pub pending_capture: f64,
    pub verified_entries: u32,
    /// Percent verified; 0 when the submitter has no observations
    pub verification_rate: f64,
    /// Mean per verified entry; 0 when there are none
    pub average_verified_capture: f64,
    /// Verified capture per month, oldest first, ending with the reference month
    pub monthly: Vec<MonthlyCapture>,
}

pub const DEFAULT_PERFORMANCE_MONTHS: u32 = 6;

/// Performance card for one submitter as of `reference_unix`.
pub fn submitter_performance(
    observations: &[Observation],
    submitter_id: &SubmitterId,
    reference_unix: i64,
    months: u32,
) -> Result<SubmitterPerformance, CarbonError> {
    let mut monthly: Vec<MonthlyCapture> = trailing_month_keys(reference_unix, months)?
        .into_iter()
        .map(|month| MonthlyCapture {
            month,
            capture: 0.0,
            submissions: 0,
        })
        .collect();

    let mut total: u32 = 0;
    let mut verified_entries: u32 = 0;
    let mut verified_capture = 0.0;
    let mut pending_capture = 0.0;

    for obs in observations.iter().filter(|o| &o.submitter_id == submitter_id) {
        total += 1;
        match obs.capture.verification {
            VerificationStatus::Verified => {
                verified_entries += 1;
                verified_capture += obs.amount();
                let key = Period::Monthly.key_for(obs.timestamp_unix)?;
                if let Some(slot) = monthly.iter_mut().find(|m| m.month == key) {
                    slot.capture += obs.amount();
                    slot.submissions += 1;
                }
            }
            VerificationStatus::Pending => pending_capture += obs.amount(),
            VerificationStatus::Rejected => {}
        }
    }

    let verification_rate = if total > 0 {
        f64::from(verified_entries) / f64::from(total) * 100.0
    } else {
        0.0
    };
    let average_verified_capture = if verified_entries > 0 {
        verified_capture / f64::from(verified_entries)
    } else {
        0.0
    };

    Ok(SubmitterPerformance {
        submitter_id: submitter_id.clone(),
        verified_capture,
        pending_capture,
        verified_entries,
        verification_rate,
        average_verified_capture,
        monthly,
    })
}

/// A submitter's latest `limit` observations, newest first.
pub fn recent_submissions(
    observations: &[Observation],
    submitter_id: &SubmitterId,
    limit: u32,
) -> Vec<Observation> {
    let mut mine: Vec<&Observation> = observations
        .iter()
        .filter(|o| &o.submitter_id == submitter_id)
        .collect();
    mine.sort_by(|a, b| b.timestamp_unix.cmp(&a.timestamp_unix));
    mine.into_iter().take(limit as usize).cloned().collect()
}

/// Distinct submitter ids in first-seen order.
pub fn submitter_ids(observations: &[Observation]) -> Vec<SubmitterId> {
    let mut seen = BTreeSet::new();
    observations
        .iter()
        .filter(|o| seen.insert(&o.submitter_id))
        .map(|o| o.submitter_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capture, Environment, Location, ObservationId};
    use chrono::{TimeZone, Utc};

    fn ts(y: i32, m: u32, d: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().timestamp()
    }

    struct Entry<'a> {
        submitter: &'a str,
        region: &'a str,
        method: CaptureMethod,
        amount: f64,
        depth: f64,
        status: VerificationStatus,
        ts: i64,
    }

    fn obs(s: Entry<'_>) -> Observation {
        Observation {
            id: ObservationId(format!("{}-{}", s.submitter, s.ts)),
            submitter_id: SubmitterId(s.submitter.to_string()),
            submitter_name: format!("Name {}", s.submitter),
            location: Location {
                lat: 0.0,
                lng: 0.0,
                region_name: s.region.to_string(),
                depth_m: s.depth,
            },
            capture: Capture {
                amount: s.amount,
                method: s.method,
                verification: s.status,
            },
            timestamp_unix: s.ts,
            equipment: vec![],
            environment: Environment {
                temperature_c: 15.0,
                salinity_ppt: 35.0,
                ph: 8.1,
            },
        }
    }

    fn dataset() -> Vec<Observation> {
        use CaptureMethod::*;
        use VerificationStatus::*;
        vec![
            obs(Entry { submitter: "F001", region: "Baltic Sea", method: SeaweedFarming, amount: 2.0, depth: 10.0, status: Verified, ts: ts(2024, 1, 10) }),
            obs(Entry { submitter: "F001", region: "Celtic Sea", method: BlueMussel, amount: 1.0, depth: 30.0, status: Verified, ts: ts(2024, 3, 28) }),
            obs(Entry { submitter: "F001", region: "Celtic Sea", method: BlueMussel, amount: 0.5, depth: 30.0, status: Pending, ts: ts(2024, 3, 29) }),
            obs(Entry { submitter: "F002", region: "Baltic Sea", method: KelpRestoration, amount: 4.0, depth: 20.0, status: Verified, ts: ts(2024, 3, 1) }),
            obs(Entry { submitter: "F002", region: "Baltic Sea", method: KelpRestoration, amount: 9.0, depth: 90.0, status: Rejected, ts: ts(2024, 3, 2) }),
            obs(Entry { submitter: "F003", region: "Aegean Sea", method: MangroveProtection, amount: 0.7, depth: 50.0, status: Verified, ts: ts(2024, 2, 1) }),
        ]
    }

    #[test]
    fn test_activity_status_thresholds() {
        assert_eq!(ActivityStatus::from_days(0), ActivityStatus::Active);
        assert_eq!(ActivityStatus::from_days(3), ActivityStatus::Active);
        assert_eq!(ActivityStatus::from_days(4), ActivityStatus::Recent);
        assert_eq!(ActivityStatus::from_days(7), ActivityStatus::Recent);
        assert_eq!(ActivityStatus::from_days(14), ActivityStatus::Moderate);
        assert_eq!(ActivityStatus::from_days(15), ActivityStatus::Inactive);
    }

    #[test]
    fn test_days_between_rounds_up() {
        assert_eq!(days_between(0, 0), 0);
        assert_eq!(days_between(1, 0), 1);
        assert_eq!(days_between(SECONDS_PER_DAY, 0), 1);
        assert_eq!(days_between(0, SECONDS_PER_DAY + 1), 2);
        assert_eq!(days_between(i64::MIN, i64::MAX), u64::MAX.div_ceil(86_400));
    }

    #[test]
    fn test_leaderboard_extreme_reference() {
        for reference in [i64::MIN, i64::MAX] {
            let board = leaderboard(&dataset(), reference, 15);
            assert_eq!(board.len(), 3);
            assert!(board.iter().all(|r| r.activity == ActivityStatus::Inactive));
        }
    }

    #[test]
    fn test_leaderboard() {
        let board = leaderboard(&dataset(), ts(2024, 3, 30), 15);
        let ids: Vec<_> = board.iter().map(|r| r.submitter_id.0.as_str()).collect();
        assert_eq!(ids, vec!["F002", "F001", "F003"]);

        let f001 = &board[1];
        assert_eq!(f001.name, "Name F001");
        assert_eq!(f001.total_capture, 3.0);
        assert_eq!(f001.entries, 2);
        assert_eq!(f001.regions_count, 2);
        assert_eq!(f001.methods_count, 2);
        assert_eq!(f001.average_capture, 1.5);
        assert_eq!(f001.last_activity_unix, ts(2024, 3, 28));
        assert_eq!(f001.activity, ActivityStatus::Active);

        // Rejected capture does not count
        assert_eq!(board[0].total_capture, 4.0);
        assert_eq!(board[0].activity, ActivityStatus::Inactive);
    }

    #[test]
    fn test_leaderboard_limit() {
        let board = leaderboard(&dataset(), ts(2024, 3, 30), 2);
        assert_eq!(board.len(), 2);
        assert!(leaderboard(&[], ts(2024, 3, 30), 15).is_empty());
    }

    #[test]
    fn test_regional_breakdown() {
        let regions = regional_breakdown(&dataset());
        let names: Vec<_> = regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, vec!["Baltic Sea", "Celtic Sea", "Aegean Sea"]);

        let baltic = &regions[0];
        assert_eq!(baltic.total_capture, 6.0);
        assert_eq!(baltic.submitter_count, 2);
        assert_eq!(baltic.average_depth_m, 15.0);
        assert_eq!(baltic.methods_count, 2);
    }

    #[test]
    fn test_submitter_performance() {
        let id = SubmitterId("F001".to_string());
        let perf = submitter_performance(&dataset(), &id, ts(2024, 3, 30), 3).unwrap();

        assert_eq!(perf.verified_capture, 3.0);
        assert_eq!(perf.pending_capture, 0.5);
        assert_eq!(perf.verified_entries, 2);
        assert!((perf.verification_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(perf.average_verified_capture, 1.5);

        let months: Vec<_> = perf.monthly.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(perf.monthly[0].capture, 2.0);
        assert_eq!(perf.monthly[1].submissions, 0);
        assert_eq!(perf.monthly[2].capture, 1.0);
        assert_eq!(perf.monthly[2].submissions, 1);
    }

    #[test]
    fn test_submitter_performance_unknown_submitter() {
        let id = SubmitterId("F999".to_string());
        let perf = submitter_performance(&dataset(), &id, ts(2024, 3, 30), DEFAULT_PERFORMANCE_MONTHS)
            .unwrap();
        assert_eq!(perf.verification_rate, 0.0);
        assert_eq!(perf.average_verified_capture, 0.0);
        assert_eq!(perf.monthly.len(), 6);
        assert!(perf.monthly.iter().all(|m| m.capture == 0.0));
    }

    #[test]
    fn test_recent_submissions() {
        let id = SubmitterId("F001".to_string());
        let recent = recent_submissions(&dataset(), &id, 2);
        let stamps: Vec<_> = recent.iter().map(|o| o.timestamp_unix).collect();
        assert_eq!(stamps, vec![ts(2024, 3, 29), ts(2024, 3, 28)]);
    }

    #[test]
    fn test_submitter_ids_first_seen() {
        let ids = submitter_ids(&dataset());
        let ids: Vec<_> = ids.iter().map(|id| id.0.as_str()).collect();
        assert_eq!(ids, vec!["F001", "F002", "F003"]);
    }
}
