use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObservationId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmitterId(pub String);

uniffi::custom_newtype!(ObservationId, String);
uniffi::custom_newtype!(SubmitterId, String);

impl fmt::Display for SubmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blue carbon capture technique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMethod {
    SeaweedFarming,
    BlueMussel,
    KelpRestoration,
    MangroveProtection,
    SeagrassConservation,
}

impl CaptureMethod {
    /// Catalog order; breakdowns are reported in this order.
    pub const ALL: [CaptureMethod; 5] = [
        CaptureMethod::SeaweedFarming,
        CaptureMethod::BlueMussel,
        CaptureMethod::KelpRestoration,
        CaptureMethod::MangroveProtection,
        CaptureMethod::SeagrassConservation,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            CaptureMethod::SeaweedFarming => "seaweed_farming",
            CaptureMethod::BlueMussel => "blue_mussel",
            CaptureMethod::KelpRestoration => "kelp_restoration",
            CaptureMethod::MangroveProtection => "mangrove_protection",
            CaptureMethod::SeagrassConservation => "seagrass_conservation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaptureMethod::SeaweedFarming => "Seaweed Farming",
            CaptureMethod::BlueMussel => "Blue Mussel Cultivation",
            CaptureMethod::KelpRestoration => "Kelp Forest Restoration",
            CaptureMethod::MangroveProtection => "Mangrove Protection",
            CaptureMethod::SeagrassConservation => "Seagrass Conservation",
        }
    }

    /// Capture band in tCO₂e per observation, `[min, max)`.
    pub fn capture_range(&self) -> (f64, f64) {
        match self {
            CaptureMethod::SeaweedFarming => (0.5, 3.2),
            CaptureMethod::BlueMussel => (0.2, 1.8),
            CaptureMethod::KelpRestoration => (0.8, 4.1),
            CaptureMethod::MangroveProtection => (1.2, 5.5),
            CaptureMethod::SeagrassConservation => (0.3, 2.1),
        }
    }
}

impl FromStr for CaptureMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaptureMethod::ALL
            .iter()
            .copied()
            .find(|m| m.slug() == s.trim())
            .ok_or_else(|| format!("unknown capture method: {}", s))
    }
}

/// MRV review state of an observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Rejected,
}

impl VerificationStatus {
    pub fn slug(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub region_name: String,
    /// Depth in meters
    pub depth_m: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    /// tCO₂e
    pub amount: f64,
    pub method: CaptureMethod,
    pub verification: VerificationStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub temperature_c: f64,
    /// Parts per thousand
    pub salinity_ppt: f64,
    pub ph: f64,
}

/// One carbon capture report from a submitter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: ObservationId,
    pub submitter_id: SubmitterId,
    pub submitter_name: String,
    pub location: Location,
    pub capture: Capture,
    pub timestamp_unix: i64,
    pub equipment: Vec<String>,
    pub environment: Environment,
}

impl Observation {
    pub fn amount(&self) -> f64 {
        self.capture.amount
    }

    pub fn is_verified(&self) -> bool {
        self.capture.verification.is_verified()
    }

    pub fn region(&self) -> &str {
        &self.location.region_name
    }
}
