//! Intake of producer-submitted observations.
//!
//! The form delivers every numeric field as text. Fields are parsed with
//! nom, range-checked, and all problems are reported together.

use nom::{
    character::complete::multispace0,
    combinator::all_consuming,
    number::complete::double,
    sequence::delimited,
    IResult, Parser,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{find_region, is_known_equipment};
use crate::error::{CarbonError, FieldIssue};
use crate::models::{
    Capture, CaptureMethod, Environment, Location, Observation, ObservationId, SubmitterId,
    VerificationStatus,
};

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
pub const DEPTH_LIMITS_M: (f64, f64) = (5.0, 200.0);
pub const PH_LIMITS: (f64, f64) = (0.0, 14.0);

/// Raw form input as typed by the producer.
///
/// Rejected fields are reported under the same camelCase keys the form
/// serializes with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionForm {
    pub latitude: String,
    pub longitude: String,
    pub region_name: String,
    pub depth_m: String,
    pub amount: String,
    pub method: String,
    pub description: String,
    pub equipment: Vec<String>,
    pub temperature_c: String,
    pub salinity_ppt: String,
    pub ph: String,
}

/// A submission that passed validation, ready for MRV review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedSubmission {
    pub location: Location,
    pub amount: f64,
    pub method: CaptureMethod,
    pub description: String,
    pub equipment: Vec<String>,
    pub temperature_c: Option<f64>,
    pub salinity_ppt: Option<f64>,
    pub ph: Option<f64>,
}

fn decimal(input: &str) -> IResult<&str, f64> {
    delimited(multispace0, double, multispace0).parse(input)
}

/// Parse a whole field as one finite decimal number.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    all_consuming(decimal)
        .parse(raw)
        .ok()
        .map(|(_, value)| value)
        .filter(|value| value.is_finite())
}

#[derive(Default)]
struct FieldChecker {
    issues: Vec<FieldIssue>,
}

impl FieldChecker {
    fn reject(&mut self, field: &str, reason: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, reason));
    }

    fn number(&mut self, field: &str, raw: &str, required: bool) -> Option<f64> {
        if raw.trim().is_empty() {
            if required {
                self.reject(field, "required");
            }
            return None;
        }
        let value = parse_decimal(raw);
        if value.is_none() {
            self.reject(field, format!("'{}' is not a number", raw.trim()));
        }
        value
    }

    fn within(&mut self, field: &str, value: Option<f64>, (min, max): (f64, f64)) -> Option<f64> {
        let value = value?;
        if value < min || value > max {
            self.reject(field, format!("must be between {} and {}", min, max));
            return None;
        }
        Some(value)
    }

    fn at_least(&mut self, field: &str, value: Option<f64>, min: f64) -> Option<f64> {
        let value = value?;
        if value < min {
            self.reject(field, format!("must be at least {}", min));
            return None;
        }
        Some(value)
    }

    fn finish(self) -> Result<(), CarbonError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(CarbonError::InvalidSubmission {
                issues: self.issues,
            })
        }
    }
}

/// Validate a form, reporting every offending field at once.
pub fn validate_submission(form: &SubmissionForm) -> Result<ValidatedSubmission, CarbonError> {
    let mut check = FieldChecker::default();

    let lat = check.number("latitude", &form.latitude, true);
    let lat = check.within("latitude", lat, LATITUDE_RANGE);
    let lng = check.number("longitude", &form.longitude, true);
    let lng = check.within("longitude", lng, LONGITUDE_RANGE);

    let region_name = form.region_name.trim();
    let region = if region_name.is_empty() {
        check.reject("regionName", "required");
        None
    } else if let Some(region) = find_region(region_name) {
        Some(region)
    } else {
        check.reject("regionName", format!("unknown region '{}'", region_name));
        None
    };

    let depth = check.number("depthM", &form.depth_m, true);
    let depth = check.within("depthM", depth, DEPTH_LIMITS_M);
    let amount = check.number("amount", &form.amount, true);
    let amount = check.at_least("amount", amount, 0.0);

    let method = if form.method.trim().is_empty() {
        check.reject("method", "required");
        None
    } else {
        match form.method.parse::<CaptureMethod>() {
            Ok(method) => Some(method),
            Err(reason) => {
                check.reject("method", reason);
                None
            }
        }
    };

    let unknown: Vec<&str> = form
        .equipment
        .iter()
        .map(|item| item.as_str())
        .filter(|item| !is_known_equipment(item))
        .collect();
    if !unknown.is_empty() {
        check.reject("equipment", format!("unknown items: {}", unknown.join(", ")));
    }

    let temperature_c = check.number("temperatureC", &form.temperature_c, false);
    let salinity_ppt = check.number("salinityPpt", &form.salinity_ppt, false);
    let salinity_ppt = check.at_least("salinityPpt", salinity_ppt, 0.0);
    let ph = check.number("ph", &form.ph, false);
    let ph = check.within("ph", ph, PH_LIMITS);

    if !check.issues.is_empty() {
        let fields: Vec<&str> = check.issues.iter().map(|i| i.field.as_str()).collect();
        tracing::info!(fields = ?fields, "submission rejected");
    }
    check.finish()?;

    // finish() only succeeds when every required field produced a value.
    match (lat, lng, region, depth, amount, method) {
        (Some(lat), Some(lng), Some(region), Some(depth_m), Some(amount), Some(method)) => {
            Ok(ValidatedSubmission {
                location: Location {
                    lat,
                    lng,
                    region_name: region.name.to_string(),
                    depth_m,
                },
                amount,
                method,
                description: form.description.trim().to_string(),
                equipment: form.equipment.clone(),
                temperature_c,
                salinity_ppt,
                ph,
            })
        }
        _ => Err(CarbonError::InvalidSubmission {
            issues: vec![FieldIssue::new("form", "incomplete")],
        }),
    }
}

impl ValidatedSubmission {
    /// Turn the submission into a pending observation for MRV review.
    ///
    /// Environment readings are required at this point. `Observation` has no
    /// free-text field, so `description` is not carried over.
    pub fn into_observation(
        self,
        id: ObservationId,
        submitter_id: SubmitterId,
        submitter_name: String,
        timestamp_unix: i64,
    ) -> Result<Observation, CarbonError> {
        let mut check = FieldChecker::default();
        for (field, value) in [
            ("temperatureC", self.temperature_c),
            ("salinityPpt", self.salinity_ppt),
            ("ph", self.ph),
        ] {
            if value.is_none() {
                check.reject(field, "required for review");
            }
        }
        check.finish()?;

        let environment = match (self.temperature_c, self.salinity_ppt, self.ph) {
            (Some(temperature_c), Some(salinity_ppt), Some(ph)) => Environment {
                temperature_c,
                salinity_ppt,
                ph,
            },
            _ => {
                return Err(CarbonError::InvalidSubmission {
                    issues: vec![FieldIssue::new("environment", "incomplete")],
                })
            }
        };

        tracing::debug!(id = %id.0, submitter = %submitter_id, "submission queued for review");

        Ok(Observation {
            id,
            submitter_id,
            submitter_name,
            location: self.location,
            capture: Capture {
                amount: self.amount,
                method: self.method,
                verification: VerificationStatus::Pending,
            },
            timestamp_unix,
            equipment: self.equipment,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SubmissionForm {
        SubmissionForm {
            latitude: "59.123456".to_string(),
            longitude: " -18.5 ".to_string(),
            region_name: "North Atlantic".to_string(),
            depth_m: "42".to_string(),
            amount: "2.75".to_string(),
            method: "kelp_restoration".to_string(),
            description: "  Kelp line inspection  ".to_string(),
            equipment: vec!["GPS tracker".to_string(), "pH probe".to_string()],
            temperature_c: "11.5".to_string(),
            salinity_ppt: "35".to_string(),
            ph: "8.1".to_string(),
        }
    }

    fn issue_fields(err: CarbonError) -> Vec<String> {
        match err {
            CarbonError::InvalidSubmission { issues } => {
                issues.into_iter().map(|i| i.field).collect()
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal(" -3.5 "), Some(-3.5));
        assert_eq!(parse_decimal("1e2"), Some(100.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("12abc"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn test_valid_submission() {
        let v = validate_submission(&valid_form()).unwrap();
        assert_eq!(v.location.lat, 59.123456);
        assert_eq!(v.location.lng, -18.5);
        assert_eq!(v.location.region_name, "North Atlantic");
        assert_eq!(v.location.depth_m, 42.0);
        assert_eq!(v.amount, 2.75);
        assert_eq!(v.method, CaptureMethod::KelpRestoration);
        assert_eq!(v.description, "Kelp line inspection");
        assert_eq!(v.ph, Some(8.1));
    }

    #[test]
    fn test_optional_environment() {
        let form = SubmissionForm {
            temperature_c: String::new(),
            salinity_ppt: "  ".to_string(),
            ph: String::new(),
            ..valid_form()
        };
        let v = validate_submission(&form).unwrap();
        assert_eq!(v.temperature_c, None);
        assert_eq!(v.salinity_ppt, None);
        assert_eq!(v.ph, None);
    }

    #[test]
    fn test_missing_required_fields_all_reported() {
        let err = validate_submission(&SubmissionForm::default()).unwrap_err();
        assert_eq!(
            issue_fields(err),
            vec!["latitude", "longitude", "regionName", "depthM", "amount", "method"]
        );
    }

    #[test]
    fn test_out_of_range_values() {
        let form = SubmissionForm {
            latitude: "91".to_string(),
            longitude: "-180.5".to_string(),
            depth_m: "3".to_string(),
            amount: "-0.1".to_string(),
            ph: "15".to_string(),
            ..valid_form()
        };
        let err = validate_submission(&form).unwrap_err();
        assert_eq!(
            issue_fields(err),
            vec!["latitude", "longitude", "depthM", "amount", "ph"]
        );
    }

    #[test]
    fn test_depth_bounds_inclusive() {
        for depth in ["5", "200"] {
            let form = SubmissionForm {
                depth_m: depth.to_string(),
                ..valid_form()
            };
            assert!(validate_submission(&form).is_ok(), "depth {depth}");
        }
    }

    #[test]
    fn test_unknown_catalog_values() {
        let form = SubmissionForm {
            region_name: "Lake Geneva".to_string(),
            method: "deep_trawling".to_string(),
            equipment: vec!["GPS tracker".to_string(), "Harpoon".to_string()],
            amount: "two".to_string(),
            ..valid_form()
        };
        let err = validate_submission(&form).unwrap_err();
        assert!(err.to_string().contains("unknown region 'Lake Geneva'"));
        assert!(err.to_string().contains("Harpoon"));
        assert_eq!(
            issue_fields(err),
            vec!["regionName", "amount", "method", "equipment"]
        );
    }

    #[test]
    fn test_into_pending_observation() {
        let v = validate_submission(&valid_form()).unwrap();
        let obs = v
            .into_observation(
                ObservationId("F001-new".to_string()),
                SubmitterId("F001".to_string()),
                "Captain Erik Nordström".to_string(),
                1_710_000_000,
            )
            .unwrap();
        assert_eq!(obs.capture.verification, VerificationStatus::Pending);
        assert_eq!(obs.capture.amount, 2.75);
        assert_eq!(obs.environment.salinity_ppt, 35.0);
        assert_eq!(obs.equipment.len(), 2);
    }

    #[test]
    fn test_issue_fields_are_form_json_keys() {
        let form = SubmissionForm {
            latitude: "x".to_string(),
            longitude: "x".to_string(),
            region_name: "Nowhere".to_string(),
            depth_m: "x".to_string(),
            amount: "x".to_string(),
            method: "x".to_string(),
            description: String::new(),
            equipment: vec!["x".to_string()],
            temperature_c: "x".to_string(),
            salinity_ppt: "x".to_string(),
            ph: "x".to_string(),
        };
        let fields = issue_fields(validate_submission(&form).unwrap_err());
        assert_eq!(fields.len(), 10);

        let json = serde_json::to_value(&form).unwrap();
        for field in &fields {
            assert!(json.get(field).is_some(), "{field} is not a form key");
        }
    }

    #[test]
    fn test_into_observation_drops_description() {
        let v = validate_submission(&valid_form()).unwrap();
        assert_eq!(v.description, "Kelp line inspection");
        let obs = v
            .into_observation(
                ObservationId("F001-new".to_string()),
                SubmitterId("F001".to_string()),
                "Captain Erik Nordström".to_string(),
                1_710_000_000,
            )
            .unwrap();
        let json = serde_json::to_value(&obs).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_into_observation_requires_environment() {
        let form = SubmissionForm {
            temperature_c: String::new(),
            ph: String::new(),
            ..valid_form()
        };
        let v = validate_submission(&form).unwrap();
        let err = v
            .into_observation(
                ObservationId("F001-new".to_string()),
                SubmitterId("F001".to_string()),
                "Captain Erik Nordström".to_string(),
                1_710_000_000,
            )
            .unwrap_err();
        assert_eq!(issue_fields(err), vec!["temperatureC", "ph"]);
    }
}
