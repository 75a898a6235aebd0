pub mod aggregation;
pub mod bindings;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod heatmap;
pub mod insights;
pub mod models;
pub mod period;
pub mod snapshot;
pub mod submission;
pub mod summary;

uniffi::setup_scaffolding!();

pub use aggregation::{aggregate_by_period, observations_in_bucket, PeriodBucket, TrendReport};
pub use config::GeneratorConfig;
pub use error::{CarbonError, FieldIssue};
pub use generator::generate;
pub use models::{
    Capture, CaptureMethod, Environment, Location, Observation, ObservationId, SubmitterId,
    VerificationStatus,
};
pub use period::Period;
pub use snapshot::DashboardSnapshot;
pub use submission::{validate_submission, SubmissionForm, ValidatedSubmission};
pub use summary::{MethodCapture, Summary};
