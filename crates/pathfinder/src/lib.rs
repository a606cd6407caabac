//! Immigration program eligibility and scoring engine.
//!
//! [`eligibility`] holds the engine and its HTTP router; the remaining modules are the
//! ambient configuration, error and telemetry layers shared with the service binary.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;

pub use eligibility::{
    AssessmentReport, Catalog, EligibilityEngine, EligibilityResult, EligibilityService,
    ReferenceTables,
};
pub use error::AppError;
