use std::sync::Arc;

use super::catalog::{Catalog, ProgramDefinition};
use super::domain::ApplicantProfile;
use super::intake::{IntakeError, ProfileIntake, ProfileSubmission};
use super::ranking::AssessmentReport;
use super::EligibilityEngine;

/// Service composing profile intake, the engine and one catalog.
#[derive(Debug, Clone)]
pub struct EligibilityService {
    intake: Arc<ProfileIntake>,
    engine: Arc<EligibilityEngine>,
    catalog: Arc<Catalog>,
}

impl EligibilityService {
    pub fn new(engine: EligibilityEngine, catalog: Catalog) -> Self {
        Self::with_intake(ProfileIntake::default(), engine, catalog)
    }

    pub fn with_intake(intake: ProfileIntake, engine: EligibilityEngine, catalog: Catalog) -> Self {
        Self {
            intake: Arc::new(intake),
            engine: Arc::new(engine),
            catalog: Arc::new(catalog),
        }
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Normalise a raw submission and assess it against the whole catalog.
    pub fn evaluate(
        &self,
        submission: ProfileSubmission,
    ) -> Result<AssessmentReport, EligibilityServiceError> {
        let profile = self.intake.profile_from_submission(submission)?;
        Ok(self.evaluate_profile(&profile))
    }

    pub fn evaluate_profile(&self, profile: &ApplicantProfile) -> AssessmentReport {
        self.engine.assess(profile, self.catalog.programs())
    }

    /// Catalog listing, optionally narrowed to one jurisdiction (name or code).
    pub fn programs(&self, country: Option<&str>) -> Vec<&ProgramDefinition> {
        match country.map(str::trim).filter(|country| !country.is_empty()) {
            Some(country) => self.catalog.in_country(country).collect(),
            None => self.catalog.programs().iter().collect(),
        }
    }

    pub fn program(&self, id: &str) -> Result<&ProgramDefinition, EligibilityServiceError> {
        self.catalog
            .get(id)
            .ok_or_else(|| EligibilityServiceError::UnknownProgram(id.to_string()))
    }
}

/// Error raised by the eligibility service.
#[derive(Debug, thiserror::Error)]
pub enum EligibilityServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error("unknown program '{0}'")]
    UnknownProgram(String),
}
