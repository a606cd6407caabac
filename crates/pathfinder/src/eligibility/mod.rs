//! Eligibility and scoring engine.
//!
//! A profile flows bottom-up: language levels and currency conversion first, then
//! per-program requirement checks and points, then aggregation and ranking. Every
//! step is synchronous and side-effect free apart from logging.

pub mod catalog;
pub mod currency;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod language;
mod normalizer;
pub mod ranking;
pub mod requirements;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use catalog::{
    Catalog, CatalogError, DatasetVersion, JurisdictionDataset, ProgramCategory,
    ProgramDefinition, ReferenceTables, SelectionFactors, UniversityRankings,
};
pub use currency::{format_money, Conversion, ConversionTable, RateSource};
pub use domain::{
    Achievement, ApplicantProfile, BusinessIntent, CurrencyCode, EducationLevel, Graduation,
    InvestmentIntent, LanguageScores, LanguageSkill, Money,
};
pub use evaluation::{
    evaluate_requirements, EvaluationContext, PointsRegistry, PointsTable, PointsTally,
    RequirementOutcome,
};
pub use intake::{IntakeError, ProfileIntake, ProfileSubmission};
pub use language::{CefrLevel, ClbBreakdown, ClbLevel, LanguageAssessment, LanguageStandards};
pub use ranking::{
    AssessmentReport, EligibilityResult, ProgramAssessment, ProgramDefect, RejectedProgram,
    SkippedProgram,
};
pub use requirements::{Clause, RequirementSpec};
pub use router::eligibility_router;
pub use service::{EligibilityService, EligibilityServiceError};

/// Evaluates profiles against program definitions using shared reference tables.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    tables: Arc<ReferenceTables>,
}

impl EligibilityEngine {
    pub fn new(tables: ReferenceTables) -> Self {
        Self::from_shared(Arc::new(tables))
    }

    pub fn from_shared(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    /// Engine backed by the tables compiled into the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(Self::new(ReferenceTables::bundled()?))
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn language_levels(&self, profile: &ApplicantProfile) -> LanguageAssessment {
        self.tables.language.assess(&profile.language)
    }

    /// Ranked eligible programs for `profile`.
    pub fn eligible_programs(
        &self,
        profile: &ApplicantProfile,
        programs: &[ProgramDefinition],
    ) -> Vec<EligibilityResult> {
        self.assess(profile, programs).results
    }

    /// Evaluate every program once and split the outcomes for reporting.
    pub fn assess(
        &self,
        profile: &ApplicantProfile,
        programs: &[ProgramDefinition],
    ) -> AssessmentReport {
        let language = self.language_levels(profile);
        let mut report = AssessmentReport {
            language,
            results: Vec::new(),
            rejected: Vec::new(),
            skipped: Vec::new(),
            not_considered: Vec::new(),
        };

        for program in programs {
            if !ranking::is_considered(program.category, profile) {
                report.not_considered.push(program.id.clone());
                continue;
            }

            let assessment = match self.assess_program(program, profile, &language) {
                Ok(assessment) => assessment,
                Err(defect) => {
                    warn!(program = %program.id, error = %defect, "skipping malformed program");
                    report.skipped.push(SkippedProgram {
                        program_id: program.id.clone(),
                        name: program.name.clone(),
                        reason: defect.to_string(),
                    });
                    continue;
                }
            };

            debug!(
                program = %program.id,
                eligible = assessment.eligible,
                points = ?assessment.points.as_ref().map(|tally| tally.total),
                "program evaluated"
            );

            if assessment.eligible {
                report
                    .results
                    .push(EligibilityResult::new(program, assessment, &language));
            } else {
                report.rejected.push(RejectedProgram {
                    program_id: program.id.clone(),
                    name: program.name.clone(),
                    country: program.country.clone(),
                    points: assessment.points.map(|tally| tally.total),
                    notes: assessment.notes,
                });
            }
        }

        ranking::rank(&mut report.results);

        info!(
            programs = programs.len(),
            eligible = report.results.len(),
            rejected = report.rejected.len(),
            skipped = report.skipped.len(),
            clb = %language.clb.overall,
            cefr = %language.cefr,
            "eligibility assessment complete"
        );

        report
    }

    /// Requirement check followed, for eligible points-based programs, by scoring.
    pub fn assess_program(
        &self,
        program: &ProgramDefinition,
        profile: &ApplicantProfile,
        language: &LanguageAssessment,
    ) -> Result<ProgramAssessment, ProgramDefect> {
        let spec = program
            .requirements
            .as_ref()
            .ok_or(ProgramDefect::MissingRequirements)?;

        let scoring = if program.is_points_based {
            let factors = program
                .selection_factors
                .as_ref()
                .ok_or(ProgramDefect::MissingSelectionFactors)?;
            let table = self
                .tables
                .points
                .get(&factors.points_table)
                .ok_or_else(|| ProgramDefect::UnknownPointsTable(factors.points_table.clone()))?;
            Some((factors, table))
        } else {
            None
        };

        let context = EvaluationContext {
            profile,
            language,
            conversion: &self.tables.conversion,
            rankings: &self.tables.rankings,
            program,
        };
        let outcome = evaluate_requirements(spec, &context);

        let (factors, table) = match scoring {
            Some(scoring) if outcome.eligible => scoring,
            _ => {
                return Ok(ProgramAssessment {
                    eligible: outcome.eligible,
                    points: None,
                    notes: outcome.notes,
                })
            }
        };

        let tally = evaluation::tally(table, factors, profile, language);
        let mut notes = outcome.notes;
        let eligible = match evaluation::shortfall_note(&tally, factors, &program.name) {
            Some(note) => {
                notes.insert(0, note);
                false
            }
            None => true,
        };

        Ok(ProgramAssessment {
            eligible,
            points: Some(tally),
            notes,
        })
    }
}
