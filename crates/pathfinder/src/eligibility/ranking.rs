use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::catalog::{ProgramCategory, ProgramDefinition};
use super::domain::ApplicantProfile;
use super::evaluation::{CategoryScore, PointsTally};
use super::language::{CefrLevel, ClbLevel, LanguageAssessment};

/// Why a catalog entry could not be evaluated at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgramDefect {
    #[error("program has no requirement specification")]
    MissingRequirements,
    #[error("points-based program has no selection factors")]
    MissingSelectionFactors,
    #[error("unknown points table '{0}'")]
    UnknownPointsTable(String),
}

/// Verdict for one program before it is split into results and rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramAssessment {
    pub eligible: bool,
    pub points: Option<PointsTally>,
    pub notes: Vec<String>,
}

/// An eligible program, annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub program: ProgramDefinition,
    /// `None` when the program is not points-based.
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points_breakdown: Vec<CategoryScore>,
    pub notes: Vec<String>,
    pub user_clb: ClbLevel,
    pub user_cefr: CefrLevel,
}

impl EligibilityResult {
    pub(crate) fn new(
        program: &ProgramDefinition,
        assessment: ProgramAssessment,
        language: &LanguageAssessment,
    ) -> Self {
        let (points, points_breakdown) = match assessment.points {
            Some(tally) => (Some(tally.total), tally.breakdown),
            None => (None, Vec::new()),
        };

        Self {
            program: program.clone(),
            points,
            points_breakdown,
            notes: assessment.notes,
            user_clb: language.clb.overall,
            user_cefr: language.cefr,
        }
    }

    /// Notes joined for display; an empty list reads "no notes".
    pub fn notes_summary(&self) -> String {
        if self.notes.is_empty() {
            "no notes".to_string()
        } else {
            self.notes.join("; ")
        }
    }
}

/// A considered program the applicant does not qualify for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedProgram {
    pub program_id: String,
    pub name: String,
    pub country: String,
    pub points: Option<u32>,
    pub notes: Vec<String>,
}

/// A malformed catalog entry left out of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedProgram {
    pub program_id: String,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub language: LanguageAssessment,
    pub results: Vec<EligibilityResult>,
    pub rejected: Vec<RejectedProgram>,
    pub skipped: Vec<SkippedProgram>,
    /// Programs outside the applicant's declared interests.
    pub not_considered: Vec<String>,
}

impl AssessmentReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Interest-specific categories are only evaluated when the applicant asked for them.
pub fn is_considered(category: ProgramCategory, profile: &ApplicantProfile) -> bool {
    match category {
        ProgramCategory::SkilledWorker | ProgramCategory::HighProfessional => true,
        ProgramCategory::Investment => profile.investment.is_some(),
        ProgramCategory::Entrepreneur => profile.business.is_some(),
        ProgramCategory::ExtraordinaryAbility => profile.extraordinary_ability,
        ProgramCategory::GraduateStudent => profile.higher_education,
    }
}

/// Jurisdiction ascending, then points descending; ties keep catalog order.
pub fn rank(results: &mut [EligibilityResult]) {
    results.sort_by(compare_results);
}

fn compare_results(left: &EligibilityResult, right: &EligibilityResult) -> Ordering {
    left.program
        .country
        .cmp(&right.program.country)
        .then_with(|| {
            right
                .points
                .unwrap_or_default()
                .cmp(&left.points.unwrap_or_default())
        })
}
