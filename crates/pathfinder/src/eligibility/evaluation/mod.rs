mod points;
mod rules;

pub use points::{
    tally, CategoryScore, EducationPoints, PointsRegistry, PointsTable, PointsTally, RangePoints,
    ScoringCategory,
};
pub(crate) use points::shortfall_note;
pub use rules::ClauseVerdict;

use serde::{Deserialize, Serialize};

use super::catalog::{ProgramDefinition, UniversityRankings};
use super::currency::ConversionTable;
use super::domain::ApplicantProfile;
use super::language::LanguageAssessment;
use super::requirements::{Clause, RequirementSpec};

/// Everything a clause may consult while it is checked against one program.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub profile: &'a ApplicantProfile,
    pub language: &'a LanguageAssessment,
    pub conversion: &'a ConversionTable,
    pub rankings: &'a UniversityRankings,
    pub program: &'a ProgramDefinition,
}

/// Pass/fail decision for one requirement specification plus its explanation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementOutcome {
    pub eligible: bool,
    pub notes: Vec<String>,
}

/// Check every top-level clause; each failing clause contributes one note.
///
/// Evaluation does not short-circuit, so an ineligible outcome explains every
/// unmet clause. Advisory notes follow the clause notes whatever the verdict.
pub fn evaluate_requirements(
    spec: &RequirementSpec,
    context: &EvaluationContext<'_>,
) -> RequirementOutcome {
    let mut notes = unmet_notes(&spec.clauses, context);
    let eligible = notes.is_empty();
    notes.extend(spec.advisories.iter().cloned());

    RequirementOutcome { eligible, notes }
}

/// Verdict for a single clause, exposed for callers that explain one rule at a time.
pub fn check_clause(clause: &Clause, context: &EvaluationContext<'_>) -> ClauseVerdict {
    rules::check_clause(clause, context)
}

pub(crate) fn unmet_notes(clauses: &[Clause], context: &EvaluationContext<'_>) -> Vec<String> {
    clauses
        .iter()
        .filter_map(|clause| match rules::check_clause(clause, context) {
            ClauseVerdict::Satisfied => None,
            ClauseVerdict::Unmet(note) => Some(note),
        })
        .collect()
}
