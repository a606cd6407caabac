use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::eligibility::catalog::{
    Catalog, ProgramCategory, ProgramDefinition, ReferenceTables, SelectionFactors,
};
use crate::eligibility::domain::{ApplicantProfile, EducationLevel, LanguageScores, Money};
use crate::eligibility::evaluation::{evaluate_requirements, EvaluationContext, RequirementOutcome};
use crate::eligibility::language::ClbLevel;
use crate::eligibility::requirements::{Clause, LevelPoints, RequirementSpec};
use crate::eligibility::service::EligibilityService;
use crate::eligibility::EligibilityEngine;

pub(super) fn tables() -> ReferenceTables {
    ReferenceTables::bundled().expect("bundled reference tables parse")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(tables())
}

pub(super) fn bundled_catalog() -> Catalog {
    Catalog::bundled().expect("bundled catalog parses")
}

pub(super) fn service() -> Arc<EligibilityService> {
    Arc::new(EligibilityService::new(engine(), bundled_catalog()))
}

/// Scenario profile: bachelor's degree, two years of work, IELTS 7/6.5/6.5/6.
pub(super) fn skilled_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: Some(30),
        education: Some(EducationLevel::BachelorsThreeYear),
        work_experience_years: Some(2),
        paid_work: true,
        work_locations: ["China".to_string()].into_iter().collect(),
        annual_salary: Some(Money::new(40_000.0, "GBP")),
        language: LanguageScores::new(7.0, 6.5, 6.5, 6.0),
        ..ApplicantProfile::default()
    }
}

pub(super) fn program(
    id: &str,
    country: &str,
    country_code: &str,
    category: ProgramCategory,
    clauses: Vec<Clause>,
) -> ProgramDefinition {
    ProgramDefinition {
        id: id.to_string(),
        name: format!("{id} program"),
        country: country.to_string(),
        country_code: country_code.to_string(),
        category,
        is_points_based: false,
        official_website: None,
        requirements: Some(RequirementSpec::new(clauses)),
        selection_factors: None,
    }
}

pub(super) fn points_program(
    id: &str,
    min_points: u32,
    table: &str,
    clauses: Vec<Clause>,
) -> ProgramDefinition {
    let mut program = program(id, "Canada", "CA", ProgramCategory::SkilledWorker, clauses);
    program.is_points_based = true;
    program.selection_factors = Some(SelectionFactors {
        min_points,
        points_table: table.to_string(),
        language_points: vec![
            LevelPoints {
                level: ClbLevel(7),
                points: 16,
            },
            LevelPoints {
                level: ClbLevel(8),
                points: 20,
            },
            LevelPoints {
                level: ClbLevel(9),
                points: 24,
            },
        ],
    });
    program
}

/// Run the requirement evaluator for one ad-hoc program.
pub(super) fn evaluate(
    tables: &ReferenceTables,
    program: &ProgramDefinition,
    profile: &ApplicantProfile,
) -> RequirementOutcome {
    let language = tables.language.assess(&profile.language);
    let context = EvaluationContext {
        profile,
        language: &language,
        conversion: &tables.conversion,
        rankings: &tables.rankings,
        program,
    };
    let spec = program
        .requirements
        .as_ref()
        .expect("fixture programs carry requirements");
    evaluate_requirements(spec, &context)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body collects");
    serde_json::from_slice(&bytes).expect("body is json")
}
