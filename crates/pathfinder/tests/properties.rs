//! Property-based checks for the scoring and evaluation invariants.

use pathfinder::eligibility::requirements::LanguageClause;
use pathfinder::eligibility::{
    ApplicantProfile, Catalog, Clause, ClbLevel, CurrencyCode, EligibilityEngine,
    LanguageScores, LanguageSkill, Money, ProgramCategory, ProgramDefinition, ReferenceTables,
    RequirementSpec,
};
use proptest::prelude::*;

fn clb_program(level: ClbLevel) -> ProgramDefinition {
    ProgramDefinition {
        id: "clb-check".to_string(),
        name: "CLB check".to_string(),
        country: "Canada".to_string(),
        country_code: "CA".to_string(),
        category: ProgramCategory::SkilledWorker,
        is_points_based: false,
        official_website: None,
        requirements: Some(RequirementSpec::new(vec![Clause::Language(
            LanguageClause::ClbMinimum { level },
        )])),
        selection_factors: None,
    }
}

fn band() -> impl Strategy<Value = f64> {
    (0u32..=18).prop_map(|half_steps| f64::from(half_steps) / 2.0)
}

fn skill() -> impl Strategy<Value = LanguageSkill> {
    prop_oneof![
        Just(LanguageSkill::Listening),
        Just(LanguageSkill::Speaking),
        Just(LanguageSkill::Reading),
        Just(LanguageSkill::Writing),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn clb_level_never_drops_as_band_rises(skill in skill(), low in band(), step in band()) {
        let tables = ReferenceTables::bundled().expect("bundled tables parse");
        let high = (low + step).min(9.0);

        let lower = tables.language.clb.level_for(skill, Some(low));
        let higher = tables.language.clb.level_for(skill, Some(high));

        prop_assert!(lower <= higher, "{skill:?}: {low} -> {lower}, {high} -> {higher}");
        prop_assert!(higher <= ClbLevel(10));
    }

    #[test]
    fn overall_clb_is_the_weakest_skill(
        listening in band(),
        speaking in band(),
        reading in band(),
        writing in band(),
    ) {
        let tables = ReferenceTables::bundled().expect("bundled tables parse");
        let breakdown = tables
            .language
            .clb(&LanguageScores::new(listening, speaking, reading, writing));

        let weakest = [
            breakdown.listening,
            breakdown.speaking,
            breakdown.reading,
            breakdown.writing,
        ]
        .into_iter()
        .min()
        .expect("four skills");
        prop_assert_eq!(breakdown.overall, weakest);
    }

    #[test]
    fn raising_salary_never_loses_eligibility(salary in 0u32..120_000, raise in 0u32..50_000) {
        let engine = EligibilityEngine::bundled().expect("bundled tables parse");
        let catalog = Catalog::bundled().expect("bundled catalog parses");
        let program = catalog.get("uk-swv").expect("uk skilled worker bundled");
        let mut profile = ApplicantProfile {
            language: LanguageScores::new(7.0, 7.0, 7.0, 7.0),
            annual_salary: Some(Money::new(f64::from(salary), "GBP")),
            ..ApplicantProfile::default()
        };
        let language = engine.language_levels(&profile);

        let before = engine
            .assess_program(program, &profile, &language)
            .expect("program is well formed");
        profile.annual_salary = Some(Money::new(f64::from(salary + raise), "GBP"));
        let after = engine
            .assess_program(program, &profile, &language)
            .expect("program is well formed");

        prop_assert!(!before.eligible || after.eligible);
    }

    #[test]
    fn requiring_the_computed_clb_passes(
        listening in band(),
        speaking in band(),
        reading in band(),
        writing in band(),
    ) {
        let engine = EligibilityEngine::bundled().expect("bundled tables parse");
        let profile = ApplicantProfile {
            language: LanguageScores::new(listening, speaking, reading, writing),
            ..ApplicantProfile::default()
        };
        let language = engine.language_levels(&profile);

        let exact = engine
            .assess_program(&clb_program(language.clb.overall), &profile, &language)
            .expect("program is well formed");
        prop_assert!(exact.eligible);

        let above = ClbLevel(language.clb.overall.0 + 1);
        let stricter = engine
            .assess_program(&clb_program(above), &profile, &language)
            .expect("program is well formed");
        prop_assert!(!stricter.eligible);
    }

    #[test]
    fn more_experience_never_loses_eligibility(years in 0u32..20, extra in 0u32..10) {
        let engine = EligibilityEngine::bundled().expect("bundled tables parse");
        let catalog = Catalog::bundled().expect("bundled catalog parses");
        let program = catalog
            .get("us-eb3-skilledWorkers")
            .expect("eb3 skilled workers bundled");
        let mut profile = ApplicantProfile {
            work_experience_years: Some(years),
            ..ApplicantProfile::default()
        };
        let language = engine.language_levels(&profile);

        let before = engine
            .assess_program(program, &profile, &language)
            .expect("program is well formed");
        profile.work_experience_years = Some(years + extra);
        let after = engine
            .assess_program(program, &profile, &language)
            .expect("program is well formed");

        prop_assert!(!before.eligible || after.eligible);
    }

    #[test]
    fn same_currency_conversion_is_identity(amount in 0.0f64..1e9, code in "(USD|GBP|EUR|CAD|CNY|JPY)") {
        let tables = ReferenceTables::bundled().expect("bundled tables parse");
        let currency = CurrencyCode::new(&code);

        let conversion = tables.conversion.convert(amount, &currency, &currency);

        prop_assert_eq!(conversion.amount, amount);
        prop_assert!(!conversion.is_degraded());
    }

    #[test]
    fn assessment_is_deterministic(age in 18u32..60, years in 0u32..15, paid in any::<bool>()) {
        let engine = EligibilityEngine::bundled().expect("bundled tables parse");
        let catalog = Catalog::bundled().expect("bundled catalog parses");
        let profile = ApplicantProfile {
            age: Some(age),
            work_experience_years: Some(years),
            paid_work: paid,
            language: LanguageScores::new(6.5, 6.5, 6.5, 6.5),
            ..ApplicantProfile::default()
        };

        let first = engine.assess(&profile, catalog.programs());
        let second = engine.assess(&profile, catalog.programs());

        prop_assert_eq!(first, second);
    }
}
