//! Sanity checks over the data sets compiled into the crate.

use std::collections::HashSet;

use pathfinder::eligibility::{
    ApplicantProfile, Catalog, EligibilityEngine, EligibilityService, JurisdictionDataset,
    ProgramDefinition, ReferenceTables,
};

#[test]
fn every_bundled_program_is_well_formed() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    let engine = EligibilityEngine::bundled().expect("bundled tables parse");
    let profile = ApplicantProfile::default();
    let language = engine.language_levels(&profile);

    for program in catalog.programs() {
        engine
            .assess_program(program, &profile, &language)
            .unwrap_or_else(|defect| panic!("{} is malformed: {defect}", program.id));
    }
}

#[test]
fn program_ids_are_unique() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    let mut seen = HashSet::new();

    for program in catalog.programs() {
        assert!(seen.insert(program.id.as_str()), "duplicate id {}", program.id);
    }
}

#[test]
fn versions_describe_each_jurisdiction() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    let versions = catalog.versions();

    let jurisdictions: Vec<&str> = versions.iter().map(|v| v.jurisdiction.as_str()).collect();
    assert_eq!(
        jurisdictions,
        vec!["Canada", "United Kingdom", "USA", "Ireland"]
    );
    assert_eq!(
        versions.iter().map(|v| v.programs).sum::<usize>(),
        catalog.len()
    );
}

#[test]
fn country_filter_matches_names_and_codes() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");

    assert_eq!(catalog.in_country("US").count(), 13);
    assert_eq!(catalog.in_country("usa").count(), 13);
    assert_eq!(catalog.in_country("United  Kingdom").count(), 5);
    assert_eq!(catalog.in_country("Narnia").count(), 0);
}

#[test]
fn country_listing_outlives_the_query_string() {
    let service = EligibilityService::new(
        EligibilityEngine::bundled().expect("bundled tables parse"),
        Catalog::bundled().expect("bundled catalog parses"),
    );

    let irish: Vec<&ProgramDefinition> = {
        let query = String::from("  IRL ");
        service.programs(Some(query.as_str()))
    };

    assert_eq!(irish.len(), 5);
    assert!(irish.iter().all(|program| program.country == "Ireland"));
    assert_eq!(service.programs(None).len(), service.catalog().len());
}

#[test]
fn reference_tables_cover_every_named_points_table() {
    let catalog = Catalog::bundled().expect("bundled catalog parses");
    let tables = ReferenceTables::bundled().expect("bundled tables parse");

    for program in catalog.programs().iter().filter(|p| p.is_points_based) {
        let factors = program
            .selection_factors
            .as_ref()
            .expect("points programs declare selection factors");
        assert!(
            tables.points.get(&factors.points_table).is_some(),
            "{} names unknown table {}",
            program.id,
            factors.points_table
        );
    }
}

#[test]
fn dataset_parse_errors_name_the_dataset() {
    let error = JurisdictionDataset::from_json("atlantis", "{ \"jurisdiction\": ")
        .expect_err("truncated json is rejected");

    assert!(error.to_string().contains("atlantis"));
}
