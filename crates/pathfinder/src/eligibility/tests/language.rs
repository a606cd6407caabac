use super::common::*;
use crate::eligibility::domain::{LanguageScores, LanguageSkill};
use crate::eligibility::language::{CefrLevel, ClbLevel};

#[test]
fn each_skill_uses_its_own_break_points() {
    let standards = tables().language;
    let scores = LanguageScores::new(6.0, 7.0, 6.5, 5.5);

    let clb = standards.clb(&scores);

    assert_eq!(clb.listening, ClbLevel(7));
    assert_eq!(clb.speaking, ClbLevel(9));
    assert_eq!(clb.reading, ClbLevel(8));
    assert_eq!(clb.writing, ClbLevel(6));
    assert_eq!(clb.overall, ClbLevel(6));
}

#[test]
fn same_band_maps_differently_per_skill() {
    let standards = tables().language;

    assert_eq!(
        standards.clb.level_for(LanguageSkill::Listening, Some(8.0)),
        ClbLevel(9)
    );
    assert_eq!(
        standards.clb.level_for(LanguageSkill::Reading, Some(8.0)),
        ClbLevel(10)
    );
    assert_eq!(
        standards.clb.level_for(LanguageSkill::Reading, Some(4.0)),
        ClbLevel(5)
    );
    assert_eq!(
        standards.clb.level_for(LanguageSkill::Listening, Some(4.0)),
        ClbLevel(4)
    );
}

#[test]
fn positive_band_below_every_threshold_earns_the_floor() {
    let standards = tables().language;

    assert_eq!(
        standards.clb.level_for(LanguageSkill::Listening, Some(2.5)),
        ClbLevel(4)
    );
}

#[test]
fn missing_or_zero_bands_count_as_zero() {
    let standards = tables().language;
    let scores = LanguageScores {
        listening: Some(8.0),
        speaking: Some(8.0),
        reading: Some(8.0),
        writing: None,
    };

    let assessment = standards.assess(&scores);

    assert_eq!(assessment.clb.writing, ClbLevel(0));
    assert_eq!(assessment.clb.overall, ClbLevel(0));
    // Mean of 8, 8, 8 and 0.
    assert_eq!(assessment.cefr, CefrLevel::B2);

    assert_eq!(
        standards.clb.level_for(LanguageSkill::Speaking, Some(0.0)),
        ClbLevel(0)
    );
    assert_eq!(
        standards.clb.level_for(LanguageSkill::Speaking, Some(f64::NAN)),
        ClbLevel(0)
    );
}

#[test]
fn cefr_follows_the_mean_band() {
    let standards = tables().language;

    assert_eq!(
        standards.cefr(&LanguageScores::new(7.0, 6.5, 6.5, 6.0)),
        CefrLevel::B2
    );
    assert_eq!(
        standards.cefr(&LanguageScores::new(9.0, 9.0, 8.5, 8.5)),
        CefrLevel::C2
    );
    assert_eq!(
        standards.cefr(&LanguageScores::new(7.0, 7.0, 7.0, 7.0)),
        CefrLevel::C1
    );
    assert_eq!(
        standards.cefr(&LanguageScores::new(4.0, 4.0, 4.0, 3.5)),
        CefrLevel::A2
    );
    assert_eq!(standards.cefr(&LanguageScores::default()), CefrLevel::BelowA1);
}

#[test]
fn levels_render_for_display() {
    assert_eq!(ClbLevel(7).to_string(), "CLB7");
    assert_eq!(CefrLevel::BelowA1.to_string(), "Below A1");
    assert_eq!(
        serde_json::to_value(CefrLevel::BelowA1).expect("serializes"),
        serde_json::json!("Below A1")
    );
}
