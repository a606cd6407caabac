use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::eligibility::catalog::SelectionFactors;
use crate::eligibility::domain::{ApplicantProfile, EducationLevel};
use crate::eligibility::language::LanguageAssessment;
use crate::eligibility::requirements::LevelPoints;

/// Points for a value inside `min..=max`; a missing `max` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePoints {
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
    pub points: u32,
}

impl RangePoints {
    fn contains(&self, value: u32) -> bool {
        value >= self.min && self.max.map(|max| value <= max).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationPoints {
    pub level: EducationLevel,
    pub points: u32,
}

/// Category lookup tables shared by every program that names this table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsTable {
    pub age: Vec<RangePoints>,
    pub education: Vec<EducationPoints>,
    pub experience: Vec<RangePoints>,
}

impl PointsTable {
    pub fn age_points(&self, age: Option<u32>) -> u32 {
        range_lookup(&self.age, age)
    }

    pub fn education_points(&self, level: Option<EducationLevel>) -> u32 {
        level
            .and_then(|level| self.education.iter().find(|entry| entry.level == level))
            .map(|entry| entry.points)
            .unwrap_or(0)
    }

    pub fn experience_points(&self, years: Option<u32>) -> u32 {
        range_lookup(&self.experience, years)
    }
}

fn range_lookup(bands: &[RangePoints], value: Option<u32>) -> u32 {
    value
        .and_then(|value| bands.iter().find(|band| band.contains(value)))
        .map(|band| band.points)
        .unwrap_or(0)
}

/// Named points tables injected alongside the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsRegistry {
    tables: BTreeMap<String, PointsTable>,
}

impl PointsRegistry {
    pub fn get(&self, name: &str) -> Option<&PointsTable> {
        self.tables.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, table: PointsTable) {
        self.tables.insert(name.into(), table);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringCategory {
    Age,
    Education,
    Experience,
    Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: ScoringCategory,
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTally {
    pub total: u32,
    pub breakdown: Vec<CategoryScore>,
}

impl PointsTally {
    fn add(&mut self, category: ScoringCategory, points: u32) {
        self.total = self.total.saturating_add(points);
        self.breakdown.push(CategoryScore { category, points });
    }
}

/// Sum the category contributions for one points-based program.
///
/// Categories without a table entry are not scored; lookups that miss contribute zero.
pub fn tally(
    table: &PointsTable,
    factors: &SelectionFactors,
    profile: &ApplicantProfile,
    language: &LanguageAssessment,
) -> PointsTally {
    let mut tally = PointsTally::default();

    if !table.age.is_empty() {
        tally.add(ScoringCategory::Age, table.age_points(profile.age));
    }
    if !table.education.is_empty() {
        tally.add(
            ScoringCategory::Education,
            table.education_points(profile.education),
        );
    }
    if !table.experience.is_empty() {
        tally.add(
            ScoringCategory::Experience,
            table.experience_points(profile.work_experience_years),
        );
    }
    if !factors.language_points.is_empty() {
        tally.add(
            ScoringCategory::Language,
            language_points(&factors.language_points, language),
        );
    }

    tally
}

fn language_points(table: &[LevelPoints], language: &LanguageAssessment) -> u32 {
    table
        .iter()
        .find(|entry| entry.level == language.clb.overall)
        .map(|entry| entry.points)
        .unwrap_or(0)
}

/// Failure note when `tally` falls short of the program's minimum.
pub(crate) fn shortfall_note(
    tally: &PointsTally,
    factors: &SelectionFactors,
    program_name: &str,
) -> Option<String> {
    (tally.total < factors.min_points).then(|| {
        format!(
            "Minimum {} points required for {}, you have {}",
            factors.min_points, program_name, tally.total
        )
    })
}
