//! Requirement specification tree shared by every program in the catalog.
//!
//! A program's requirements are a flat list of clauses combined with AND. The only
//! composite clause is [`Clause::AnyOf`], which holds alternative bundles combined with OR.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Achievement, CurrencyCode, EducationLevel, LanguageSkill};
use super::language::{CefrLevel, ClbLevel};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSpec {
    #[serde(default)]
    pub clauses: Vec<Clause>,
    /// Attention notes reported with every evaluation, pass or fail.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

impl RequirementSpec {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self {
            clauses,
            advisories: Vec::new(),
        }
    }

    pub fn with_advisory(mut self, note: impl Into<String>) -> Self {
        self.advisories.push(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Clause {
    Range(RangeClause),
    Education(EducationClause),
    Language(LanguageClause),
    Location(LocationClause),
    Achievements(AchievementClause),
    PaidWork,
    TopUniversity,
    AnyOf(OptionGroup),
}

/// Numeric profile attributes a range clause can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericAttribute {
    Age,
    WorkExperience,
    AnnualSalary,
    InvestmentBudget,
    NetWorth,
    BusinessFunding,
}

impl NumericAttribute {
    pub const fn is_monetary(self) -> bool {
        matches!(
            self,
            NumericAttribute::AnnualSalary
                | NumericAttribute::InvestmentBudget
                | NumericAttribute::NetWorth
                | NumericAttribute::BusinessFunding
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            NumericAttribute::Age => "Age",
            NumericAttribute::WorkExperience => "Work experience",
            NumericAttribute::AnnualSalary => "Annual salary",
            NumericAttribute::InvestmentBudget => "Investment budget",
            NumericAttribute::NetWorth => "Net worth",
            NumericAttribute::BusinessFunding => "Business funding",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Inclusive,
    Exclusive,
}

/// How a clause treats an attribute the applicant did not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValue {
    Unmet,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    Within,
    BelowMin,
    AboveMax,
}

/// `min <= value` and `value <= max` (or `< max`) on one numeric attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeClause {
    pub attribute: NumericAttribute,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Currency the bounds are stated in; monetary values are converted to it first.
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
    #[serde(default)]
    pub max_bound: Option<Bound>,
    #[serde(default)]
    pub when_missing: Option<MissingValue>,
}

impl RangeClause {
    pub fn new(attribute: NumericAttribute) -> Self {
        Self {
            attribute,
            min: None,
            max: None,
            currency: None,
            max_bound: None,
            when_missing: None,
        }
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn currency(mut self, currency: impl Into<CurrencyCode>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn max_bound(mut self, bound: Bound) -> Self {
        self.max_bound = Some(bound);
        self
    }

    pub fn when_missing(mut self, policy: MissingValue) -> Self {
        self.when_missing = Some(policy);
        self
    }

    /// Monetary brackets are "at least, strictly below"; counts are inclusive on both ends.
    pub fn effective_max_bound(&self) -> Bound {
        self.max_bound.unwrap_or(if self.attribute.is_monetary() {
            Bound::Exclusive
        } else {
            Bound::Inclusive
        })
    }

    /// A positive minimum expects a value, so a missing one cannot meet it.
    pub fn missing_policy(&self) -> MissingValue {
        self.when_missing.unwrap_or(match self.min {
            Some(min) if min > 0.0 => MissingValue::Unmet,
            _ => MissingValue::NotApplicable,
        })
    }

    pub fn target_currency(&self) -> CurrencyCode {
        self.currency.clone().unwrap_or_default()
    }

    pub fn position(&self, value: f64) -> RangePosition {
        if let Some(min) = self.min {
            if value < min {
                return RangePosition::BelowMin;
            }
        }

        if let Some(max) = self.max {
            let beyond = match self.effective_max_bound() {
                Bound::Inclusive => value > max,
                Bound::Exclusive => value >= max,
            };
            if beyond {
                return RangePosition::AboveMax;
            }
        }

        RangePosition::Within
    }
}

/// Accepted education levels. A single level means an exact match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllowedEducation {
    Exact(EducationLevel),
    AnyOf(Vec<EducationLevel>),
}

impl AllowedEducation {
    pub fn permits(&self, level: EducationLevel) -> bool {
        match self {
            AllowedEducation::Exact(required) => *required == level,
            AllowedEducation::AnyOf(levels) => levels.contains(&level),
        }
    }

    pub fn keys(&self) -> Vec<&'static str> {
        match self {
            AllowedEducation::Exact(level) => vec![level.key()],
            AllowedEducation::AnyOf(levels) => levels.iter().map(|level| level.key()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationClause {
    pub levels: AllowedEducation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageStandard {
    #[serde(rename = "CLB")]
    Clb,
    #[serde(rename = "CEFR")]
    Cefr,
}

/// Points awarded for reaching exactly `level` on the CLB-like scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPoints {
    pub level: ClbLevel,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum LanguageClause {
    ClbMinimum {
        level: ClbLevel,
    },
    CefrMinimum {
        level: CefrLevel,
    },
    ClbPerSkill {
        listening: ClbLevel,
        speaking: ClbLevel,
        reading: ClbLevel,
        writing: ClbLevel,
    },
    /// Scoring table for the points calculator; never fails a pass/fail check.
    ClbPoints {
        points: Vec<LevelPoints>,
    },
}

impl LanguageClause {
    pub fn standard(&self) -> LanguageStandard {
        match self {
            LanguageClause::CefrMinimum { .. } => LanguageStandard::Cefr,
            _ => LanguageStandard::Clb,
        }
    }

    /// Per-skill minimum for the `ClbPerSkill` form.
    pub fn skill_minimum(&self, skill: LanguageSkill) -> Option<ClbLevel> {
        match self {
            LanguageClause::ClbPerSkill {
                listening,
                speaking,
                reading,
                writing,
            } => Some(match skill {
                LanguageSkill::Listening => *listening,
                LanguageSkill::Speaking => *speaking,
                LanguageSkill::Reading => *reading,
                LanguageSkill::Writing => *writing,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationScope {
    Local,
    #[serde(alias = "Abroad")]
    Abroad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationClause {
    pub scopes: Vec<LocationScope>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementClause {
    pub required: BTreeSet<Achievement>,
    pub minimum: usize,
}

/// Alternative requirement bundles; meeting any single bundle satisfies the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub label: String,
    pub options: Vec<RequirementBundle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub clauses: Vec<Clause>,
}
