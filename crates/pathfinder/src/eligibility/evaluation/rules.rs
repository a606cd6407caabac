use serde::{Deserialize, Serialize};

use super::super::currency::{format_amount, format_money};
use super::super::domain::{ApplicantProfile, LanguageSkill, Money};
use super::super::requirements::{
    AchievementClause, Bound, Clause, EducationClause, LanguageClause, LocationClause,
    LocationScope, MissingValue, NumericAttribute, OptionGroup, RangeClause, RangePosition,
};
use super::{unmet_notes, EvaluationContext};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "note", rename_all = "snake_case")]
pub enum ClauseVerdict {
    Satisfied,
    Unmet(String),
}

impl ClauseVerdict {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, ClauseVerdict::Satisfied)
    }

    fn unmet(note: impl Into<String>) -> Self {
        ClauseVerdict::Unmet(note.into())
    }
}

pub(crate) fn check_clause(clause: &Clause, context: &EvaluationContext<'_>) -> ClauseVerdict {
    match clause {
        Clause::Range(range) => check_range(range, context),
        Clause::Education(education) => check_education(education, context.profile),
        Clause::Language(language) => check_language(language, context),
        Clause::Location(location) => check_location(location, context),
        Clause::Achievements(achievements) => check_achievements(achievements, context.profile),
        Clause::PaidWork => {
            if context.profile.paid_work {
                ClauseVerdict::Satisfied
            } else {
                ClauseVerdict::unmet("Paid work experience required")
            }
        }
        Clause::TopUniversity => check_top_university(context),
        Clause::AnyOf(group) => check_option_group(group, context),
    }
}

fn check_range(clause: &RangeClause, context: &EvaluationContext<'_>) -> ClauseVerdict {
    let value = match attribute_value(clause, context) {
        Some(value) => value,
        None => {
            return match clause.missing_policy() {
                MissingValue::Unmet => {
                    ClauseVerdict::unmet(format!("{} not provided", clause.attribute.label()))
                }
                MissingValue::NotApplicable => ClauseVerdict::Satisfied,
            }
        }
    };

    match clause.position(value) {
        RangePosition::Within => ClauseVerdict::Satisfied,
        position => ClauseVerdict::Unmet(range_note(clause, position, value)),
    }
}

/// Profile value for the clause attribute, converted to the clause currency when monetary.
fn attribute_value(clause: &RangeClause, context: &EvaluationContext<'_>) -> Option<f64> {
    let profile = context.profile;
    let money: Option<&Money> = match clause.attribute {
        NumericAttribute::Age => return profile.age.map(f64::from),
        NumericAttribute::WorkExperience => return profile.work_experience_years.map(f64::from),
        NumericAttribute::AnnualSalary => profile.annual_salary.as_ref(),
        NumericAttribute::InvestmentBudget => profile
            .investment
            .as_ref()
            .and_then(|intent| intent.budget.as_ref()),
        NumericAttribute::NetWorth => profile
            .investment
            .as_ref()
            .and_then(|intent| intent.net_worth.as_ref()),
        NumericAttribute::BusinessFunding => profile
            .business
            .as_ref()
            .and_then(|intent| intent.funding.as_ref()),
    };

    money.map(|money| {
        context
            .conversion
            .convert_money(money, &clause.target_currency())
            .amount
    })
}

fn range_note(clause: &RangeClause, position: RangePosition, value: f64) -> String {
    let currency = clause.target_currency();
    let money = |amount: f64| format_money(amount, &currency);
    let exclusive = clause.effective_max_bound() == Bound::Exclusive;

    match (clause.attribute, position) {
        (NumericAttribute::Age, _) => match (clause.min, clause.max) {
            (Some(min), Some(max)) => format!(
                "Age must be between {} and {}",
                format_amount(min),
                format_amount(max)
            ),
            (Some(min), None) => format!("Minimum age of {} required", format_amount(min)),
            (None, Some(max)) => format!("Maximum age of {} exceeded", format_amount(max)),
            (None, None) => "Age requirement not met".to_string(),
        },
        (NumericAttribute::WorkExperience, RangePosition::BelowMin) => format!(
            "Minimum {} years of work experience required",
            format_amount(clause.min.unwrap_or_default())
        ),
        (NumericAttribute::WorkExperience, _) if exclusive => format!(
            "Less than {} years of work experience required",
            format_amount(clause.max.unwrap_or_default())
        ),
        (NumericAttribute::WorkExperience, _) => format!(
            "At most {} years of work experience allowed",
            format_amount(clause.max.unwrap_or_default())
        ),
        (NumericAttribute::AnnualSalary, RangePosition::BelowMin) => format!(
            "Minimum salary of {} required, you have {}",
            money(clause.min.unwrap_or_default()),
            money(value)
        ),
        (NumericAttribute::InvestmentBudget, RangePosition::BelowMin) => format!(
            "Minimum investment of {} is not met",
            money(clause.min.unwrap_or_default())
        ),
        (NumericAttribute::NetWorth, RangePosition::BelowMin) => format!(
            "Minimum net worth of {} required",
            money(clause.min.unwrap_or_default())
        ),
        (NumericAttribute::BusinessFunding, RangePosition::BelowMin) => format!(
            "Minimum business funding of {} required",
            money(clause.min.unwrap_or_default())
        ),
        (attribute, _) => {
            let max = money(clause.max.unwrap_or_default());
            if exclusive {
                format!(
                    "{} must be below {}, you have {}",
                    attribute.label(),
                    max,
                    money(value)
                )
            } else {
                format!(
                    "{} must not exceed {}, you have {}",
                    attribute.label(),
                    max,
                    money(value)
                )
            }
        }
    }
}

fn check_education(clause: &EducationClause, profile: &ApplicantProfile) -> ClauseVerdict {
    match profile.education {
        Some(level) if clause.levels.permits(level) => ClauseVerdict::Satisfied,
        Some(_) => ClauseVerdict::Unmet(format!(
            "Education requirement not met (accepted: {})",
            clause.levels.keys().join(", ")
        )),
        None => ClauseVerdict::Unmet(format!(
            "Education level not provided (accepted: {})",
            clause.levels.keys().join(", ")
        )),
    }
}

fn check_language(clause: &LanguageClause, context: &EvaluationContext<'_>) -> ClauseVerdict {
    let assessment = context.language;
    match clause {
        LanguageClause::ClbMinimum { level } => {
            if assessment.clb.overall >= *level {
                ClauseVerdict::Satisfied
            } else {
                ClauseVerdict::Unmet(format!(
                    "English language requirement not met - minimum {level} required, you have {}",
                    assessment.clb.overall
                ))
            }
        }
        LanguageClause::CefrMinimum { level } => {
            if assessment.cefr >= *level {
                ClauseVerdict::Satisfied
            } else {
                ClauseVerdict::Unmet(format!(
                    "English language requirement not met - minimum {level} required, you have {}",
                    assessment.cefr
                ))
            }
        }
        LanguageClause::ClbPerSkill { .. } => {
            let shortfalls: Vec<String> = LanguageSkill::ALL
                .into_iter()
                .filter_map(|skill| {
                    let required = clause.skill_minimum(skill)?;
                    let actual = assessment.clb.skill(skill);
                    (actual < required).then(|| {
                        format!("{} {required} required, you have {actual}", skill.label())
                    })
                })
                .collect();

            if shortfalls.is_empty() {
                ClauseVerdict::Satisfied
            } else {
                ClauseVerdict::Unmet(format!(
                    "English language requirement not met - {}",
                    shortfalls.join("; ")
                ))
            }
        }
        // Scored by the points calculator.
        LanguageClause::ClbPoints { .. } => ClauseVerdict::Satisfied,
    }
}

fn check_location(clause: &LocationClause, context: &EvaluationContext<'_>) -> ClauseVerdict {
    let wants_local = clause.scopes.contains(&LocationScope::Local);
    let wants_abroad = clause.scopes.contains(&LocationScope::Abroad);
    if wants_local == wants_abroad {
        return ClauseVerdict::Satisfied;
    }

    let program = context.program;
    let locations = &context.profile.work_locations;
    if wants_local {
        if locations.iter().any(|location| program.is_local(location)) {
            ClauseVerdict::Satisfied
        } else {
            ClauseVerdict::Unmet(format!(
                "Work location requirement not met - experience in {} required",
                program.country
            ))
        }
    } else if locations.iter().any(|location| !program.is_local(location)) {
        ClauseVerdict::Satisfied
    } else {
        ClauseVerdict::Unmet(format!(
            "Work location requirement not met - experience outside {} required",
            program.country
        ))
    }
}

fn check_achievements(clause: &AchievementClause, profile: &ApplicantProfile) -> ClauseVerdict {
    let matched = clause.required.intersection(&profile.achievements).count();
    if matched >= clause.minimum {
        ClauseVerdict::Satisfied
    } else {
        ClauseVerdict::Unmet(format!(
            "Must meet at least {} extraordinary ability criteria (matched {matched})",
            clause.minimum
        ))
    }
}

fn check_top_university(context: &EvaluationContext<'_>) -> ClauseVerdict {
    let Some(graduation) = context.profile.graduation.as_ref() else {
        return ClauseVerdict::unmet("Graduation details not provided");
    };

    if context
        .rankings
        .is_eligible(&graduation.university, graduation.graduated_on)
    {
        ClauseVerdict::Satisfied
    } else {
        ClauseVerdict::Unmet(format!(
            "{} is not a listed top-ranked university for graduation on {}",
            graduation.university, graduation.graduated_on
        ))
    }
}

fn check_option_group(group: &OptionGroup, context: &EvaluationContext<'_>) -> ClauseVerdict {
    if group.options.is_empty()
        || group
            .options
            .iter()
            .any(|bundle| unmet_notes(&bundle.clauses, context).is_empty())
    {
        ClauseVerdict::Satisfied
    } else {
        ClauseVerdict::Unmet(format!(
            "Does not meet any of the required options for {}",
            group.label
        ))
    }
}
