use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    Achievement, ApplicantProfile, BusinessIntent, CurrencyCode, EducationLevel, Graduation,
    InvestmentIntent, LanguageScores, Money,
};

/// Submissions rejected outright instead of degraded field by field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("unknown education level '{0}'")]
    UnknownEducation(String),
    #[error("unknown achievement '{0}'")]
    UnknownAchievement(String),
    #[error("graduation date '{0}' is not a YYYY-MM-DD date")]
    InvalidGraduationDate(String),
}

/// Raw form field: browsers send numbers as strings and answers as "Yes"/"No".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FormValue {
    fn is_yes(&self) -> bool {
        match self {
            FormValue::Flag(flag) => *flag,
            FormValue::Number(value) => *value != 0.0,
            FormValue::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "yes" | "y" | "true"
            ),
        }
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Number(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Flag(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IeltsSubmission {
    pub listening: Option<FormValue>,
    pub speaking: Option<FormValue>,
    pub reading: Option<FormValue>,
    pub writing: Option<FormValue>,
}

/// Profile exactly as the questionnaire posts it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSubmission {
    pub age: Option<FormValue>,
    pub education: Option<String>,
    pub graduation_date: Option<String>,
    pub university: Option<String>,
    pub work_experience: Option<FormValue>,
    pub is_paid_work: Option<FormValue>,
    pub work_location: Vec<String>,
    pub annual_salary: Option<FormValue>,
    pub salary_currency: Option<String>,
    pub ielts: IeltsSubmission,
    pub higher_education: Option<FormValue>,
    pub extraordinary_ability: Option<FormValue>,
    pub extraordinary_achievements: Vec<String>,
    pub investments: Option<FormValue>,
    pub investment_budget: Option<FormValue>,
    pub investment_currency: Option<String>,
    pub net_worth: Option<FormValue>,
    pub net_worth_currency: Option<String>,
    pub start_business: Option<FormValue>,
    pub business_funding: Option<FormValue>,
    pub business_currency: Option<String>,
}

/// Turns submissions into immutable applicant profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileIntake {
    default_currency: CurrencyCode,
}

impl ProfileIntake {
    pub fn with_default_currency(currency: impl Into<CurrencyCode>) -> Self {
        Self {
            default_currency: currency.into(),
        }
    }

    pub fn default_currency(&self) -> &CurrencyCode {
        &self.default_currency
    }

    /// Normalise a submission.
    ///
    /// Unparseable or negative numbers become absent with a warning. Unknown vocabulary
    /// (education keys, achievement tags) and malformed graduation dates reject the
    /// submission.
    pub fn profile_from_submission(
        &self,
        submission: ProfileSubmission,
    ) -> Result<ApplicantProfile, IntakeError> {
        let education = match non_empty(submission.education.as_deref()) {
            Some(key) => Some(
                EducationLevel::from_key(key)
                    .ok_or_else(|| IntakeError::UnknownEducation(key.to_string()))?,
            ),
            None => None,
        };

        let achievements = submission
            .extraordinary_achievements
            .iter()
            .filter_map(|tag| non_empty(Some(tag.as_str())))
            .map(|tag| {
                Achievement::from_key(tag)
                    .ok_or_else(|| IntakeError::UnknownAchievement(tag.to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        let graduation = graduation(
            submission.graduation_date.as_deref(),
            submission.university.as_deref(),
        )?;

        let work_locations = submission
            .work_location
            .iter()
            .filter_map(|location| non_empty(Some(location.as_str())))
            .map(str::to_string)
            .collect();

        let language = LanguageScores {
            listening: number("ielts.listening", submission.ielts.listening.as_ref()),
            speaking: number("ielts.speaking", submission.ielts.speaking.as_ref()),
            reading: number("ielts.reading", submission.ielts.reading.as_ref()),
            writing: number("ielts.writing", submission.ielts.writing.as_ref()),
        };

        let investment = is_yes(submission.investments.as_ref()).then(|| InvestmentIntent {
            budget: self.money(
                "investmentBudget",
                submission.investment_budget.as_ref(),
                submission.investment_currency.as_deref(),
            ),
            net_worth: self.money(
                "netWorth",
                submission.net_worth.as_ref(),
                submission.net_worth_currency.as_deref(),
            ),
        });

        let business = is_yes(submission.start_business.as_ref()).then(|| BusinessIntent {
            funding: self.money(
                "businessFunding",
                submission.business_funding.as_ref(),
                submission.business_currency.as_deref(),
            ),
        });

        Ok(ApplicantProfile {
            age: whole_number("age", submission.age.as_ref()),
            education,
            work_experience_years: whole_number(
                "workExperience",
                submission.work_experience.as_ref(),
            ),
            paid_work: is_yes(submission.is_paid_work.as_ref()),
            work_locations,
            annual_salary: self.money(
                "annualSalary",
                submission.annual_salary.as_ref(),
                submission.salary_currency.as_deref(),
            ),
            language,
            higher_education: is_yes(submission.higher_education.as_ref()),
            graduation,
            extraordinary_ability: is_yes(submission.extraordinary_ability.as_ref()),
            achievements,
            investment,
            business,
        })
    }

    fn money(
        &self,
        field: &str,
        amount: Option<&FormValue>,
        currency: Option<&str>,
    ) -> Option<Money> {
        let amount = number(field, amount)?;
        let currency = non_empty(currency)
            .map(CurrencyCode::new)
            .unwrap_or_else(|| self.default_currency.clone());
        Some(Money { amount, currency })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn is_yes(value: Option<&FormValue>) -> bool {
    value.map(FormValue::is_yes).unwrap_or(false)
}

/// Non-negative finite number, or `None` when the field is blank or unusable.
fn number(field: &str, value: Option<&FormValue>) -> Option<f64> {
    let parsed = match value? {
        FormValue::Number(number) => *number,
        FormValue::Text(text) => {
            let text = text.trim().replace(',', "");
            if text.is_empty() {
                return None;
            }
            match text.parse::<f64>() {
                Ok(number) => number,
                Err(_) => {
                    warn!(field, value = %text, "ignoring unparseable number");
                    return None;
                }
            }
        }
        FormValue::Flag(_) => {
            warn!(field, "ignoring boolean where a number was expected");
            return None;
        }
    };

    if parsed.is_finite() && parsed >= 0.0 {
        Some(parsed)
    } else {
        warn!(field, value = parsed, "ignoring negative or non-finite number");
        None
    }
}

fn whole_number(field: &str, value: Option<&FormValue>) -> Option<u32> {
    number(field, value).map(|number| number.floor().min(f64::from(u32::MAX)) as u32)
}

fn graduation(
    date: Option<&str>,
    university: Option<&str>,
) -> Result<Option<Graduation>, IntakeError> {
    let Some(date) = non_empty(date) else {
        return Ok(None);
    };
    let graduated_on = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| IntakeError::InvalidGraduationDate(date.to_string()))?;

    Ok(non_empty(university).map(|university| Graduation {
        university: university.to_string(),
        graduated_on,
    }))
}
