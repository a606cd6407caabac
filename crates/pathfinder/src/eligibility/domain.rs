use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Currency code such as `USD` or `EUR`, normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount paired with the currency it was declared in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: f64, currency: impl Into<CurrencyCode>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

/// Highest completed education, ordered from lowest to highest credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationLevel {
    BelowSecondary,
    Secondary,
    OneYearTwelve,
    OneYearThirteen,
    TwoYearDiploma,
    BachelorsThreeYear,
    ThreeDiploma,
    TwoCertificates,
    TwoBachelors,
    ProfessionalDegree,
    Masters,
    Doctorate,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 12] = [
        EducationLevel::BelowSecondary,
        EducationLevel::Secondary,
        EducationLevel::OneYearTwelve,
        EducationLevel::OneYearThirteen,
        EducationLevel::TwoYearDiploma,
        EducationLevel::BachelorsThreeYear,
        EducationLevel::ThreeDiploma,
        EducationLevel::TwoCertificates,
        EducationLevel::TwoBachelors,
        EducationLevel::ProfessionalDegree,
        EducationLevel::Masters,
        EducationLevel::Doctorate,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            EducationLevel::BelowSecondary => "belowSecondary",
            EducationLevel::Secondary => "secondary",
            EducationLevel::OneYearTwelve => "oneYearTwelve",
            EducationLevel::OneYearThirteen => "oneYearThirteen",
            EducationLevel::TwoYearDiploma => "twoYearDiploma",
            EducationLevel::BachelorsThreeYear => "bachelorsThreeYear",
            EducationLevel::ThreeDiploma => "threeDiploma",
            EducationLevel::TwoCertificates => "twoCertificates",
            EducationLevel::TwoBachelors => "twoBachelors",
            EducationLevel::ProfessionalDegree => "professionalDegree",
            EducationLevel::Masters => "masters",
            EducationLevel::Doctorate => "doctorate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EducationLevel::BelowSecondary => "Below secondary education",
            EducationLevel::Secondary => "Secondary school (high school diploma)",
            EducationLevel::OneYearTwelve => {
                "One-year credential (at least 12 years of full-time study)"
            }
            EducationLevel::OneYearThirteen => {
                "One-year credential (at least 13 years of full-time study)"
            }
            EducationLevel::TwoYearDiploma => "Two-year degree, diploma or apprenticeship",
            EducationLevel::BachelorsThreeYear => "Bachelor's degree of three or more years",
            EducationLevel::ThreeDiploma => "Three-year diploma, trade certificate or apprenticeship",
            EducationLevel::TwoCertificates => "Two or more certificates or diplomas",
            EducationLevel::TwoBachelors => "Two or more Bachelor's degrees",
            EducationLevel::ProfessionalDegree => "Professional degree for a licensed profession",
            EducationLevel::Masters => "Master's degree",
            EducationLevel::Doctorate => "Doctoral (PhD) degree",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.key().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Achievement tags an applicant may claim for extraordinary-ability routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    InternationalAwards,
    MediaRecognition,
    ProfessionalMembership,
    PeerReview,
    OriginalContributions,
    ScholarlyArticles,
    LeadershipRole,
    HighSalary,
    AdvancedDegree,
    InternationalRecognition,
}

impl Achievement {
    pub const ALL: [Achievement; 10] = [
        Achievement::InternationalAwards,
        Achievement::MediaRecognition,
        Achievement::ProfessionalMembership,
        Achievement::PeerReview,
        Achievement::OriginalContributions,
        Achievement::ScholarlyArticles,
        Achievement::LeadershipRole,
        Achievement::HighSalary,
        Achievement::AdvancedDegree,
        Achievement::InternationalRecognition,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Achievement::InternationalAwards => "international_awards",
            Achievement::MediaRecognition => "media_recognition",
            Achievement::ProfessionalMembership => "professional_membership",
            Achievement::PeerReview => "peer_review",
            Achievement::OriginalContributions => "original_contributions",
            Achievement::ScholarlyArticles => "scholarly_articles",
            Achievement::LeadershipRole => "leadership_role",
            Achievement::HighSalary => "high_salary",
            Achievement::AdvancedDegree => "advanced_degree",
            Achievement::InternationalRecognition => "international_recognition",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.key().eq_ignore_ascii_case(trimmed))
    }
}

/// The four skills reported by an IELTS-style language test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageSkill {
    Listening,
    Speaking,
    Reading,
    Writing,
}

impl LanguageSkill {
    pub const ALL: [LanguageSkill; 4] = [
        LanguageSkill::Listening,
        LanguageSkill::Speaking,
        LanguageSkill::Reading,
        LanguageSkill::Writing,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LanguageSkill::Listening => "listening",
            LanguageSkill::Speaking => "speaking",
            LanguageSkill::Reading => "reading",
            LanguageSkill::Writing => "writing",
        }
    }
}

/// Raw band scores per skill; `None` means the skill was not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageScores {
    pub listening: Option<f64>,
    pub speaking: Option<f64>,
    pub reading: Option<f64>,
    pub writing: Option<f64>,
}

impl LanguageScores {
    pub fn new(listening: f64, speaking: f64, reading: f64, writing: f64) -> Self {
        Self {
            listening: Some(listening),
            speaking: Some(speaking),
            reading: Some(reading),
            writing: Some(writing),
        }
    }

    pub fn band(&self, skill: LanguageSkill) -> Option<f64> {
        match skill {
            LanguageSkill::Listening => self.listening,
            LanguageSkill::Speaking => self.speaking,
            LanguageSkill::Reading => self.reading,
            LanguageSkill::Writing => self.writing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graduation {
    pub university: String,
    pub graduated_on: NaiveDate,
}

/// Declared when the applicant wants to invest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentIntent {
    pub budget: Option<Money>,
    pub net_worth: Option<Money>,
}

/// Declared when the applicant wants to start a business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessIntent {
    pub funding: Option<Money>,
}

/// Normalised, immutable snapshot of everything the engine knows about an applicant.
///
/// Numeric fields are `None` when the applicant did not provide a usable value. Absent
/// values are never coerced to zero here; each requirement clause decides how to treat them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub age: Option<u32>,
    pub education: Option<EducationLevel>,
    pub work_experience_years: Option<u32>,
    pub paid_work: bool,
    pub work_locations: BTreeSet<String>,
    pub annual_salary: Option<Money>,
    pub language: LanguageScores,
    pub higher_education: bool,
    pub graduation: Option<Graduation>,
    pub extraordinary_ability: bool,
    pub achievements: BTreeSet<Achievement>,
    pub investment: Option<InvestmentIntent>,
    pub business: Option<BusinessIntent>,
}
