//! Conversion of raw four-skill test bands into CLB-like and CEFR-like levels.
//!
//! Threshold tables are data: they are loaded with the rest of the reference tables
//! and can be replaced without touching the conversion logic.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{LanguageScores, LanguageSkill};

/// Level on the CLB-like ordinal scale. `ClbLevel(0)` marks a missing score.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClbLevel(pub u8);

impl fmt::Display for ClbLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CLB{}", self.0)
    }
}

/// Level on the CEFR-like scale, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CefrLevel {
    #[serde(rename = "Below A1")]
    BelowA1,
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    pub const fn label(self) -> &'static str {
        match self {
            CefrLevel::BelowA1 => "Below A1",
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A band at or above `band` earns `level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThreshold {
    pub band: f64,
    pub level: ClbLevel,
}

/// Per-skill break points for the CLB-like scale.
///
/// The skills deliberately use different break points; a usable band below every
/// threshold still earns `floor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClbThresholds {
    pub floor: ClbLevel,
    pub listening: Vec<BandThreshold>,
    pub speaking: Vec<BandThreshold>,
    pub reading: Vec<BandThreshold>,
    pub writing: Vec<BandThreshold>,
}

impl ClbThresholds {
    fn table(&self, skill: LanguageSkill) -> &[BandThreshold] {
        match skill {
            LanguageSkill::Listening => &self.listening,
            LanguageSkill::Speaking => &self.speaking,
            LanguageSkill::Reading => &self.reading,
            LanguageSkill::Writing => &self.writing,
        }
    }

    pub fn level_for(&self, skill: LanguageSkill, band: Option<f64>) -> ClbLevel {
        let band = usable_band(band);
        if band <= 0.0 {
            return ClbLevel::default();
        }

        self.table(skill)
            .iter()
            .filter(|threshold| band >= threshold.band)
            .map(|threshold| threshold.level)
            .max()
            .unwrap_or(self.floor)
    }
}

/// A mean band at or above `mean` reaches `level`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CefrCutoff {
    pub mean: f64,
    pub level: CefrLevel,
}

/// Injected conversion tables for both proficiency scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStandards {
    pub clb: ClbThresholds,
    pub cefr: Vec<CefrCutoff>,
}

impl LanguageStandards {
    pub fn clb(&self, scores: &LanguageScores) -> ClbBreakdown {
        let level = |skill| self.clb.level_for(skill, scores.band(skill));
        let listening = level(LanguageSkill::Listening);
        let speaking = level(LanguageSkill::Speaking);
        let reading = level(LanguageSkill::Reading);
        let writing = level(LanguageSkill::Writing);
        let overall = listening.min(speaking).min(reading).min(writing);

        ClbBreakdown {
            listening,
            speaking,
            reading,
            writing,
            overall,
        }
    }

    pub fn cefr(&self, scores: &LanguageScores) -> CefrLevel {
        let total: f64 = LanguageSkill::ALL
            .iter()
            .map(|skill| usable_band(scores.band(*skill)))
            .sum();
        let mean = total / LanguageSkill::ALL.len() as f64;

        self.cefr
            .iter()
            .filter(|cutoff| mean >= cutoff.mean)
            .map(|cutoff| cutoff.level)
            .max()
            .unwrap_or(CefrLevel::BelowA1)
    }

    pub fn assess(&self, scores: &LanguageScores) -> LanguageAssessment {
        LanguageAssessment {
            clb: self.clb(scores),
            cefr: self.cefr(scores),
        }
    }
}

/// CLB-like level per skill; `overall` is the weakest skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClbBreakdown {
    pub listening: ClbLevel,
    pub speaking: ClbLevel,
    pub reading: ClbLevel,
    pub writing: ClbLevel,
    pub overall: ClbLevel,
}

impl ClbBreakdown {
    pub fn skill(&self, skill: LanguageSkill) -> ClbLevel {
        match skill {
            LanguageSkill::Listening => self.listening,
            LanguageSkill::Speaking => self.speaking,
            LanguageSkill::Reading => self.reading,
            LanguageSkill::Writing => self.writing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageAssessment {
    pub clb: ClbBreakdown,
    pub cefr: CefrLevel,
}

// Missing, negative and non-finite bands count as zero on both scales.
fn usable_band(band: Option<f64>) -> f64 {
    match band {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}
