//! Program catalog and the reference tables the engine consumes.
//!
//! Both are versioned data: the bundled copies are embedded at compile time and
//! either can be replaced from a directory at runtime.

mod rankings;
mod tables;

pub use rankings::{RankingWindow, UniversityRankings};
pub use tables::ReferenceTables;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalizer::same_name;
use super::requirements::{LevelPoints, RequirementSpec};

const BUNDLED_DATASETS: &[(&str, &str)] = &[
    ("canada", include_str!("../../../data/catalog/canada.json")),
    (
        "united_kingdom",
        include_str!("../../../data/catalog/united_kingdom.json"),
    ),
    ("usa", include_str!("../../../data/catalog/usa.json")),
    ("ireland", include_str!("../../../data/catalog/ireland.json")),
];

/// Errors raised while loading catalog data sets or reference tables.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid data set '{name}': {source}")]
    Parse {
        name: String,
        source: serde_json::Error,
    },
    #[error("invalid university rankings: {0}")]
    Rankings(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramCategory {
    #[serde(rename = "Skilled Worker")]
    SkilledWorker,
    #[serde(rename = "High Professional")]
    HighProfessional,
    Investment,
    Entrepreneur,
    #[serde(rename = "Extraordinary Ability")]
    ExtraordinaryAbility,
    #[serde(rename = "Graduate/Student")]
    GraduateStudent,
}

impl ProgramCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ProgramCategory::SkilledWorker => "Skilled Worker",
            ProgramCategory::HighProfessional => "High Professional",
            ProgramCategory::Investment => "Investment",
            ProgramCategory::Entrepreneur => "Entrepreneur",
            ProgramCategory::ExtraordinaryAbility => "Extraordinary Ability",
            ProgramCategory::GraduateStudent => "Graduate/Student",
        }
    }
}

impl fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scoring inputs for a points-based program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionFactors {
    pub min_points: u32,
    /// Name of the age/education/experience table in the points registry.
    pub points_table: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language_points: Vec<LevelPoints>,
}

/// One immigration pathway as published in a jurisdiction data set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDefinition {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    pub category: ProgramCategory,
    #[serde(default)]
    pub is_points_based: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_website: Option<String>,
    #[serde(default)]
    pub requirements: Option<RequirementSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_factors: Option<SelectionFactors>,
}

impl ProgramDefinition {
    /// True when `location` names this program's jurisdiction by name or code.
    pub fn is_local(&self, location: &str) -> bool {
        same_name(location, &self.country)
            || (!self.country_code.is_empty() && same_name(location, &self.country_code))
    }
}

/// Programs published by one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionDataset {
    pub jurisdiction: String,
    pub version: String,
    pub programs: Vec<ProgramDefinition>,
}

impl JurisdictionDataset {
    pub fn from_json(name: &str, raw: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
            name: name.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetVersion {
    pub jurisdiction: String,
    pub version: String,
    pub programs: usize,
}

/// Concatenation of every jurisdiction's programs, in data set order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    versions: Vec<DatasetVersion>,
    programs: Vec<ProgramDefinition>,
}

impl Catalog {
    pub fn from_datasets<I>(datasets: I) -> Self
    where
        I: IntoIterator<Item = JurisdictionDataset>,
    {
        let mut catalog = Self::default();
        for dataset in datasets {
            catalog.versions.push(DatasetVersion {
                jurisdiction: dataset.jurisdiction,
                version: dataset.version,
                programs: dataset.programs.len(),
            });
            catalog.programs.extend(dataset.programs);
        }
        catalog
    }

    pub fn from_programs(programs: Vec<ProgramDefinition>) -> Self {
        Self {
            versions: Vec::new(),
            programs,
        }
    }

    /// The data sets compiled into the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        let datasets = BUNDLED_DATASETS
            .iter()
            .map(|(name, raw)| JurisdictionDataset::from_json(name, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_datasets(datasets))
    }

    /// Load every `*.json` data set in `dir`, in file name order.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let io_error = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut datasets = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("dataset");
            let dataset = JurisdictionDataset::from_json(name, &raw)?;
            debug!(
                jurisdiction = %dataset.jurisdiction,
                version = %dataset.version,
                programs = dataset.programs.len(),
                "loaded catalog data set"
            );
            datasets.push(dataset);
        }

        Ok(Self::from_datasets(datasets))
    }

    pub fn programs(&self) -> &[ProgramDefinition] {
        &self.programs
    }

    pub fn versions(&self) -> &[DatasetVersion] {
        &self.versions
    }

    pub fn get(&self, id: &str) -> Option<&ProgramDefinition> {
        self.programs.iter().find(|program| program.id == id)
    }

    pub fn in_country<'a, 'b>(
        &'a self,
        country: &'b str,
    ) -> impl Iterator<Item = &'a ProgramDefinition> + 'b
    where
        'a: 'b,
    {
        self.programs
            .iter()
            .filter(move |program| program.is_local(country))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
