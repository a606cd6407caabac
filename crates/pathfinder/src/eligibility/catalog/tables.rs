use std::path::Path;

use serde::de::DeserializeOwned;

use super::{CatalogError, UniversityRankings};
use crate::eligibility::currency::ConversionTable;
use crate::eligibility::evaluation::PointsRegistry;
use crate::eligibility::language::LanguageStandards;

const CURRENCY_RATES: &str = "currency_rates.json";
const LANGUAGE_STANDARDS: &str = "language_standards.json";
const POINTS_TABLES: &str = "points_tables.json";
const TOP_UNIVERSITIES: &str = "top_universities.csv";

/// Versioned lookup data shared by every evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    pub conversion: ConversionTable,
    pub language: LanguageStandards,
    pub points: PointsRegistry,
    pub rankings: UniversityRankings,
}

impl ReferenceTables {
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(Self {
            conversion: parse_json(
                CURRENCY_RATES,
                include_str!("../../../data/tables/currency_rates.json"),
            )?,
            language: parse_json(
                LANGUAGE_STANDARDS,
                include_str!("../../../data/tables/language_standards.json"),
            )?,
            points: parse_json(
                POINTS_TABLES,
                include_str!("../../../data/tables/points_tables.json"),
            )?,
            rankings: UniversityRankings::from_reader(
                include_str!("../../../data/tables/top_universities.csv").as_bytes(),
            )?,
        })
    }

    /// Load the four table files from `dir`; every file must be present.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        Ok(Self {
            conversion: read_json(dir, CURRENCY_RATES)?,
            language: read_json(dir, LANGUAGE_STANDARDS)?,
            points: read_json(dir, POINTS_TABLES)?,
            rankings: UniversityRankings::from_path(dir.join(TOP_UNIVERSITIES))?,
        })
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T, CatalogError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
        path: path.clone(),
        source,
    })?;
    parse_json(file, &raw)
}

fn parse_json<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
        name: name.to_string(),
        source,
    })
}
