use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::CatalogError;
use crate::eligibility::normalizer::normalize_name;

/// Universities that qualified for graduate routes during one ranking year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingWindow {
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    universities: BTreeSet<String>,
}

impl RankingWindow {
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && date <= self.ends_on
    }

    pub fn lists(&self, university: &str) -> bool {
        self.universities.contains(&normalize_name(university))
    }

    pub fn len(&self) -> usize {
        self.universities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universities.is_empty()
    }
}

/// Top-ranking university lists keyed by graduation window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversityRankings {
    windows: Vec<RankingWindow>,
}

impl UniversityRankings {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(file)?)
    }

    /// Read `window_start,window_end,university` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let mut grouped: BTreeMap<(NaiveDate, NaiveDate), BTreeSet<String>> = BTreeMap::new();

        for row in csv_reader.deserialize::<RankingRow>() {
            let row = row?;
            if let Some(name) = row.university {
                grouped
                    .entry((row.window_start, row.window_end))
                    .or_default()
                    .insert(normalize_name(&name));
            }
        }

        // Newest window first so overlapping windows resolve to the latest list.
        let windows = grouped
            .into_iter()
            .rev()
            .map(|((starts_on, ends_on), universities)| RankingWindow {
                starts_on,
                ends_on,
                universities,
            })
            .collect();

        Ok(Self { windows })
    }

    pub fn windows(&self) -> &[RankingWindow] {
        &self.windows
    }

    pub fn window_for(&self, graduated_on: NaiveDate) -> Option<&RankingWindow> {
        self.windows
            .iter()
            .find(|window| window.contains_date(graduated_on))
    }

    pub fn is_eligible(&self, university: &str, graduated_on: NaiveDate) -> bool {
        self.window_for(graduated_on)
            .map(|window| window.lists(university))
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
struct RankingRow {
    window_start: NaiveDate,
    window_end: NaiveDate,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    university: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn groups_rows_by_window_and_matches_loosely() {
        let csv = "window_start,window_end,university\n\
2023-11-01,2024-10-31,Harvard University\n\
2023-11-01,2024-10-31,  ETH   Zurich \n\
2022-11-01,2023-10-31,Harvard University\n";

        let rankings = UniversityRankings::from_reader(csv.as_bytes()).expect("csv parses");

        assert_eq!(rankings.windows().len(), 2);
        assert_eq!(rankings.windows()[0].starts_on, date("2023-11-01"));
        assert!(rankings.is_eligible("eth zurich", date("2024-03-15")));
        assert!(!rankings.is_eligible("ETH Zurich", date("2023-03-15")));
        assert!(rankings.is_eligible("HARVARD UNIVERSITY", date("2022-11-01")));
    }

    #[test]
    fn graduation_outside_every_window_is_not_eligible() {
        let csv = "window_start,window_end,university\n2023-11-01,2024-10-31,Harvard University\n";
        let rankings = UniversityRankings::from_reader(csv.as_bytes()).expect("csv parses");

        assert!(rankings.window_for(date("2015-06-30")).is_none());
        assert!(!rankings.is_eligible("Harvard University", date("2015-06-30")));
    }

    #[test]
    fn rejects_malformed_dates() {
        let csv = "window_start,window_end,university\nlast year,2024-10-31,Harvard University\n";
        assert!(UniversityRankings::from_reader(csv.as_bytes()).is_err());
    }
}
