//! Expected per-battle performance for each ship, used as the scoring
//! reference.
//!
//! The baseline is loaded once before the listener starts and shared
//! read-only behind an `Arc` for the lifetime of the process.
//!
//! # File format
//!
//! ```json
//! {
//!   "time": 1700000000,
//!   "data": {
//!     "4179539408": {"average_damage_dealt": 31750.2, "average_frags": 0.71, "win_rate": 49.8},
//!     "4181604336": []
//!   }
//! }
//! ```
//!
//! Rows that are not objects with all three averages are skipped; the
//! published dataset uses `[]` for ships it has no numbers for.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::error::BaselineError;

/// Population averages for one ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineEntry {
    pub average_damage_dealt: f64,
    pub average_frags: f64,
    /// Win rate in percent (0-100).
    pub win_rate: f64,
}

impl BaselineEntry {
    #[must_use]
    pub const fn new(average_damage_dealt: f64, average_frags: f64, win_rate: f64) -> Self {
        Self {
            average_damage_dealt,
            average_frags,
            win_rate,
        }
    }
}

#[derive(Deserialize)]
struct RawBaseline {
    #[serde(default)]
    time: Option<i64>,
    data: HashMap<u64, RawEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Entry(BaselineEntry),
    Empty(IgnoredAny),
}

/// Immutable `ship_id -> BaselineEntry` table.
#[derive(Debug, Clone, Default)]
pub struct Baseline {
    generated_at: Option<DateTime<Utc>>,
    entries: HashMap<u64, BaselineEntry>,
}

impl Baseline {
    /// Build a baseline from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (u64, BaselineEntry)>) -> Self {
        Self {
            generated_at: None,
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse the published expected-values JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError::Parse`] when the document is not valid JSON
    /// or lacks the `data` table.
    pub fn from_json(content: &str) -> Result<Self, BaselineError> {
        let raw: RawBaseline = serde_json::from_str(content).map_err(BaselineError::Parse)?;

        let entries = raw
            .data
            .into_iter()
            .filter_map(|(ship_id, entry)| match entry {
                RawEntry::Entry(entry) => Some((ship_id, entry)),
                RawEntry::Empty(_) => None,
            })
            .collect();

        Ok(Self {
            generated_at: raw.time.and_then(|secs| DateTime::from_timestamp(secs, 0)),
            entries,
        })
    }

    /// Read and parse a baseline file.
    ///
    /// # Errors
    ///
    /// Returns [`BaselineError::Read`] if the file cannot be read and
    /// [`BaselineError::Parse`] if its content is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BaselineError> {
        let content = fs::read_to_string(path).map_err(BaselineError::Read)?;
        Self::from_json(&content)
    }

    #[must_use]
    pub fn get(&self, ship_id: u64) -> Option<&BaselineEntry> {
        self.entries.get(&ship_id)
    }

    /// When the dataset was generated, if the file says so.
    #[must_use]
    pub const fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "time": 1700000000,
        "data": {
            "100": {"average_damage_dealt": 1000.0, "average_frags": 1.0, "win_rate": 55.0},
            "200": [],
            "300": {"average_damage_dealt": 25000.5, "average_frags": 0.8, "win_rate": 49.1}
        }
    }"#;

    #[test]
    fn parses_entries_and_skips_empty_rows() {
        let baseline = Baseline::from_json(SAMPLE).unwrap();

        assert_eq!(baseline.len(), 2);
        assert_eq!(
            baseline.get(100),
            Some(&BaselineEntry::new(1000.0, 1.0, 55.0))
        );
        assert!(baseline.get(200).is_none());
        assert!(baseline.get(300).is_some());
    }

    #[test]
    fn reads_generation_time() {
        let baseline = Baseline::from_json(SAMPLE).unwrap();
        let generated = baseline.generated_at().unwrap();
        assert_eq!(generated.timestamp(), 1_700_000_000);
    }

    #[test]
    fn time_is_optional() {
        let baseline = Baseline::from_json(r#"{"data": {}}"#).unwrap();
        assert!(baseline.generated_at().is_none());
        assert!(baseline.is_empty());
    }

    #[test]
    fn missing_data_table_is_an_error() {
        let result = Baseline::from_json(r#"{"time": 1}"#);
        assert!(matches!(result, Err(BaselineError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Baseline::load("/nonexistent/prserver/expected.json");
        assert!(matches!(result, Err(BaselineError::Read(_))));
    }
}
