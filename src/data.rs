//! Data source: year-labelled ranking lists loaded from JSON.
//!
//! The on-disk shape is a single object mapping year labels to arrays of
//! records (`rank`, `item`, `category`, `percentage`), matching the data
//! files the chart has always consumed. Years sort lexicographically, which
//! is also chronological for plain year labels.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::entry::RankEntry;
use crate::error::{Error, Result};
use crate::transform::{self, Transform};

/// All years of ranking data for one chart.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    years: BTreeMap<String, Vec<RankEntry>>,
}

/// The year labels a single chart draws: previous on the left, current on
/// the right, and optionally a third window two years back for secondary
/// indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearWindow {
    /// Left-column year label.
    pub previous: String,
    /// Right-column year label.
    pub current: String,
    /// Optional two-years-back label.
    pub two_back: Option<String>,
}

impl DataSet {
    /// Parse a data set from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let years: BTreeMap<String, Vec<RankEntry>> = serde_json::from_str(json)?;
        Ok(Self { years })
    }

    /// Load a data set from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build a data set directly from year-labelled entry lists.
    #[must_use]
    pub fn from_years(years: BTreeMap<String, Vec<RankEntry>>) -> Self {
        Self { years }
    }

    /// Year labels in ascending order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.years.keys().map(String::as_str).collect()
    }

    /// One year's entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingYear`] if the label is absent.
    pub fn year(&self, label: &str) -> Result<&[RankEntry]> {
        self.years
            .get(label)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingYear(label.to_string()))
    }

    /// Apply a transform sequence to every year in place.
    ///
    /// The transformed entries are re-validated when indexed, so a
    /// transform that introduces duplicates or zero ranks still fails the
    /// invocation rather than producing a partial chart.
    pub fn apply_transforms(&mut self, transforms: &[Transform]) {
        for entries in self.years.values_mut() {
            transform::apply_all(transforms, entries);
        }
    }

    /// Select the chart window.
    ///
    /// With no explicit `current`, the last two years in label order are
    /// used. `two_back` must name an existing year when given; when
    /// `infer_two_back` is set and at least three years exist, the label
    /// immediately before the previous year is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingYear`] when fewer than two years exist, or
    /// when a requested label is absent.
    pub fn window(
        &self,
        current: Option<&str>,
        two_back: Option<&str>,
        infer_two_back: bool,
    ) -> Result<YearWindow> {
        let labels: Vec<&String> = self.years.keys().collect();
        if labels.len() < 2 {
            return Err(Error::MissingYear(
                "at least two years are required".to_string(),
            ));
        }

        let current_pos = match current {
            Some(label) => labels
                .iter()
                .position(|l| l.as_str() == label)
                .ok_or_else(|| Error::MissingYear(label.to_string()))?,
            None => labels.len() - 1,
        };
        if current_pos == 0 {
            return Err(Error::MissingYear(format!(
                "no year precedes {}",
                labels[current_pos]
            )));
        }

        let two_back_label = match two_back {
            Some(label) => {
                if !self.years.contains_key(label) {
                    return Err(Error::MissingYear(label.to_string()));
                }
                Some(label.to_string())
            }
            None if infer_two_back && current_pos >= 2 => {
                Some(labels[current_pos - 2].clone())
            }
            None => None,
        };

        Ok(YearWindow {
            previous: labels[current_pos - 1].clone(),
            current: labels[current_pos].clone(),
            two_back: two_back_label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "2022": [{"rank": 1, "item": "a", "category": "Group A", "percentage": 40.0}],
        "2023": [{"rank": 1, "item": "b", "category": "Group B", "percentage": 35.0}],
        "2024": [
            {"rank": 1, "item": "a", "category": "Group A", "percentage": 38.0},
            {"rank": 2, "item": "b", "category": "Group B", "percentage": 30.0}
        ]
    }"#;

    #[test]
    fn test_parse_and_lookup() {
        let data = DataSet::from_json_str(SAMPLE).unwrap();
        assert_eq!(data.labels(), vec!["2022", "2023", "2024"]);
        assert_eq!(data.year("2024").unwrap().len(), 2);
        assert!(matches!(
            data.year("1999").unwrap_err(),
            Error::MissingYear(_)
        ));
    }

    #[test]
    fn test_default_window_is_last_two_years() {
        let data = DataSet::from_json_str(SAMPLE).unwrap();
        let window = data.window(None, None, false).unwrap();
        assert_eq!(window.previous, "2023");
        assert_eq!(window.current, "2024");
        assert_eq!(window.two_back, None);
    }

    #[test]
    fn test_window_infers_two_back() {
        let data = DataSet::from_json_str(SAMPLE).unwrap();
        let window = data.window(None, None, true).unwrap();
        assert_eq!(window.two_back.as_deref(), Some("2022"));
    }

    #[test]
    fn test_window_explicit_current() {
        let data = DataSet::from_json_str(SAMPLE).unwrap();
        let window = data.window(Some("2023"), None, false).unwrap();
        assert_eq!(window.previous, "2022");
        assert_eq!(window.current, "2023");
    }

    #[test]
    fn test_window_rejects_single_year() {
        let data = DataSet::from_json_str(
            r#"{"2024": [{"rank": 1, "item": "a", "category": "X", "percentage": 1.0}]}"#,
        )
        .unwrap();
        assert!(data.window(None, None, false).is_err());
    }

    #[test]
    fn test_window_missing_two_back_label() {
        let data = DataSet::from_json_str(SAMPLE).unwrap();
        assert!(data.window(None, Some("1999"), false).is_err());
    }

    #[test]
    fn test_apply_transforms_touches_every_year() {
        let mut data = DataSet::from_json_str(SAMPLE).unwrap();
        data.apply_transforms(&[Transform::ScaleShare { factor: 0.5 }]);
        assert!((data.year("2022").unwrap()[0].share - 20.0).abs() < f32::EPSILON);
        assert!((data.year("2024").unwrap()[1].share - 15.0).abs() < f32::EPSILON);
    }
}
