use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::error::{Result, StatsError};

const MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Format a date the way game logs print it: `"1 ene 2024"`.
pub fn date_label(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// Calendar-date label to a stable ascending identifier.
///
/// Serialized as a JSON object whose keys appear in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DateIndex {
    ids: HashMap<String, u32>,
}

impl DateIndex {
    /// Number every day from Jan 1 of `start_year` to Dec 31 of `end_year`,
    /// starting at 1.
    pub fn build(start_year: i32, end_year: i32) -> Result<Self> {
        let invalid = || StatsError::InvalidDateRange {
            start: start_year,
            end: end_year,
        };
        if start_year > end_year {
            return Err(invalid());
        }
        let first = NaiveDate::from_ymd_opt(start_year, 1, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(end_year, 12, 31).ok_or_else(invalid)?;

        let ids: HashMap<String, u32> = first
            .iter_days()
            .take_while(|d| *d <= last)
            .zip(1u32..)
            .map(|(d, id)| (date_label(d), id))
            .collect();
        debug!(start_year, end_year, days = ids.len(), "built date index");
        Ok(Self { ids })
    }

    /// Rebuild over a new range, refusing if any existing label would change id.
    pub fn widen(&self, start_year: i32, end_year: i32) -> Result<Self> {
        let rebuilt = Self::build(start_year, end_year)?;
        for (label, previous) in self.iter() {
            let id = rebuilt.get(label);
            if id != Some(previous) {
                return Err(StatsError::DateIndexRenumbered {
                    label: label.to_string(),
                    previous,
                    rebuilt: id,
                });
            }
        }
        Ok(rebuilt)
    }

    /// First and last calendar year present, read from the labels at the two ends.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let year = |label: &str| -> Option<i32> { label.rsplit(' ').next()?.parse().ok() };
        let (first, _) = self.iter().next()?;
        let (last, _) = self.iter().last()?;
        Some((year(first)?, year(last)?))
    }

    /// Whether every day of `start_year..=end_year` has an identifier.
    pub fn covers(&self, start_year: i32, end_year: i32) -> bool {
        self.year_span()
            .is_some_and(|(first, last)| first <= start_year && end_year <= last)
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.ids.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.ids
            .iter()
            .map(|(label, id)| (label.as_str(), *id))
            .sorted_by_key(|(_, id)| *id)
    }
}

impl Serialize for DateIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for (label, id) in self.iter() {
            map.serialize_entry(label, &id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single_year() {
        let index = DateIndex::build(2024, 2024).unwrap();

        assert_eq!(index.len(), 366);
        assert_eq!(index.get("1 ene 2024"), Some(1));
        assert_eq!(index.get("2 ene 2024"), Some(2));
        assert_eq!(index.get("1 feb 2024"), Some(32));
        assert_eq!(index.get("29 feb 2024"), Some(60));
        assert_eq!(index.get("31 dic 2024"), Some(366));
        assert_eq!(index.get("01 ene 2024"), None);
        assert_eq!(index.get("1 jan 2024"), None);
    }

    #[test]
    fn test_build_spans_years() {
        let index = DateIndex::build(2019, 2028).unwrap();
        assert_eq!(index.get("1 ene 2019"), Some(1));
        assert_eq!(index.get("1 ene 2020"), Some(366));
        assert_eq!(index.get("31 dic 2028"), Some(index.len() as u32));
    }

    #[test]
    fn test_build_rejects_inverted_range() {
        assert!(matches!(
            DateIndex::build(2025, 2024),
            Err(StatsError::InvalidDateRange {
                start: 2025,
                end: 2024
            })
        ));
    }

    #[test]
    fn test_widen_forward_keeps_ids() {
        let index = DateIndex::build(2024, 2024).unwrap();
        let wider = index.widen(2024, 2026).unwrap();

        assert_eq!(wider.len(), 366 + 365 + 365);
        for (label, id) in index.iter() {
            assert_eq!(wider.get(label), Some(id));
        }
    }

    #[test]
    fn test_widen_backward_is_refused() {
        let index = DateIndex::build(2024, 2024).unwrap();
        let err = index.widen(2023, 2024).unwrap_err();
        assert!(matches!(
            err,
            StatsError::DateIndexRenumbered { previous: 1, .. }
        ));
    }

    #[test]
    fn test_year_span_and_covers() {
        let index = DateIndex::build(2024, 2026).unwrap();
        assert_eq!(index.year_span(), Some((2024, 2026)));
        assert!(index.covers(2024, 2026));
        assert!(index.covers(2025, 2025));
        assert!(!index.covers(2024, 2027));
        assert!(!index.covers(2023, 2024));
        assert!(!DateIndex::default().covers(2024, 2024));
    }

    #[test]
    fn test_serializes_in_id_order() {
        let index = DateIndex::build(2024, 2024).unwrap();
        let json = serde_json::to_string(&index).unwrap();
        assert!(json.starts_with(r#"{"1 ene 2024":1,"2 ene 2024":2,"#));

        let back: DateIndex = serde_json::from_str(&json).unwrap();
        assert_eq!(back, index);
    }
}
