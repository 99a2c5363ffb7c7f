use std::path::{Path, PathBuf};

use tracing::info;

use super::{read_json, write_json};
use crate::date_index::DateIndex;
use crate::error::{Result, StatsError};
use crate::model::{ConsolidatedReport, OpponentIndex, OpponentSummary};

const OPPONENT_INDEX_FILE: &str = "opponent_stats.json";
const DATE_INDEX_FILE: &str = "date_ids.json";
const REPORT_FILE: &str = "opponent_stats_updated.json";

/// Derived whole-document files: opponent index, date index, and report.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn opponent_index_path(&self) -> PathBuf {
        self.root.join(OPPONENT_INDEX_FILE)
    }

    pub fn date_index_path(&self) -> PathBuf {
        self.root.join(DATE_INDEX_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE)
    }

    pub fn save_opponent_index(&self, index: &OpponentIndex) -> Result<()> {
        write_json(&self.opponent_index_path(), index)
    }

    /// The last written opponent index, or an empty one.
    pub fn load_opponent_index(&self) -> Result<OpponentIndex> {
        Ok(read_json(&self.opponent_index_path())?.unwrap_or_default())
    }

    /// Read the stored date index, building and storing it when absent and
    /// widening it when it does not cover `start_year..=end_year`.
    ///
    /// An existing file that cannot be read is an error: the index is
    /// published reference data and is never silently regenerated. Widening
    /// keeps every stored identifier or fails with
    /// [`StatsError::DateIndexRenumbered`].
    pub fn load_or_build_date_index(&self, start_year: i32, end_year: i32) -> Result<DateIndex> {
        let path = self.date_index_path();
        let index = match read_json::<DateIndex>(&path)? {
            Some(stored) if stored.covers(start_year, end_year) => return Ok(stored),
            Some(stored) => {
                let (first, last) = stored.year_span().unwrap_or((start_year, end_year));
                stored.widen(first.min(start_year), last.max(end_year))?
            }
            None => DateIndex::build(start_year, end_year)?,
        };
        write_json(&path, &index)?;
        info!(path = %path.display(), days = index.len(), "wrote date index");
        Ok(index)
    }

    pub fn save_report(&self, report: &ConsolidatedReport) -> Result<()> {
        write_json(&self.report_path(), report)
    }

    /// The whole report; [`StatsError::NoReport`] if it was never produced.
    pub fn load_report(&self) -> Result<ConsolidatedReport> {
        read_json(&self.report_path())?.ok_or(StatsError::NoReport)
    }

    /// One team's entry in the report.
    pub fn team_report(&self, team: &str) -> Result<OpponentSummary> {
        self.load_report()?
            .remove(team)
            .ok_or_else(|| StatsError::TeamNotFound(team.to_string()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_report_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        assert!(matches!(store.load_report(), Err(StatsError::NoReport)));
        assert!(matches!(store.team_report("X"), Err(StatsError::NoReport)));

        let report = ConsolidatedReport::from([("X".to_string(), OpponentSummary::default())]);
        store.save_report(&report).unwrap();

        assert_eq!(store.load_report().unwrap(), report);
        assert_eq!(store.team_report("X").unwrap(), OpponentSummary::default());
        assert!(matches!(
            store.team_report("Y"),
            Err(StatsError::TeamNotFound(team)) if team == "Y"
        ));
    }

    #[test]
    fn test_date_index_is_built_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let built = store.load_or_build_date_index(2024, 2024).unwrap();
        assert!(store.date_index_path().exists());

        // A narrower request reuses the stored file as is.
        let reread = store.load_or_build_date_index(2024, 2024).unwrap();
        assert_eq!(reread, built);
    }

    #[test]
    fn test_date_index_widens_forward() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        store.load_or_build_date_index(2024, 2024).unwrap();

        let wider = store.load_or_build_date_index(2024, 2026).unwrap();
        assert_eq!(wider.get("1 ene 2024"), Some(1));
        assert_eq!(wider.get("1 ene 2025"), Some(367));
        assert_eq!(wider.year_span(), Some((2024, 2026)));

        // The widened index was written back.
        let reread: DateIndex = read_json(&store.date_index_path()).unwrap().unwrap();
        assert_eq!(reread, wider);
        assert_eq!(store.load_or_build_date_index(2025, 2025).unwrap(), wider);
    }

    #[test]
    fn test_date_index_refuses_earlier_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let built = store.load_or_build_date_index(2024, 2024).unwrap();

        assert!(matches!(
            store.load_or_build_date_index(2023, 2024),
            Err(StatsError::DateIndexRenumbered { .. })
        ));
        let reread: DateIndex = read_json(&store.date_index_path()).unwrap().unwrap();
        assert_eq!(reread, built);
    }

    #[test]
    fn test_unreadable_date_index_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        fs::write(store.date_index_path(), "{\"1 ene 2024\": \"one\"}").unwrap();

        assert!(matches!(
            store.load_or_build_date_index(2024, 2024),
            Err(StatsError::Json { .. })
        ));
    }

    #[test]
    fn test_opponent_index_defaults_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        assert!(store.load_opponent_index().unwrap().is_empty());
    }
}
