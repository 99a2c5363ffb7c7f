use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use super::{read_json, write_json};
use crate::error::{Result, StatsError};
use crate::model::{GameLine, PlayerGames, TeamRecord};

/// One JSON document per team under a single directory.
#[derive(Debug, Clone)]
pub struct TeamStore {
    root: PathBuf,
}

/// Every record that could be read, plus the files that were skipped.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<TeamRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// A stored document that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub path: PathBuf,
    pub reason: String,
}

impl TeamStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, team: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(team)))
    }

    /// Whether `team` needs a refresh as of `today`.
    ///
    /// True when there is no usable record or no refresh stamp, or the stamp
    /// is older than `today`.
    pub fn is_stale(&self, team: &str, today: NaiveDate) -> bool {
        match read_json::<TeamRecord>(&self.path(team)) {
            Ok(Some(record)) => match record.last_updated() {
                Some(last) => last < today,
                None => true,
            },
            Ok(None) => {
                debug!(team, "no stored record");
                true
            }
            Err(e) => {
                warn!(team, error = %e, "stored record unreadable, treating as stale");
                true
            }
        }
    }

    /// [`is_stale`](Self::is_stale) against the local calendar date.
    pub fn is_stale_today(&self, team: &str) -> bool {
        self.is_stale(team, Local::now().date_naive())
    }

    /// The stored record, or an empty one if nothing is stored yet.
    pub fn load(&self, team: &str) -> Result<TeamRecord> {
        Ok(read_json(&self.path(team))?.unwrap_or_else(|| TeamRecord::empty(team)))
    }

    /// The stored record; [`StatsError::TeamNotFound`] if nothing is stored.
    pub fn get(&self, team: &str) -> Result<TeamRecord> {
        read_json(&self.path(team))?.ok_or_else(|| StatsError::TeamNotFound(team.to_string()))
    }

    pub fn player_games(&self, team: &str, player: &str) -> Result<Vec<GameLine>> {
        let mut record = self.get(team)?;
        record
            .players
            .remove(player)
            .ok_or_else(|| StatsError::PlayerNotFound {
                team: team.to_string(),
                player: player.to_string(),
            })
    }

    pub fn player_names(&self, team: &str) -> Result<Vec<String>> {
        Ok(self.get(team)?.players.into_keys().collect())
    }

    /// Merge `fresh` into the stored record, stamp it with `today`, and write it.
    ///
    /// Games are keyed by `(player, date)`; previously stored games are never
    /// discarded by a refresh.
    #[instrument(skip(self, fresh))]
    pub fn save(&self, team: &str, fresh: PlayerGames, today: NaiveDate) -> Result<TeamRecord> {
        let mut record = match self.load(team) {
            Err(e @ StatsError::Json { .. }) => {
                warn!(error = %e, "stored record malformed, rebuilding from fresh games");
                TeamRecord::empty(team)
            }
            other => other?,
        };
        record.team_name = team.to_string();
        let added = record.merge(fresh);
        record.restamp(today);
        write_json(&self.path(team), &record)?;
        debug!(added, games = record.game_count(), "saved team record");
        Ok(record)
    }

    /// Overwrite the stored document with `record` as given.
    pub fn replace(&self, team: &str, record: &TeamRecord) -> Result<()> {
        write_json(&self.path(team), record)
    }

    /// Read every stored record, skipping documents that fail validation.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> Result<LoadedRecords> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadedRecords::default()),
            Err(source) => {
                return Err(StatsError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let paths = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .sorted()
            .collect_vec();

        let mut loaded = LoadedRecords::default();
        for path in paths {
            let reason = match read_json::<TeamRecord>(&path) {
                Ok(Some(record)) if !record.team_name.trim().is_empty() => {
                    loaded.records.push(record);
                    continue;
                }
                Ok(Some(_)) => "empty team_name".to_string(),
                Ok(None) => continue,
                Err(e) => e.to_string(),
            };
            warn!(path = %path.display(), reason = %reason, "skipping team record");
            loaded.skipped.push(SkippedRecord { path, reason });
        }

        debug!(
            records = loaded.records.len(),
            skipped = loaded.skipped.len(),
            "loaded team records"
        );
        Ok(loaded)
    }
}

/// Escape path separators so distinct team names never share a file.
fn file_stem(team: &str) -> String {
    team.replace('%', "%25")
        .replace('/', "%2F")
        .replace('\\', "%5C")
}
