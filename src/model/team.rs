use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::game::GameLine;
use crate::enums::Stat;

/// Game lines per player name, as returned by an extractor for one team.
pub type PlayerGames = BTreeMap<String, Vec<GameLine>>;

/// The durable record kept for one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team_name: String,
    #[serde(default)]
    pub players: PlayerGames,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_stats: Option<GlobalStats>,
}

/// Refresh stamp plus the per-stat mean over every line of the team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
    #[serde(flatten)]
    pub means: BTreeMap<Stat, f64>,
}

impl TeamRecord {
    /// A record with no players and no refresh stamp.
    pub fn empty(team: &str) -> Self {
        Self {
            team_name: team.to_string(),
            ..Default::default()
        }
    }

    pub fn last_updated(&self) -> Option<NaiveDate> {
        self.global_stats.as_ref().and_then(|g| g.last_updated)
    }

    pub fn game_count(&self) -> usize {
        self.players.values().map(Vec::len).sum()
    }

    /// Merge freshly extracted games, keyed by `(player, date)`.
    ///
    /// Lines already stored for a player and date are kept as they are; lines
    /// for unseen dates are appended in the order given. Returns the number
    /// of lines added.
    pub fn merge(&mut self, fresh: PlayerGames) -> usize {
        let mut added = 0;
        for (player, games) in fresh {
            let stored = self.players.entry(player).or_default();
            let mut known: HashSet<String> = stored.iter().map(|g| g.date.clone()).collect();
            for game in games {
                if known.insert(game.date.clone()) {
                    stored.push(game);
                    added += 1;
                }
            }
        }
        added
    }

    /// Recompute [`GlobalStats`] and stamp it with `today`.
    pub fn restamp(&mut self, today: NaiveDate) {
        self.global_stats = Some(GlobalStats::compute(&self.players, today));
    }
}

impl GlobalStats {
    /// Mean of every stat across all lines, rounded to two decimals.
    pub fn compute(players: &PlayerGames, today: NaiveDate) -> Self {
        let lines: Vec<&GameLine> = players.values().flatten().collect();
        let means = if lines.is_empty() {
            BTreeMap::new()
        } else {
            let count = lines.len() as f64;
            Stat::all()
                .map(|stat| {
                    let sum: f64 = lines.iter().map(|g| g.stats.get(stat)).sum();
                    (stat, (sum / count * 100.0).round() / 100.0)
                })
                .collect()
        };
        Self {
            last_updated: Some(today),
            means,
        }
    }
}
