use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::date_index::DateIndex;
use crate::model::{ConsolidatedReport, DatedLine, OpponentIndex, OpponentSummary};

/// Result of joining an [`OpponentIndex`] against a [`DateIndex`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    pub report: ConsolidatedReport,
    /// Lines dropped because their date has no identifier.
    pub dropped_lines: usize,
}

/// Sum and average the stats allowed by every team.
///
/// Lines whose date is missing from `dates` are dropped entirely. Averages are
/// per game: the denominator is the number of distinct date identifiers seen
/// for the team, not the number of lines.
pub fn consolidate(index: &OpponentIndex, dates: &DateIndex) -> Consolidation {
    let mut consolidation = Consolidation::default();

    for (team, lines) in index {
        let mut summary = OpponentSummary::default();
        let mut game_days = BTreeSet::new();

        for line in lines {
            let Some(date_id) = dates.get(&line.game.date) else {
                warn!(
                    team = %team,
                    player = %line.player,
                    date = %line.game.date,
                    "date has no identifier, dropping line"
                );
                consolidation.dropped_lines += 1;
                continue;
            };

            game_days.insert(date_id);
            for (stat, value) in line.game.stats.iter() {
                *summary.total.entry(stat).or_insert(0.0) += value;
            }
            summary.games.push(DatedLine {
                line: line.clone(),
                date_id,
            });
        }

        if !game_days.is_empty() {
            let games = game_days.len() as f64;
            summary.average = summary
                .total
                .iter()
                .map(|(stat, total)| (*stat, total / games))
                .collect::<BTreeMap<_, _>>();
        }

        debug!(
            team = %team,
            lines = summary.games.len(),
            games = game_days.len(),
            "consolidated opponent stats"
        );
        consolidation.report.insert(team.clone(), summary);
    }

    consolidation
}
