use tracing::{debug, warn};

use crate::model::{OpponentIndex, PerformanceLine, TeamRecord};

/// Result of inverting team records into an [`OpponentIndex`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inversion {
    pub index: OpponentIndex,
    /// Lines skipped because they carried no opponent.
    pub malformed_lines: usize,
}

/// File every game line under the team it was played against.
///
/// Always builds a fresh index from `records`; nothing from a previous run is
/// carried over.
pub fn invert<'a, I>(records: I) -> Inversion
where
    I: IntoIterator<Item = &'a TeamRecord>,
{
    let mut inversion = Inversion::default();
    for record in records {
        for (player, games) in &record.players {
            for game in games {
                let opponent = game.opponent.trim();
                if opponent.is_empty() {
                    warn!(
                        team = %record.team_name,
                        player = %player,
                        date = %game.date,
                        "skipping game line without opponent"
                    );
                    inversion.malformed_lines += 1;
                    continue;
                }
                inversion
                    .index
                    .entry(opponent.to_string())
                    .or_default()
                    .push(PerformanceLine {
                        game: game.clone(),
                        player: player.clone(),
                        team: record.team_name.clone(),
                    });
            }
        }
    }
    debug!(
        opponents = inversion.index.len(),
        malformed = inversion.malformed_lines,
        "inverted team records"
    );
    inversion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameLine, PlayerGames, StatLine};

    fn game(date: &str, opponent: &str, points: f64) -> GameLine {
        GameLine {
            date: date.to_string(),
            opponent: opponent.to_string(),
            stats: StatLine {
                points,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn record(team: &str, players: PlayerGames) -> TeamRecord {
        TeamRecord {
            team_name: team.to_string(),
            players,
            global_stats: None,
        }
    }

    fn sample() -> Vec<TeamRecord> {
        vec![
            record(
                "Boston Celtics",
                PlayerGames::from([
                    (
                        "Tatum".to_string(),
                        vec![
                            game("1 ene 2024", "Miami Heat", 30.0),
                            game("3 ene 2024", "Utah Jazz", 22.0),
                        ],
                    ),
                    (
                        "Brown".to_string(),
                        vec![game("1 ene 2024", "Miami Heat", 18.0)],
                    ),
                ]),
            ),
            record(
                "Miami Heat",
                PlayerGames::from([(
                    "Butler".to_string(),
                    vec![
                        game("1 ene 2024", "Boston Celtics", 25.0),
                        game("5 ene 2024", "", 9.0),
                    ],
                )]),
            ),
        ]
    }

    #[test]
    fn test_invert_files_each_line_once_under_its_opponent() {
        let records = sample();
        let inversion = invert(&records);

        assert_eq!(inversion.index.len(), 3);
        let heat = &inversion.index["Miami Heat"];
        assert_eq!(heat.len(), 2);
        assert!(heat.iter().all(|l| l.team == "Boston Celtics"));
        assert_eq!(
            heat.iter().filter(|l| l.player == "Tatum").count(),
            1,
            "each line must appear exactly once"
        );

        let celtics = &inversion.index["Boston Celtics"];
        assert_eq!(celtics.len(), 1);
        assert_eq!(celtics[0].player, "Butler");
        assert_eq!(celtics[0].team, "Miami Heat");
        assert_eq!(celtics[0].game.stats.points, 25.0);
    }

    #[test]
    fn test_invert_skips_and_counts_missing_opponent() {
        let records = sample();
        let inversion = invert(&records);

        assert_eq!(inversion.malformed_lines, 1);
        assert!(!inversion.index.contains_key(""));
        let total: usize = inversion.index.values().map(Vec::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_invert_is_order_independent_and_idempotent() {
        let records = sample();
        let mut reversed = records.clone();
        reversed.reverse();

        let first = invert(&records);
        let again = invert(&records);
        let flipped = invert(&reversed);

        assert_eq!(first, again);
        assert_eq!(
            first.index.keys().collect::<Vec<_>>(),
            flipped.index.keys().collect::<Vec<_>>()
        );
        for (opponent, lines) in &first.index {
            assert_eq!(lines.len(), flipped.index[opponent].len());
        }
    }

    #[test]
    fn test_invert_empty_input() {
        let inversion = invert(&Vec::<TeamRecord>::new());
        assert!(inversion.index.is_empty());
        assert_eq!(inversion.malformed_lines, 0);
    }
}
