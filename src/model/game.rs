use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::{HomeOrAway, Stat};

/// One value per [`Stat`], flattened into the surrounding JSON object.
///
/// Every field falls back to `0` when it is missing or not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    #[serde(rename = "PTS", default, deserialize_with = "lenient_number")]
    pub points: f64,
    #[serde(rename = "REB", default, deserialize_with = "lenient_number")]
    pub rebounds: f64,
    #[serde(rename = "AST", default, deserialize_with = "lenient_number")]
    pub assists: f64,
    #[serde(rename = "MIN", default, deserialize_with = "lenient_number")]
    pub minutes: f64,
    #[serde(rename = "2M", default, deserialize_with = "lenient_number")]
    pub two_made: f64,
    #[serde(rename = "2A", default, deserialize_with = "lenient_number")]
    pub two_attempted: f64,
    #[serde(rename = "3M", default, deserialize_with = "lenient_number")]
    pub three_made: f64,
    #[serde(rename = "3A", default, deserialize_with = "lenient_number")]
    pub three_attempted: f64,
    #[serde(rename = "STL", default, deserialize_with = "lenient_number")]
    pub steals: f64,
    #[serde(rename = "BLK", default, deserialize_with = "lenient_number")]
    pub blocks: f64,
    #[serde(rename = "TO", default, deserialize_with = "lenient_number")]
    pub turnovers: f64,
    #[serde(rename = "PTS+AST", default, deserialize_with = "lenient_number")]
    pub points_assists: f64,
    #[serde(rename = "REB+AST", default, deserialize_with = "lenient_number")]
    pub rebounds_assists: f64,
    #[serde(rename = "PTS+REB", default, deserialize_with = "lenient_number")]
    pub points_rebounds: f64,
    #[serde(rename = "PTS+REB+AST", default, deserialize_with = "lenient_number")]
    pub points_rebounds_assists: f64,
}

impl StatLine {
    /// Fill the composite fields from the base fields.
    pub fn with_composites(mut self) -> Self {
        self.points_assists = self.points + self.assists;
        self.rebounds_assists = self.rebounds + self.assists;
        self.points_rebounds = self.points + self.rebounds;
        self.points_rebounds_assists = self.points + self.rebounds + self.assists;
        self
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Points => self.points,
            Stat::Rebounds => self.rebounds,
            Stat::Assists => self.assists,
            Stat::Minutes => self.minutes,
            Stat::TwoMade => self.two_made,
            Stat::TwoAttempted => self.two_attempted,
            Stat::ThreeMade => self.three_made,
            Stat::ThreeAttempted => self.three_attempted,
            Stat::Steals => self.steals,
            Stat::Blocks => self.blocks,
            Stat::Turnovers => self.turnovers,
            Stat::PointsAssists => self.points_assists,
            Stat::ReboundsAssists => self.rebounds_assists,
            Stat::PointsRebounds => self.points_rebounds,
            Stat::PointsReboundsAssists => self.points_rebounds_assists,
        }
    }

    /// Every `(stat, value)` pair in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::all().map(move |stat| (stat, self.get(stat)))
    }
}

/// One player's recorded statistics for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLine {
    /// Calendar-date label as shown on the source page, e.g. `"1 ene 2024"`.
    #[serde(default)]
    pub date: String,
    /// Opposing team identifier. Empty when the source row was malformed.
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub home_or_away: HomeOrAway,
    #[serde(flatten)]
    pub stats: StatLine,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    };
    Ok(if value.is_finite() { value } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_composites() {
        let stats = StatLine {
            points: 20.0,
            rebounds: 7.0,
            assists: 5.0,
            ..Default::default()
        }
        .with_composites();

        assert_eq!(stats.points_assists, 25.0);
        assert_eq!(stats.rebounds_assists, 12.0);
        assert_eq!(stats.points_rebounds, 27.0);
        assert_eq!(stats.points_rebounds_assists, 32.0);
    }

    #[test]
    fn test_game_line_wire_format() {
        let line: GameLine = serde_json::from_str(
            r#"{
                "date": "3 nov 2024",
                "opponent": "Boston Celtics",
                "home_or_away": "home",
                "PTS": 12,
                "REB": "4",
                "AST": null,
                "2M": "n/a",
                "PTS+REB": 16.0
            }"#,
        )
        .unwrap();

        assert_eq!(line.date, "3 nov 2024");
        assert_eq!(line.opponent, "Boston Celtics");
        assert_eq!(line.home_or_away, HomeOrAway::Home);
        assert_eq!(line.stats.points, 12.0);
        assert_eq!(line.stats.rebounds, 4.0);
        assert_eq!(line.stats.assists, 0.0);
        assert_eq!(line.stats.two_made, 0.0);
        assert_eq!(line.stats.steals, 0.0);
        assert_eq!(line.stats.points_rebounds, 16.0);

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["PTS+REB+AST"], 0.0);
        assert_eq!(value["home_or_away"], "home");
    }

    #[test]
    fn test_missing_opponent_deserializes_empty() {
        let line: GameLine = serde_json::from_str(r#"{"date": "1 ene 2024", "PTS": 3}"#).unwrap();
        assert!(line.opponent.is_empty());
        assert_eq!(line.home_or_away, HomeOrAway::Away);
    }
}
