use serde::{Deserialize, Serialize};

/// Which side of the court a player's team was on.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HomeOrAway {
    Home,
    #[default]
    Away,
}

/// Every numeric field carried by a game line, in wire order.
///
/// The last four variants are composites derived from the base fields when a
/// line is extracted. Once stored they are treated like any other field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
pub enum Stat {
    #[serde(rename = "PTS")]
    #[strum(serialize = "PTS")]
    Points,
    #[serde(rename = "REB")]
    #[strum(serialize = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    #[strum(serialize = "AST")]
    Assists,
    #[serde(rename = "MIN")]
    #[strum(serialize = "MIN")]
    Minutes,
    #[serde(rename = "2M")]
    #[strum(serialize = "2M")]
    TwoMade,
    #[serde(rename = "2A")]
    #[strum(serialize = "2A")]
    TwoAttempted,
    #[serde(rename = "3M")]
    #[strum(serialize = "3M")]
    ThreeMade,
    #[serde(rename = "3A")]
    #[strum(serialize = "3A")]
    ThreeAttempted,
    #[serde(rename = "STL")]
    #[strum(serialize = "STL")]
    Steals,
    #[serde(rename = "BLK")]
    #[strum(serialize = "BLK")]
    Blocks,
    #[serde(rename = "TO")]
    #[strum(serialize = "TO")]
    Turnovers,
    #[serde(rename = "PTS+AST")]
    #[strum(serialize = "PTS+AST")]
    PointsAssists,
    #[serde(rename = "REB+AST")]
    #[strum(serialize = "REB+AST")]
    ReboundsAssists,
    #[serde(rename = "PTS+REB")]
    #[strum(serialize = "PTS+REB")]
    PointsRebounds,
    #[serde(rename = "PTS+REB+AST")]
    #[strum(serialize = "PTS+REB+AST")]
    PointsReboundsAssists,
}

impl Stat {
    /// Iterate over every stat in declaration order.
    pub fn all() -> impl Iterator<Item = Stat> {
        <Stat as strum::IntoEnumIterator>::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_wire_names_match_display() {
        for stat in Stat::all() {
            let json = serde_json::to_string(&stat).unwrap();
            assert_eq!(json, format!("\"{stat}\""));
        }
        assert_eq!(Stat::all().count(), 15);
    }

    #[test]
    fn test_home_or_away_lowercase() {
        assert_eq!(HomeOrAway::Home.to_string(), "home");
        let parsed: HomeOrAway = serde_json::from_str("\"away\"").unwrap();
        assert_eq!(parsed, HomeOrAway::Away);
    }
}
