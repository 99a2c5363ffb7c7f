use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::game::GameLine;

/// A game line filed under the team it was played against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLine {
    #[serde(flatten)]
    pub game: GameLine,
    pub player: String,
    /// The player's own team.
    pub team: String,
}

/// Every performance line recorded against each opposing team.
pub type OpponentIndex = BTreeMap<String, Vec<PerformanceLine>>;
