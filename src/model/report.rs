use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::opponent::PerformanceLine;
use crate::enums::Stat;

/// A performance line stamped with its date identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedLine {
    #[serde(flatten)]
    pub line: PerformanceLine,
    pub date_id: u32,
}

/// Stats allowed by one team: the dated lines, their sums, and per-game means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpponentSummary {
    pub games: Vec<DatedLine>,
    pub total: BTreeMap<Stat, f64>,
    pub average: BTreeMap<Stat, f64>,
}

/// Opponent-allowed stats for every team.
pub type ConsolidatedReport = BTreeMap<String, OpponentSummary>;
