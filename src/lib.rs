//! Opponent-allowed stats for a basketball league.
//!
//! Team game logs are extracted per team and kept in a [`TeamStore`]. A
//! rebuild inverts every stored log into an [`OpponentIndex`] and joins it
//! against a [`DateIndex`] to get per-opponent totals and per-game averages.

pub use client::{RebuildSummary, RefreshSummary, StatsClient, UpdateSummary};
pub use config::{Config, TeamSources};
pub use consolidate::{consolidate, Consolidation};
pub use date_index::{date_label, DateIndex};
pub use enums::{HomeOrAway, Stat};
pub use error::{Result, StatsError};
pub use extractor::{ProballersExtractor, RecordExtractor};
pub use inverter::{invert, Inversion};
pub use model::*;
pub use store::{ArtifactStore, LoadedRecords, SkippedRecord, TeamStore};

mod client;
mod config;
mod consolidate;
mod date_index;
pub mod enums;
mod error;
mod extractor;
mod inverter;
pub mod model;
mod store;
