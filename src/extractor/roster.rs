use itertools::Itertools;
use scraper::Selector;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::extractor::{self, Html};

/// A player listed on a team page and the URL of their game log.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RosterEntry {
    pub name: String,
    pub games_url: String,
}

#[instrument(skip(client, base_url))]
pub(crate) async fn get_roster(
    client: &reqwest::Client,
    base_url: &str,
    team_url: &str,
) -> Result<Vec<RosterEntry>> {
    let document = extractor::get_document(client, team_url).await?;
    let roster = parse_roster(&document, base_url)?;
    debug!(count = roster.len(), "parsed team roster");
    Ok(roster)
}

fn parse_roster(document: &Html, base_url: &str) -> Result<Vec<RosterEntry>> {
    let entry_selector = Selector::parse("a.list-player-entry.stats-player")?;
    let roster = document
        .select(&entry_selector)
        .filter_map(|a| {
            let href = a.value().attr("href")?.trim();
            let name = a.value().attr("title")?.trim();
            if href.is_empty() || name.is_empty() {
                return None;
            }
            Some(RosterEntry {
                name: name.to_string(),
                games_url: format!("{base_url}{href}/partidos"),
            })
        })
        .unique_by(|entry| entry.name.clone())
        .collect();
    Ok(roster)
}
