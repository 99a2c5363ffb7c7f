use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::{debug, instrument, warn};

use crate::config::TeamSources;
use crate::enums::HomeOrAway;
use crate::error::Result;
use crate::extractor::{self, select_text, Html};
use crate::model::{GameLine, StatLine};

/// Rows shorter than this are not game rows.
const MIN_CELLS: usize = 19;

#[instrument(skip(client, teams))]
pub(crate) async fn get_game_log(
    client: &reqwest::Client,
    url: &str,
    teams: &TeamSources,
) -> Result<Vec<GameLine>> {
    let document = extractor::get_document(client, url).await?;
    let games = parse_game_log(&document, teams)?;
    debug!(count = games.len(), "parsed game log");
    Ok(games)
}

pub(crate) fn parse_game_log(document: &Html, teams: &TeamSources) -> Result<Vec<GameLine>> {
    let table_selector = Selector::parse("table.table")?;
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("td")?;
    let link_selector = Selector::parse("a")?;

    let Some(table) = document.select(&table_selector).next() else {
        return Ok(Vec::new());
    };

    let games = table
        .select(&row_selector)
        .skip(1)
        .filter_map(|row| {
            let cells = row.select(&cell_selector).collect_vec();
            if cells.len() < MIN_CELLS {
                warn!(cells = cells.len(), "row too short, skipping");
                return None;
            }
            parse_row(&cells, &link_selector, teams)
        })
        .collect();
    Ok(games)
}

fn parse_row(cells: &[ElementRef], link: &Selector, teams: &TeamSources) -> Option<GameLine> {
    // "vs Boston Celtics" at home, "@ Boston Celtics" away
    let matchup = select_text(&cells[0], link);
    let home_or_away = if matchup.contains("vs") {
        HomeOrAway::Home
    } else {
        HomeOrAway::Away
    };
    let opponent = matchup.replace("vs", "").replace('@', "").trim().to_string();
    if !teams.contains_key(&opponent) {
        warn!(opponent = %opponent, "opponent is not a tracked team, skipping row");
        return None;
    }

    let date = select_text(&cells[1], link);
    let text = |i: usize| cells[i].text().collect::<String>();
    let (two_made, two_attempted) = shots(&text(7));
    let (three_made, three_attempted) = shots(&text(8));

    let stats = StatLine {
        points: count(&text(3)),
        rebounds: count(&text(4)),
        assists: count(&text(5)),
        minutes: count(&text(6)),
        two_made,
        two_attempted,
        three_made,
        three_attempted,
        steals: count(&text(16)),
        turnovers: count(&text(17)),
        blocks: count(&text(18)),
        ..Default::default()
    }
    .with_composites();

    Some(GameLine {
        date,
        opponent,
        home_or_away,
        stats,
    })
}

/// Whole non-negative counts only; anything else reads as 0.
fn count(text: &str) -> f64 {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse().unwrap_or_default()
    } else {
        0.0
    }
}

/// `"made-attempted"`, or `(0, 0)` when the cell has no dash.
fn shots(text: &str) -> (f64, f64) {
    text.split_once('-')
        .map(|(made, attempted)| {
            (
                made.trim().parse().unwrap_or_default(),
                attempted.trim().parse().unwrap_or_default(),
            )
        })
        .unwrap_or_default()
}
