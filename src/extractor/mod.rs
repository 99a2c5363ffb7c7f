pub(crate) mod game_log;
pub(crate) mod roster;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument, warn};

use crate::config::{Config, TeamSources};
use crate::error::{Result, StatsError};
use crate::model::PlayerGames;

/// Source of per-player game lines for one team.
#[allow(async_fn_in_trait)]
pub trait RecordExtractor {
    /// Every player currently listed for `team`, with their game lines.
    async fn extract(&self, team: &str) -> Result<PlayerGames>;
}

/// Extracts game logs from proballers.com team and player pages.
///
/// Only games against teams present in `teams` are kept.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> opponent_stats::Result<()> {
/// use opponent_stats::{Config, ProballersExtractor, RecordExtractor};
///
/// let extractor = ProballersExtractor::from_config(&Config::default());
/// let players = extractor.extract("Utah Jazz").await?;
/// println!("Found {} players", players.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProballersExtractor {
    http: reqwest::Client,
    base_url: String,
    teams: TeamSources,
}

impl ProballersExtractor {
    pub fn new(base_url: impl Into<String>, teams: TeamSources) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, teams)
    }

    /// Use the provided [`reqwest::Client`] for timeouts, proxies, headers, etc.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        teams: TeamSources,
    ) -> Self {
        Self {
            http: client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            teams,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.teams.clone())
    }

    pub fn team_url(&self, team: &str) -> Result<String> {
        let locator = self
            .teams
            .get(team)
            .ok_or_else(|| StatsError::UnknownTeam(team.to_string()))?;
        Ok(format!("{}/es/baloncesto/equipo/{locator}", self.base_url))
    }
}

impl RecordExtractor for ProballersExtractor {
    #[instrument(skip(self))]
    async fn extract(&self, team: &str) -> Result<PlayerGames> {
        let team_url = self.team_url(team)?;
        let roster = roster::get_roster(&self.http, &self.base_url, &team_url).await?;

        let mut players = PlayerGames::new();
        for entry in roster {
            let games = game_log::get_game_log(&self.http, &entry.games_url, &self.teams)
                .await
                .unwrap_or_else(|e| {
                    warn!(player = %entry.name, error = %e, "game log unavailable");
                    Vec::new()
                });
            players.insert(entry.name, games);
        }
        debug!(players = players.len(), "extracted team");
        Ok(players)
    }
}

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| StatsError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StatsError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| StatsError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Trimmed text of the first `selector` match inside `element`, falling back
/// to the element's own text.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|inner| inner.text().collect::<String>())
        .unwrap_or_else(|| element.text().collect())
        .replace(['\n', '\t'], "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::game_log::tests::game_log_page;

    fn teams() -> TeamSources {
        TeamSources::from([
            ("Utah Jazz".to_string(), "126/utah-jazz".to_string()),
            ("Miami Heat".to_string(), "113/miami-heat".to_string()),
            ("Boston Celtics".to_string(), "101/boston-celtics".to_string()),
        ])
    }

    const TEAM_PAGE: &str = r#"<html><body>
        <a class="list-player-entry stats-player" href="/es/baloncesto/jugador/1/lauri" title="Lauri Markkanen">Lauri</a>
        <a class="list-player-entry stats-player" href="/es/baloncesto/jugador/2/walker" title="Walker Kessler">Walker</a>
    </body></html>"#;

    #[tokio::test]
    async fn test_extract_team() {
        let mut server = mockito::Server::new_async().await;
        let _team = server
            .mock("GET", "/es/baloncesto/equipo/126/utah-jazz")
            .with_status(200)
            .with_body(TEAM_PAGE)
            .create_async()
            .await;
        let _lauri = server
            .mock("GET", "/es/baloncesto/jugador/1/lauri/partidos")
            .with_status(200)
            .with_body(game_log_page())
            .create_async()
            .await;
        let _walker = server
            .mock("GET", "/es/baloncesto/jugador/2/walker/partidos")
            .with_status(500)
            .create_async()
            .await;

        let extractor = ProballersExtractor::new(server.url(), teams());
        let players = extractor.extract("Utah Jazz").await.unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players["Lauri Markkanen"].len(), 2);
        assert!(players["Walker Kessler"].is_empty());
    }

    #[tokio::test]
    async fn test_extract_team_page_failure() {
        let mut server = mockito::Server::new_async().await;
        let _team = server
            .mock("GET", "/es/baloncesto/equipo/126/utah-jazz")
            .with_status(404)
            .create_async()
            .await;

        let extractor = ProballersExtractor::new(server.url(), teams());
        let err = extractor.extract("Utah Jazz").await.unwrap_err();
        assert!(matches!(
            err,
            StatsError::UnexpectedStatus { status, .. } if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_extract_unknown_team() {
        let extractor = ProballersExtractor::new("http://127.0.0.1:9", teams());
        let err = extractor.extract("Seattle SuperSonics").await.unwrap_err();
        assert!(matches!(err, StatsError::UnknownTeam(team) if team == "Seattle SuperSonics"));
    }

    #[test]
    fn test_team_url() {
        let extractor = ProballersExtractor::new("https://www.proballers.com/", teams());
        assert_eq!(
            extractor.team_url("Miami Heat").unwrap(),
            "https://www.proballers.com/es/baloncesto/equipo/113/miami-heat"
        );
    }
}
