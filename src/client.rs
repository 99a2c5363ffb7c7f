use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::consolidate::consolidate;
use crate::error::Result;
use crate::extractor::{ProballersExtractor, RecordExtractor};
use crate::inverter::invert;
use crate::model::{ConsolidatedReport, GameLine, OpponentSummary, TeamRecord};
use crate::store::{ArtifactStore, SkippedRecord, TeamStore};

/// The main entry point: refreshes team logs and rebuilds opponent stats.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> opponent_stats::Result<()> {
/// use opponent_stats::{Config, StatsClient};
///
/// let client = StatsClient::new(Config::default());
/// let summary = client.update_all_today().await?;
/// println!("{} teams failed", summary.refresh.failed.len());
/// let heat = client.team_report("Miami Heat")?;
/// println!("{:?}", heat.average);
/// # Ok(())
/// # }
/// ```
pub struct StatsClient<E = ProballersExtractor> {
    extractor: E,
    config: Config,
    teams: TeamStore,
    artifacts: ArtifactStore,
}

/// Outcome of refreshing every configured team.
#[derive(Debug, Default)]
pub struct RefreshSummary {
    pub refreshed: Vec<String>,
    pub up_to_date: Vec<String>,
    /// Teams whose refresh failed, with the error text.
    pub failed: Vec<(String, String)>,
}

/// Counts from one inversion + consolidation pass.
#[derive(Debug, Default)]
pub struct RebuildSummary {
    pub teams_read: usize,
    pub skipped_records: Vec<SkippedRecord>,
    pub malformed_lines: usize,
    pub dropped_lines: usize,
    pub opponents: usize,
}

#[derive(Debug, Default)]
pub struct UpdateSummary {
    pub refresh: RefreshSummary,
    pub rebuild: RebuildSummary,
}

impl StatsClient<ProballersExtractor> {
    /// Create a client that scrapes the configured source site.
    pub fn new(config: Config) -> Self {
        let extractor = ProballersExtractor::from_config(&config);
        Self::with_extractor(config, extractor)
    }
}

impl<E: RecordExtractor> StatsClient<E> {
    /// Create a client using the provided extractor.
    pub fn with_extractor(config: Config, extractor: E) -> Self {
        Self {
            teams: config.team_store(),
            artifacts: config.artifact_store(),
            extractor,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_stale(&self, team: &str, today: NaiveDate) -> bool {
        self.teams.is_stale(team, today)
    }

    /// Re-extract `team` if its record is stale, merging new games into it.
    #[instrument(skip(self))]
    pub async fn refresh_team(&self, team: &str, today: NaiveDate) -> Result<TeamRecord> {
        if !self.teams.is_stale(team, today) {
            info!("team is up to date");
            return self.teams.load(team);
        }
        self.refresh_stale(team, today).await
    }

    /// Extract and save `team` without consulting its stored stamp.
    async fn refresh_stale(&self, team: &str, today: NaiveDate) -> Result<TeamRecord> {
        let fresh = self.extractor.extract(team).await?;
        self.teams.save(team, fresh, today)
    }

    /// Refresh every configured team in turn. A failing team does not stop
    /// the batch.
    #[instrument(skip(self))]
    pub async fn refresh_all(&self, today: NaiveDate) -> RefreshSummary {
        let mut summary = RefreshSummary::default();
        for team in self.config.teams.keys() {
            if !self.teams.is_stale(team, today) {
                summary.up_to_date.push(team.clone());
                continue;
            }
            match self.refresh_stale(team, today).await {
                Ok(_) => summary.refreshed.push(team.clone()),
                Err(e) => {
                    warn!(team = %team, error = %e, "refresh failed");
                    summary.failed.push((team.clone(), e.to_string()));
                }
            }
        }
        info!(
            refreshed = summary.refreshed.len(),
            up_to_date = summary.up_to_date.len(),
            failed = summary.failed.len(),
            "refreshed teams"
        );
        summary
    }

    /// Rebuild the opponent index and consolidated report from every stored
    /// team record.
    #[instrument(skip(self))]
    pub fn rebuild(&self) -> Result<RebuildSummary> {
        let loaded = self.teams.load_all()?;
        let inversion = invert(&loaded.records);
        self.artifacts.save_opponent_index(&inversion.index)?;

        let dates = self
            .artifacts
            .load_or_build_date_index(self.config.start_year, self.config.end_year)?;
        let consolidation = consolidate(&inversion.index, &dates);
        self.artifacts.save_report(&consolidation.report)?;

        let summary = RebuildSummary {
            teams_read: loaded.records.len(),
            skipped_records: loaded.skipped,
            malformed_lines: inversion.malformed_lines,
            dropped_lines: consolidation.dropped_lines,
            opponents: consolidation.report.len(),
        };
        info!(
            teams = summary.teams_read,
            skipped = summary.skipped_records.len(),
            malformed = summary.malformed_lines,
            dropped = summary.dropped_lines,
            opponents = summary.opponents,
            "rebuilt opponent report"
        );
        Ok(summary)
    }

    /// Refresh all teams, then rebuild once every refresh has finished.
    pub async fn update_all(&self, today: NaiveDate) -> Result<UpdateSummary> {
        let refresh = self.refresh_all(today).await;
        let rebuild = self.rebuild()?;
        Ok(UpdateSummary { refresh, rebuild })
    }

    /// [`update_all`](Self::update_all) against the local calendar date.
    pub async fn update_all_today(&self) -> Result<UpdateSummary> {
        self.update_all(Local::now().date_naive()).await
    }

    pub fn team(&self, team: &str) -> Result<TeamRecord> {
        self.teams.get(team)
    }

    pub fn player_games(&self, team: &str, player: &str) -> Result<Vec<GameLine>> {
        self.teams.player_games(team, player)
    }

    pub fn player_names(&self, team: &str) -> Result<Vec<String>> {
        self.teams.player_names(team)
    }

    pub fn report(&self) -> Result<ConsolidatedReport> {
        self.artifacts.load_report()
    }

    pub fn team_report(&self, team: &str) -> Result<OpponentSummary> {
        self.artifacts.team_report(team)
    }
}
