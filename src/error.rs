use ::scraper::error::SelectorErrorKind;
use std::path::PathBuf;

/// All errors that can occur while refreshing, storing, or aggregating stats.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// No page locator is configured for the team.
    #[error("no source configured for team {0}")]
    UnknownTeam(String),

    /// The team has no stored record, or is absent from the report.
    #[error("team not found: {0}")]
    TeamNotFound(String),

    /// The team record exists but has no games for the player.
    #[error("player {player} not found in team {team}")]
    PlayerNotFound { team: String, player: String },

    /// The consolidated report has never been produced.
    #[error("no opponent report computed yet")]
    NoReport,

    /// Reading or writing a stored document failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored document is not valid JSON or does not match its schema.
    #[error("malformed document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The requested calendar range is empty or not representable.
    #[error("invalid date range {start}..={end}")]
    InvalidDateRange { start: i32, end: i32 },

    /// Rebuilding the date index would change an already published id.
    #[error("date {label} would be renumbered from {previous} to {rebuilt:?}")]
    DateIndexRenumbered {
        label: String,
        previous: u32,
        rebuilt: Option<u32>,
    },
}

impl<'a> From<SelectorErrorKind<'a>> for StatsError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        StatsError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
