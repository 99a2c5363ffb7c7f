use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::store::{ArtifactStore, TeamStore};

/// Team identifier to the path locating its page on the source site.
pub type TeamSources = BTreeMap<String, String>;

pub const DEFAULT_BASE_URL: &str = "https://www.proballers.com";

const NBA_TEAMS: [(&str, &str); 30] = [
    ("Atlanta Hawks", "100/atlanta-hawks"),
    ("Boston Celtics", "101/boston-celtics"),
    ("Brooklyn Nets", "116/brooklyn-nets"),
    ("Charlotte Hornets", "825/charlotte-hornets"),
    ("Chicago Bulls", "103/chicago-bulls"),
    ("Cleveland Cavaliers", "104/cleveland-cavaliers"),
    ("Dallas Mavericks", "105/dallas-mavericks"),
    ("Denver Nuggets", "106/denver-nuggets"),
    ("Detroit Pistons", "107/detroit-pistons"),
    ("Golden State Warriors", "108/golden-state-warriors"),
    ("Houston Rockets", "109/houston-rockets"),
    ("Indiana Pacers", "110/indiana-pacers"),
    ("Los Angeles Clippers", "111/los-angeles-clippers"),
    ("Los Angeles Lakers", "112/los-angeles-lakers"),
    ("Memphis Grizzlies", "127/memphis-grizzlies"),
    ("Miami Heat", "113/miami-heat"),
    ("Milwaukee Bucks", "114/milwaukee-bucks"),
    ("Minnesota Timberwolves", "115/minnesota-timberwolves"),
    ("New Orleans Pelicans", "102/new-orleans-pelicans"),
    ("New York Knicks", "117/new-york-knicks"),
    ("Oklahoma City Thunder", "1827/oklahoma-city-thunder"),
    ("Orlando Magic", "118/orlando-magic"),
    ("Philadelphia 76ers", "119/philadelphia-76ers"),
    ("Phoenix Suns", "120/phoenix-suns"),
    ("Portland Trail Blazers", "121/portland-trail-blazers"),
    ("Sacramento Kings", "122/sacramento-kings"),
    ("San Antonio Spurs", "123/san-antonio-spurs"),
    ("Toronto Raptors", "125/toronto-raptors"),
    ("Utah Jazz", "126/utah-jazz"),
    ("Washington Wizards", "128/washington-wizards"),
];

/// Runtime settings for a refresh / rebuild cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub data_dir: PathBuf,
    /// First year covered by the date index.
    pub start_year: i32,
    /// Last year covered by the date index.
    pub end_year: i32,
    pub teams: TeamSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("data"),
            start_year: 2019,
            end_year: 2028,
            teams: NBA_TEAMS
                .iter()
                .map(|(name, path)| (name.to_string(), path.to_string()))
                .collect(),
        }
    }
}

impl Config {
    /// Read a JSON config file. Keys that are absent keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| StatsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), teams = config.teams.len(), "loaded config");
        Ok(config)
    }

    pub fn team_store(&self) -> TeamStore {
        TeamStore::new(self.data_dir.join("teams"))
    }

    pub fn artifact_store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.data_dir)
    }
}
