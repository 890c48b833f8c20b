use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{AdminLevel, DEFAULT_LEVELS, DEFAULT_SERVER_TIMEOUT_SECS, QueryStyle};

pub const DEFAULT_OVERPASS_URL: &str = "https://maps.mail.ru/osm/tools/overpass/api/interpreter";
pub const USER_AGENT: &str = concat!("boundary-fetch/", env!("CARGO_PKG_VERSION"));

/// Settings read from `boundary-fetch.toml`
///
/// Every key is optional; anything left out falls back to the CLI value or
/// the built-in default.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub levels: Option<Vec<AdminLevel>>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub query_style: Option<QueryStyle>,
    #[serde(default)]
    pub overpass: Option<OverpassConfig>,
}

fn default_overpass_url() -> String {
    DEFAULT_OVERPASS_URL.to_string()
}

fn default_server_timeout_secs() -> u32 {
    DEFAULT_SERVER_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    /// Client-side request timeout. Unset means wait for as long as the server takes.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Value of the `[timeout:N]` setting embedded in the query
    #[serde(default = "default_server_timeout_secs")]
    pub server_timeout_secs: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: None,
            server_timeout_secs: default_server_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FileConfig {
    /// Read an explicitly requested config file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line. Empty or `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub levels: Vec<AdminLevel>,
    pub output_dir: Option<PathBuf>,
    pub url: Option<String>,
    pub query_style: Option<QueryStyle>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub levels: Vec<AdminLevel>,
    pub output_dir: PathBuf,
    pub query_style: QueryStyle,
    pub overpass: OverpassConfig,
    /// Config file the settings were read from, if any
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from the CLI and an explicit or discovered config file
    ///
    /// An explicit `config_path` must exist and parse. Without one, the first
    /// candidate location holding a parsable file is used.
    pub fn load(cli: CliOverrides, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let found = match config_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Some((path.to_path_buf(), FileConfig::from_path(path)?))
            }
            None => discover_config(&config_candidates()),
        };

        let (source, file) = found.unzip();
        let mut settings = Self::resolve(cli, file);
        settings.source = source;
        Ok(settings)
    }

    /// Merge layers: CLI over config file over built-in defaults
    ///
    /// `--url` only replaces the endpoint; the rest of `[overpass]` is kept.
    pub fn resolve(cli: CliOverrides, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();

        let levels = if !cli.levels.is_empty() {
            cli.levels
        } else {
            file.levels.unwrap_or_else(|| DEFAULT_LEVELS.to_vec())
        };

        let mut overpass = file.overpass.unwrap_or_default();
        if let Some(url) = cli.url {
            overpass.url = url;
        }

        Self {
            levels,
            output_dir: cli
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            query_style: cli.query_style.or(file.query_style).unwrap_or_default(),
            overpass,
            source: None,
        }
    }
}

/// First candidate that exists and parses. Unparsable files are skipped.
fn discover_config(candidates: &[PathBuf]) -> Option<(PathBuf, FileConfig)> {
    candidates.iter().filter(|path| path.is_file()).find_map(|path| {
        match FileConfig::from_path(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config file");
                Some((path.clone(), config))
            }
            Err(e) => {
                tracing::warn!("Skipping config file: {:#}", e);
                None
            }
        }
    })
}

/// Working directory first, then the per-user locations
fn config_candidates() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("boundary-fetch.toml"),
        PathBuf::from(".boundary-fetch.toml"),
    ];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("boundary-fetch").join("config.toml"));
        paths.push(config_dir.join("boundary-fetch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".boundary-fetch.toml"));
    }

    paths
}
