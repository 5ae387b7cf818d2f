use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourceConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// 0 groups by type, anything else by first letter.
    #[serde(default)]
    pub layout: i64,
    /// Scope identity that is never listed.
    #[serde(default = "default_self_identity")]
    pub self_identity: String,
}

fn default_self_identity() -> String { "falcon.bhdouglass_falcon".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            layout: 0,
            self_identity: default_self_identity(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_desktop_dirs")]
    pub desktop_dirs: Vec<PathBuf>,
    #[serde(default = "default_remote_index")]
    pub remote_index: PathBuf,
    #[serde(default = "default_locale_dirs")]
    pub locale_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub favorites: Option<PathBuf>,
}

fn default_desktop_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/share/applications/"),
        PathBuf::from("/home/phablet/.local/share/applications/"),
    ]
}

fn default_remote_index() -> PathBuf { PathBuf::from("/home/phablet/.cache/unity-scopes/remote-scopes.json") }
fn default_locale_dirs() -> Vec<PathBuf> { vec![PathBuf::from("/usr/share/locale")] }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            desktop_dirs: default_desktop_dirs(),
            remote_index: default_remote_index(),
            locale_dirs: default_locale_dirs(),
            favorites: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("org", "appscope", "appscope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Loads `path`, or the default location when `None`. A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {:?}", config_path))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {:?}", config_path))?;
    Ok(config)
}
