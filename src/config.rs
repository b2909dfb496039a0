use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, io, path::Path, path::PathBuf};
use tracing::warn;

pub const JOURNAL_FILE: &str = "mood_journal.csv";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub journal_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    /// Extra scorer words and their valence on the `[-4, 4]` scale.
    pub extra_words: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        // without platform dirs, fall back to the working directory
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_default();
        Self {
            journal_path: data_dir.join(JOURNAL_FILE),
            log_dir: data_dir,
            log_level: "info".to_string(),
            extra_words: BTreeMap::new(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "MoodJournal", "MoodJournal")
}

pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Loads the config at the platform location, writing defaults if it is absent.
pub fn load_or_default() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

/// Parse failures fall back to defaults and leave the file untouched.
pub fn load_from(path: &Path) -> Config {
    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Config>(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Config::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let cfg = Config::default();
            if let Err(e) = save_to(&cfg, path) {
                warn!(path = %path.display(), error = %e, "could not write default config");
            }
            cfg
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            Config::default()
        }
    }
}

pub fn save_to(cfg: &Config, path: &Path) -> Result<()> {
    let raw = toml::to_string_pretty(cfg).wrap_err("serializing config")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating config dir {}", dir.display()))?;
    }
    fs::write(path, raw).wrap_err_with(|| format!("writing config {}", path.display()))?;
    Ok(())
}
