use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use cineboard_ui::{EXTRA_COUNT, PAGE_SIZE};

/// Board presentation settings; reference defaults apply when unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Cards revealed per show-more step
    pub page_size: Option<usize>,
    /// Cards in each ranked extra zone
    pub extra_count: Option<usize>,
}

impl Settings {
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(PAGE_SIZE)
    }

    pub fn extra_count(&self) -> usize {
        self.extra_count.unwrap_or(EXTRA_COUNT)
    }
}

pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("rs", "", "cineboard")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// An explicit path must exist; the default location is optional.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let (path, required) = match explicit {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_path(), false),
    };
    let Some(path) = path else { return Ok(Settings::default()) };
    if !path.exists() {
        if required {
            bail!("config not found: {}", path.display());
        }
        return Ok(Settings::default());
    }
    let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse {}", path.display()))
}
