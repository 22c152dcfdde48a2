//! Run configuration: immutable per-invocation options and the optional
//! `cachebump.toml` override file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::{AssetSet, DEFAULT_ASSETS};
use crate::error::{CachebumpError, Result};
use crate::version;

/// Options for one cache-busting run. Constructed once at startup and
/// passed explicitly to each component; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Report changes without writing any file
    pub dry_run: bool,
    /// Drop suffixes, resetting today's matches to the bare base date
    pub force: bool,
    /// The 8-digit date this run treats as "today"
    pub base_date: String,
    /// Directory whose HTML files are scanned
    pub dir: PathBuf,
}

/// Resolve the run's base date: an explicit override must be exactly eight
/// digits, otherwise the run aborts before any file is touched; without an
/// override, today's local date is used.
pub fn resolve_base_date(date: Option<&str>) -> Result<String> {
    match date {
        Some(d) if version::is_valid_base_date(d) => Ok(d.to_string()),
        Some(d) => Err(CachebumpError::InvalidDate(d.to_string())),
        None => Ok(version::today_token()),
    }
}

/// Optional `cachebump.toml` in the scanned directory. Overrides the
/// built-in asset list and the default commit message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
}

impl FileConfig {
    /// Load configuration from `<dir>/cachebump.toml`. A missing file yields
    /// the defaults; an unreadable or unparsable file is reported and also
    /// falls back to the defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join("cachebump.toml");
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        log::warn!("Failed to parse {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }

    /// Compile the asset matcher from the configured list, falling back to
    /// the built-in assets when no override is present.
    pub fn asset_set(&self) -> Result<AssetSet> {
        if self.assets.is_empty() {
            AssetSet::new(DEFAULT_ASSETS)
        } else {
            AssetSet::new(&self.assets)
        }
    }
}
