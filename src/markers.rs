//! City marker records for the map overlay

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CachebumpError, Result};

/// Fill painted inside a marker circle when the record does not carry one
pub const DEFAULT_MARKER_FILL: &str = "rgba(220, 38, 38, 0.2)";

/// One city marker from the site's `centers.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub color: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    pub name: String,
    pub bioregion: String,
    #[serde(default)]
    pub url: String,
}

fn default_fill() -> String {
    DEFAULT_MARKER_FILL.to_string()
}

/// Parse a marker list from JSON text
pub fn parse_markers(json: &str) -> Result<Vec<MarkerRecord>> {
    serde_json::from_str(json).map_err(|e| CachebumpError::MarkerDataError(e.to_string()))
}

/// Load the marker list from a JSON file
pub fn load_markers(path: &Path) -> Result<Vec<MarkerRecord>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CachebumpError::MarkerDataError(format!("{}: {}", path.display(), e)))?;
    parse_markers(&contents)
        .map_err(|e| CachebumpError::MarkerDataError(format!("{}: {}", path.display(), e)))
}
