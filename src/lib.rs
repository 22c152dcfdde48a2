//! # cachebump
//!
//! Maintenance tools for a static site: a cache-busting helper that rewrites
//! `?v=` version tokens on known asset references across the site's HTML
//! files, and a renderer for the SVG city-marker overlay with its ripple
//! cycle and starfield.
//!
//! ## Example
//!
//! ```rust
//! use cachebump::prelude::*;
//!
//! let assets = AssetSet::new(&["styles.css"]).unwrap();
//! let (out, changes) = rewrite_text(
//!     "<link href=\"styles.css\">",
//!     &assets,
//!     "20250101",
//!     false,
//! );
//! assert_eq!(out, "<link href=\"styles.css?v=20250101\">");
//! assert_eq!(changes.len(), 1);
//! ```

pub mod assets;
pub mod error;
pub mod git;
pub mod markers;
pub mod options;
pub mod rewrite;
pub mod scan;
pub mod schedule;
pub mod svg;
pub mod version;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::assets::AssetSet;
    pub use crate::error::{CachebumpError, Result};
    pub use crate::markers::MarkerRecord;
    pub use crate::options::{FileConfig, RunOptions};
    pub use crate::rewrite::{rewrite_text, ChangeRecord};
    pub use crate::scan::{scan_directory, Summary};
    pub use crate::schedule::{CyclePlayer, CycleSchedule};
    pub use crate::version::{derive, VersionToken};
}
