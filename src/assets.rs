//! The set of managed asset references and its compiled matcher

use regex::Regex;

use crate::error::{CachebumpError, Result};

/// Asset paths managed when no configuration overrides them
pub const DEFAULT_ASSETS: &[&str] = &["styles.css", "script.js", "assets/agent-dot.svg"];

/// Escape one asset path so that `.`, `-`, `/` and any other regex
/// metacharacter match literally inside the alternation.
pub fn escape_literal(path: &str) -> String {
    regex::escape(path)
}

/// A fixed set of recognized asset paths, compiled once into a single
/// literal-alternation matcher.
///
/// The matcher captures the asset path in group 1 and an existing version
/// token, when one is present, in group 2.
#[derive(Debug, Clone)]
pub struct AssetSet {
    paths: Vec<String>,
    pattern: Regex,
}

impl AssetSet {
    /// Compile a matcher over the given asset paths. The paths are matched
    /// case-sensitively, as literal text.
    pub fn new<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        if paths.is_empty() {
            return Err(CachebumpError::ConfigError(
                "asset list is empty".to_string(),
            ));
        }

        let alternation = paths
            .iter()
            .map(|p| escape_literal(p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"({alternation})(?:\?v=([0-9]{{8}}(?:-[0-9]+)?))?"
        ))
        .map_err(|e| CachebumpError::ConfigError(format!("invalid asset pattern: {e}")))?;

        Ok(Self {
            paths: paths.iter().map(|p| p.as_ref().to_string()).collect(),
            pattern,
        })
    }

    /// The paths this set recognizes, in match-priority order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// The compiled matcher
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_literal_keeps_dots_literal() {
        let escaped = escape_literal("styles.css");
        let re = Regex::new(&escaped).unwrap();
        assert!(re.is_match("styles.css"));
        assert!(!re.is_match("stylesXcss"));
    }

    #[test]
    fn test_escape_literal_slash_and_dash() {
        let escaped = escape_literal("assets/agent-dot.svg");
        let re = Regex::new(&escaped).unwrap();
        assert!(re.is_match("assets/agent-dot.svg"));
        assert!(!re.is_match("assets/agentXdotXsvg"));
    }

    #[test]
    fn test_empty_list_rejected() {
        let paths: &[&str] = &[];
        assert!(AssetSet::new(paths).is_err());
    }

    #[test]
    fn test_matches_bare_reference() {
        let set = AssetSet::new(DEFAULT_ASSETS).unwrap();
        let caps = set.pattern().captures("href=\"styles.css\"").unwrap();
        assert_eq!(&caps[1], "styles.css");
        assert!(caps.get(2).is_none());
    }

    #[test]
    fn test_matches_versioned_reference() {
        let set = AssetSet::new(DEFAULT_ASSETS).unwrap();
        let caps = set
            .pattern()
            .captures("src=\"script.js?v=20250813-2\"")
            .unwrap();
        assert_eq!(&caps[1], "script.js");
        assert_eq!(&caps[2], "20250813-2");
    }

    #[test]
    fn test_malformed_version_left_outside_match() {
        // A query that is not an 8-digit token is not captured as a version
        let set = AssetSet::new(DEFAULT_ASSETS).unwrap();
        let caps = set.pattern().captures("styles.css?v=abc").unwrap();
        assert_eq!(&caps[1], "styles.css");
        assert!(caps.get(2).is_none());
    }

    #[test]
    fn test_case_sensitive() {
        let set = AssetSet::new(DEFAULT_ASSETS).unwrap();
        assert!(!set.pattern().is_match("Styles.css"));
    }
}
