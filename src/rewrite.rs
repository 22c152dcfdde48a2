//! Asset-reference rewriting over a body of HTML text

use serde::Serialize;

use crate::assets::AssetSet;
use crate::version::derive;

/// Placeholder reported when an asset reference had no version token
pub const NO_VERSION: &str = "(none)";

/// One rewritten asset reference, in order of appearance in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub asset: String,
    pub from: String,
    pub to: String,
}

/// Rewrite every recognized asset reference in `text`, deriving a new
/// version token per occurrence against the run's single `base_date`.
///
/// Occurrences whose derived token equals the existing one are left
/// byte-for-byte identical and produce no record. A reference with no
/// existing token gains a `?v=` query. Returns the rewritten text and the
/// change records in text order.
pub fn rewrite_text(
    text: &str,
    assets: &AssetSet,
    base_date: &str,
    force: bool,
) -> (String, Vec<ChangeRecord>) {
    let mut changes = Vec::new();

    let rewritten = assets.pattern().replace_all(text, |caps: &regex::Captures<'_>| {
        let asset = &caps[1];
        let existing = caps.get(2).map(|m| m.as_str());
        let next = derive(existing, base_date, force);

        if existing == Some(next.as_str()) {
            return caps[0].to_string();
        }

        changes.push(ChangeRecord {
            asset: asset.to_string(),
            from: existing.unwrap_or(NO_VERSION).to_string(),
            to: next.clone(),
        });
        format!("{asset}?v={next}")
    });

    (rewritten.into_owned(), changes)
}
