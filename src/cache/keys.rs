//! Cache key generators and per-endpoint TTLs.

use std::time::Duration;

/// TTL for the full character listing.
pub const ALL_CHARACTERS_TTL: Duration = Duration::from_secs(10);

/// TTL for a single character looked up by id.
pub const CHARACTER_BY_ID_TTL: Duration = Duration::from_secs(15);

/// TTL for name search results.
pub const SEARCH_TTL: Duration = Duration::from_secs(30);

/// Key for the full character listing.
#[must_use]
pub fn all_characters() -> String {
    "characters:all".to_string()
}

/// Key for a single character. `id` is the digit string the client sent.
#[must_use]
pub fn character_by_id(id: &str) -> String {
    format!("character:{}", id)
}

/// Key for a name search. Lowercased so "Rick" and "rick" share an entry.
#[must_use]
pub fn character_search(name: &str) -> String {
    format!("character:search:{}", name.to_lowercase())
}
