//! Mapping of loosely-shaped server records onto [`Person`].
//!
//! Some backends return only a combined `name`, or omit email and avatar.
//! The mapping fills every missing field deterministically from the record id
//! and never fails.

use super::model::Person;
use serde_json::Value;

/// Base URL for synthesized avatars.
pub const AVATAR_BASE_URL: &str = "https://i.pravatar.cc/150?img=";

/// Surnames used when a record carries no last name at all, indexed by `id % 5`.
const FALLBACK_SURNAMES: [&str; 5] = ["Smith", "Johnson", "Brown", "Taylor", "Anderson"];

/// Builds the avatar URL for a record id.
///
/// # Example
///
/// ```
/// use people_core::person::build_avatar_url;
///
/// assert_eq!(build_avatar_url(1), "https://i.pravatar.cc/150?img=2");
/// assert_eq!(build_avatar_url(70), "https://i.pravatar.cc/150?img=1");
/// ```
pub fn build_avatar_url(id: u64) -> String {
    format!("{}{}", AVATAR_BASE_URL, (id % 70) + 1)
}

/// Maps a raw JSON record onto a canonical [`Person`].
///
/// Resolution order per field:
/// - `id`: numeric value (truncated), numeric string, otherwise `0`
/// - `first_name`: structured field, first token of `name`, `User{id}`
/// - `last_name`: structured field, second token of `name`, surname list
/// - `email`: structured field, `{first}.{last}@example.com` lowercased
/// - `avatar`: structured field, [`build_avatar_url`]
///
/// Empty strings and non-string values count as missing.
pub fn normalize_person(raw: &Value) -> Person {
    let id = coerce_id(raw.get("id"));
    let (name_first, name_last) = split_name(raw.get("name"));

    let first_name = non_empty_str(raw.get("first_name"))
        .or(name_first)
        .unwrap_or_else(|| format!("User{}", id));

    let last_name = non_empty_str(raw.get("last_name"))
        .or(name_last)
        .unwrap_or_else(|| FALLBACK_SURNAMES[(id % 5) as usize].to_string());

    let email = non_empty_str(raw.get("email")).unwrap_or_else(|| {
        format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        )
    });

    let avatar = non_empty_str(raw.get("avatar")).unwrap_or_else(|| build_avatar_url(id));

    Person {
        id,
        first_name,
        last_name,
        email,
        avatar,
    }
}

fn coerce_id(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(float_to_id))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_id))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn float_to_id(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 {
        Some(value.trunc() as u64)
    } else {
        None
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Takes the first two space-separated tokens of a combined name.
///
/// Tokens after the second are dropped so derived emails never contain a space.
fn split_name(value: Option<&Value>) -> (Option<String>, Option<String>) {
    let Some(name) = value.and_then(Value::as_str).map(str::trim) else {
        return (None, None);
    };

    let mut tokens = name.split(' ');
    let keep = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);
    let first = keep(tokens.next());
    let last = keep(tokens.next());
    (first, last)
}
