//! Search helpers shared by the repositories and query strings

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Build a case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
///
/// LIKE metacharacters in the input are escaped so they match literally.
/// Blank input yields `None`, which the queries treat as "no constraint".
///
/// # Example
/// ```
/// use devcap_server::models::contains_pattern;
///
/// assert_eq!(contains_pattern(Some("pixel")), Some("%pixel%".to_string()));
/// assert_eq!(contains_pattern(Some("50%")), Some("%50\\%%".to_string()));
/// assert_eq!(contains_pattern(Some("  ")), None);
/// ```
pub fn contains_pattern(term: Option<&str>) -> Option<String> {
    let term = term.map(str::trim).filter(|t| !t.is_empty())?;

    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    Some(pattern)
}

/// Deserialize an optional query value, treating a blank one as absent.
///
/// `?providerId=` then means the same as omitting `providerId`. Use with
/// `#[serde(default, deserialize_with = "blank_as_none")]`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
