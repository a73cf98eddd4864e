//! Lenient integer deserializers.
//!
//! The grade API is not consistent about numeric fields: the same id may
//! arrive as `7` or `"7"`. These helpers accept both and reject anything
//! else.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid number {s:?}: {e}"))),
    }
}

/// Deserializes an `i64` from a number or a numeric string.
///
/// # Errors
///
/// Fails for any other JSON type or an unparsable string.
pub fn deserialize_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient(deserializer)
}

/// Deserializes a `u32` from a number or a numeric string.
///
/// # Errors
///
/// Fails for any other JSON type, a negative value, or an unparsable string.
pub fn deserialize_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient(deserializer)
}
