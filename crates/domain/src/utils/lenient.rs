//! Serde helpers that never reject a calculator field
//!
//! Used with `#[serde(default, deserialize_with = "...")]` on input
//! structs. Whatever JSON value arrives, the field gets a usable value:
//! numbers pass through, strings go through [`parse_or_zero`] or
//! [`is_truthy`], and anything else becomes the zero value.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserializer;

use super::numeric::{finite_or_zero, is_truthy, parse_or_zero};

/// Deserialize any value into an `f64` using the parse-or-zero rule.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientVisitor).map(|value| match value {
        Lenient::Number(n) => finite_or_zero(n),
        Lenient::Text(s) => parse_or_zero(&s),
        Lenient::Flag(_) | Lenient::Nothing => 0.0,
    })
}

/// Deserialize any value into a `bool`; strings use [`is_truthy`].
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientVisitor).map(|value| match value {
        Lenient::Flag(b) => b,
        Lenient::Number(n) => n != 0.0 && n.is_finite(),
        Lenient::Text(s) => is_truthy(&s),
        Lenient::Nothing => false,
    })
}

/// Deserialize any value into an optional string. Only JSON strings
/// produce `Some`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientVisitor).map(|value| match value {
        Lenient::Text(s) => Some(s),
        _ => None,
    })
}

enum Lenient {
    Number(f64),
    Text(String),
    Flag(bool),
    Nothing,
}

struct LenientVisitor;

impl<'de> Visitor<'de> for LenientVisitor {
    type Value = Lenient;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Lenient::Flag(v))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Lenient::Number(v as f64))
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Lenient::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Lenient::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Lenient::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Lenient::Text(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Lenient::Nothing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Lenient::Nothing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Lenient::Nothing)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Lenient::Nothing)
    }
}
