//! Macro for implementing string conversions on form-facing enums
//!
//! Every enumerated calculator field arrives as free text from a form or a
//! JSON document. Unrecognized text never fails the calculation; it falls
//! back to the enum's `Default` baseline. This macro generates the
//! conversions once so each enum only lists its string table.
//!
//! # Example
//!
//! ```rust
//! use carbonwise_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
//! pub enum Packaging {
//!     Recycled,
//!     #[default]
//!     Conventional,
//! }
//!
//! impl_domain_enum_conversions!(Packaging {
//!     Recycled => "recycled",
//!     Conventional => "conventional" | "standard",
//! });
//!
//! assert_eq!(Packaging::from_str_or_default("RECYCLED"), Packaging::Recycled);
//! assert_eq!(Packaging::from_str_or_default("standard"), Packaging::Conventional);
//! assert_eq!(Packaging::from_str_or_default("cardboard?"), Packaging::Conventional);
//! ```

/// Implements `Display`, `FromStr`, lenient parsing and serde for an enum.
///
/// Generates:
/// - `Display`: the canonical (first) string of each variant
/// - `FromStr`: trimmed, case-insensitive match against the canonical
///   string and any `|`-separated aliases
/// - `from_str_or_default`: like `FromStr` but returns `Default` on miss
/// - `from_selection`: `None` for a blank string, else `from_str_or_default`
/// - `Serialize` as the canonical string, and a `Deserialize` that accepts
///   any JSON value and never fails (non-strings and unknown strings map to
///   `Default`)
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }

        impl $enum_name {
            /// Parse case-insensitively, falling back to the baseline value.
            pub fn from_str_or_default(s: &str) -> Self {
                s.parse().unwrap_or_default()
            }

            /// A selection control's value: blank means nothing was chosen,
            /// anything else parses with the baseline fallback.
            pub fn from_selection(s: &str) -> Option<Self> {
                (!s.trim().is_empty()).then(|| Self::from_str_or_default(s))
            }

            /// Canonical string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let raw = $crate::utils::lenient::lenient_string(deserializer)?;
                Ok(raw.map(|s| Self::from_str_or_default(&s)).unwrap_or_default())
            }
        }
    };
}
