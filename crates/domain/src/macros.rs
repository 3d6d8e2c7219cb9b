//! Macros for status enums and typed entity identifiers
//!
//! `impl_domain_status_conversions!` removes the Display/FromStr boilerplate
//! for status enums. Parsing is case-insensitive and accepts optional aliases,
//! so values written by older clients still parse.
//!
//! # Example
//!
//! ```rust
//! use flyball_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Weather {
//!     Dry,
//!     Wet,
//! }
//!
//! impl_domain_status_conversions!(Weather {
//!     Dry => "Dry",
//!     Wet => "Wet" | "Rain",
//! });
//!
//! assert_eq!("rain".parse::<Weather>().unwrap(), Weather::Wet);
//! assert_eq!(Weather::Dry.to_string(), "Dry");
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: writes the canonical string of each variant
/// - FromStr trait: case-insensitive match against the canonical string and
///   any listed aliases, failing with `PlannerError::Validation`
/// - TryFrom<String>: delegates to FromStr, for `#[serde(try_from = "String")]`
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::PlannerError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($str) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::PlannerError::Validation(format!(
                    "Invalid {}: {}",
                    stringify!($enum_name),
                    s
                )))
            }
        }

        impl TryFrom<String> for $enum_name {
            type Error = $crate::PlannerError;

            fn try_from(value: String) -> ::std::result::Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

/// Declares a UUID-backed identifier newtype.
///
/// Parsing a malformed string yields `PlannerError::Validation` naming the
/// entity, so callers never see a raw uuid parse error.
#[macro_export]
macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a fresh time-ordered identifier.
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// Borrow the inner UUID.
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::PlannerError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s.trim()).map(Self).map_err(|_| {
                    $crate::PlannerError::Validation(format!("invalid {} id: {s}", $label))
                })
            }
        }
    };
}
