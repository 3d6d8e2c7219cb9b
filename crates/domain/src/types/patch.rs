//! Serde support for partial-update payloads

use serde::de::{self, Deserialize, Deserializer};

/// A patch field that may be omitted but never sent as `null`.
///
/// Used with a `default` container: an absent key stays `None`, while a
/// present `null` fails to deserialize.
pub(crate) fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(<D::Error as de::Error>::custom("patch fields may be omitted but not null")),
    }
}
