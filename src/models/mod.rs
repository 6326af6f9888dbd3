pub mod category;
pub mod note;

use serde::{Deserialize, Deserializer};

/// Keeps an explicit `null` apart from an omitted field in update payloads:
/// omitted is `None`, `null` is `Some(None)`, a value is `Some(Some(v))`.
/// Pair with `#[serde(default)]` so omission still deserializes.
pub(crate) fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
