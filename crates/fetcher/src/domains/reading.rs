use serde::{de::IgnoredAny, Deserialize, Deserializer};

/// A feed value as it appears on the wire: bare, null, or `[value, qualityFlag]`
#[derive(Deserialize)]
#[serde(untagged)]
enum Reading<T> {
    Flagged(Option<T>, IgnoredAny),
    Bare(Option<T>),
}

/// Deserialize a feed value, keeping only the leading value of a
/// `[value, qualityFlag]` pair. Pair with `#[serde(default)]` so absent
/// fields also come out as `None`.
pub fn leading_value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Reading::<T>::deserialize(deserializer)? {
        Reading::Flagged(value, _) | Reading::Bare(value) => value,
    })
}
