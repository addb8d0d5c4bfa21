//! Lenient deserializers for CMS payloads
//!
//! Editors leave fields empty, switch a field between key-text and rich-text,
//! or publish half-filled slices. These helpers keep one bad field from
//! rejecting the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::richtext::{as_text, RichTextNode};

/// Deserialize a sequence, dropping elements that do not decode.
/// Anything other than an array yields an empty vector.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Treat `null` as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A text field that may be key-text (a string) or rich-text (a node array).
/// Blank values come back as `None`.
pub(crate) fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::String(s)) => s,
        Some(Value::Array(items)) => {
            let nodes: Vec<RichTextNode> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            as_text(&nodes)
        }
        _ => return Ok(None),
    };

    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}
