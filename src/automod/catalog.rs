//! The keyword to message template map read from disk.

use std::collections::HashMap;
use std::path::Path;

use delegate::delegate;
use serde_json::Map;
use serde_json::Value;
use tracing::error;
use tracing::warn;

use crate::error::CatalogError;

/// Maps automod keywords to the message templates sent when they trigger.
///
/// Loaded fresh for every automod event, so edits to the file apply without a restart.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    // In file order, later keywords override earlier ones after normalization.
    entries: Vec<(String, String)>,
}

impl MessageCatalog {
    /// Read the catalog at `path`.
    /// Any failure is logged and treated as an empty catalog.
    pub async fn load(path: &Path) -> Self {
        match Self::read(path).await {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to load automod messages from {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Read and parse the catalog, describing where the mistake is on failure.
    /// Keywords whose template isn't a string are skipped with a warning.
    async fn read(path: &Path) -> Result<Self, CatalogError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let mut json = serde_json::Deserializer::from_str(&raw);
        let object: Map<String, Value> = serde_path_to_error::deserialize(&mut json)?;
        json.end().map_err(CatalogError::TrailingData)?;

        let entries = object
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(template) => Some((key, template)),
                other => {
                    warn!("Automod keyword '{key}' has a non-string message ({other}), skipping it.");
                    None
                }
            })
            .collect();

        Ok(Self { entries })
    }

    /// Build the lookup table keyed by [normalize]d keywords.
    ///
    /// If two keys normalize to the same keyword, the last one in the file wins.
    pub fn into_lookup(self) -> HashMap<String, String> {
        let mut lookup = HashMap::with_capacity(self.entries.len());
        for (key, template) in self.entries {
            let keyword = normalize(&key);
            if lookup.insert(keyword, template).is_some() {
                warn!("Automod keyword '{key}' overrides an earlier one.");
            }
        }
        lookup
    }

    delegate! {
        to self.entries {
            /// Number of keywords, before normalization.
            pub fn len(&self) -> usize;
            /// Whether there are no keywords at all.
            pub fn is_empty(&self) -> bool;
        }
    }
}

impl<K, V> FromIterator<(K, V)> for MessageCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }
}

/// Canonical form of a keyword: trimmed and lowercased.
pub fn normalize(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}
