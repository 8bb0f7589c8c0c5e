//! Block taxonomy helpers: scanning GRC block definitions and grouping block ids into
//! categories.

use crate::error::CatalogError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default location of the block definitions installed with GNU Radio.
pub const DEFAULT_BLOCKS_DIR: &str = "/usr/share/gnuradio/grc/blocks";

/// The two keys of a `.block.yml` definition the catalog cares about.
#[derive(Debug, Deserialize)]
struct BlockDefinitionHeader {
    id: Option<String>,
    category: Option<String>,
}

/// Unique block ids and categories found in a directory of block definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCatalog {
    pub ids: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl BlockCatalog {
    /// Reads every `*.yml` file directly inside `dir`. Files that cannot be read or
    /// parsed are logged and skipped.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut catalog = Self::default();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "yml") {
                continue;
            }

            let header = fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_yaml::from_str::<BlockDefinitionHeader>(&content).map_err(|e| e.to_string())
                });
            match header {
                Ok(header) => catalog.add(header.id, header.category),
                Err(error) => warn!(file = %path.display(), %error, "Skipping block definition"),
            }
        }
        Ok(catalog)
    }

    fn add(&mut self, id: Option<String>, category: Option<String>) {
        if let Some(id) = id.filter(|s| !s.is_empty()) {
            self.ids.insert(id);
        }
        if let Some(category) = category.filter(|s| !s.is_empty()) {
            self.categories.insert(category);
        }
    }
}

/// Explicit mapping of category name -> block ids, with a fallback category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRules {
    pub default_category: String,
    #[serde(default)]
    pub categories: IndexMap<String, Vec<String>>,
}

impl CategoryRules {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// A starter table covering common in-tree blocks.
    pub fn builtin() -> Self {
        let table: [(&str, &[&str]); 4] = [
            ("Audio", &["audio_source", "audio_sink"]),
            ("Boolean Operators", &["and_bb", "or_bb", "xor_bb", "not_bb"]),
            ("Byte Operators", &["pack_k_bits_bb", "unpack_k_bits_bb"]),
            ("Filters", &["fir_filter_ccf", "iir_filter_ffd", "band_pass_filter"]),
        ];
        Self {
            default_category: "Miscellaneous".to_string(),
            categories: table
                .iter()
                .map(|(name, ids)| (name.to_string(), ids.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }

    /// The first category listing `block_id`, else the default category.
    pub fn category_of(&self, block_id: &str) -> &str {
        self.categories
            .iter()
            .find(|(_, ids)| ids.iter().any(|id| id == block_id))
            .map(|(name, _)| name.as_str())
            .unwrap_or(&self.default_category)
    }

    /// Groups ids by category. Categories appear in first-use order, ids sorted.
    pub fn categorize<'a>(&self, block_ids: impl IntoIterator<Item = &'a str>) -> IndexMap<String, Vec<String>> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for id in block_ids {
            grouped
                .entry(self.category_of(id).to_string())
                .or_default()
                .push(id.to_string());
        }
        for ids in grouped.values_mut() {
            ids.sort();
            ids.dedup();
        }
        grouped
    }
}
