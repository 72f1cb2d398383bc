use crate::core::QueryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One place a table's records live: a JSON file plus an optional path
/// expression selecting the array of objects inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Persistent table-name → source-location mappings.
///
/// A table mapped to several locations is treated as partitioned: its record
/// sequences concatenate in mapping order before the engine sees them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingStore {
    #[serde(default)]
    tables: BTreeMap<String, Vec<SourceLocation>>,
}

impl MappingStore {
    /// Default on-disk location, `~/.jsonsql/mappings.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jsonsql")
            .join("mappings.json")
    }

    /// Loads the store, returning an empty one if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, QueryError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), QueryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn add(&mut self, table: &str, file: PathBuf, path: Option<String>) {
        let location = SourceLocation { file, path };
        let locations = self.tables.entry(table.to_string()).or_default();
        if !locations.contains(&location) {
            locations.push(location);
        }
    }

    /// Drops every location mapped for `table`; returns whether any existed.
    pub fn remove(&mut self, table: &str) -> bool {
        self.tables.remove(table).is_some()
    }

    #[must_use]
    pub fn locations(&self, table: &str) -> Option<&[SourceLocation]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SourceLocation])> {
        self.tables.iter().map(|(name, locations)| (name.as_str(), locations.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
