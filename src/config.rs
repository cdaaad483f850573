//! City catalog: which cities can be analyzed and where their trip files live.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::BikeshareError;

const DEFAULT_CITIES: &[(&str, &str)] = &[
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// Maps lower-cased city names to trip files.
///
/// An override can be stored as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "new york city": "new_york_city.csv"
/// }
/// ```
/// Relative file names resolve against the catalog's data directory.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    entries: BTreeMap<String, PathBuf>,
    data_dir: PathBuf,
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_CITIES
                .iter()
                .map(|(city, file)| (city.to_string(), PathBuf::from(file)))
                .collect(),
            data_dir: PathBuf::from("."),
        }
    }
}

impl CityCatalog {
    /// Loads the catalog from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading city catalog {}", path.display()))?;
        let raw: BTreeMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("parsing city catalog {}", path.display()))?;
        anyhow::ensure!(!raw.is_empty(), "city catalog {} is empty", path.display());

        let entries = raw
            .into_iter()
            .map(|(city, file)| (city.trim().to_lowercase(), file))
            .collect();

        Ok(Self {
            entries,
            data_dir: PathBuf::from("."),
        })
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Returns the canonical city name and its resolved trip file.
    pub fn resolve(&self, city: &str) -> Result<(&str, PathBuf), BikeshareError> {
        let key = city.trim().to_lowercase();
        self.entries
            .get_key_value(&key)
            .map(|(name, file)| (name.as_str(), self.data_dir.join(file)))
            .ok_or(BikeshareError::UnknownCity(key))
    }

    /// City names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
