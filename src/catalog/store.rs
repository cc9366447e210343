use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::line::CalibrationLine;
use crate::core::types::{LineId, Medium};
use crate::utils::validation::{is_valid_wavelength, MIN_LINES};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid line list '{list}': {reason}")]
    InvalidList { list: String, reason: String },

    #[error("Line list '{0}' not found in catalog")]
    UnknownList(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// One named list of rest-frame lines, e.g. the air or vacuum wavelengths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineList {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub medium: Medium,
    pub lines: Vec<CalibrationLine>,
}

impl LineList {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        medium: Medium,
        lines: Vec<CalibrationLine>,
    ) -> Self {
        let mut list = Self {
            id: id.into(),
            display_name: display_name.into(),
            medium,
            lines,
        };
        list.assign_line_ids();
        list
    }

    /// Number every line by its position. Ids are not serialized, so this
    /// runs after every load.
    fn assign_line_ids(&mut self) {
        for (i, line) in self.lines.iter_mut().enumerate() {
            line.id = LineId::new(i);
        }
    }

    /// Names occurring more than once, in order of first repeat
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for line in &self.lines {
            let count = counts.entry(line.name.as_str()).or_default();
            *count += 1;
            if *count == 2 {
                duplicates.push(line.name.as_str());
            }
        }
        duplicates
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidList {
            list: self.id.clone(),
            reason,
        };

        if self.lines.len() < MIN_LINES {
            return Err(invalid(format!(
                "{} line(s), at least {MIN_LINES} are required",
                self.lines.len()
            )));
        }

        if let Some(line) = self.lines.iter().find(|l| !is_valid_wavelength(l.wavelength)) {
            return Err(invalid(format!(
                "line '{}' has invalid wavelength {}",
                line.name, line.wavelength
            )));
        }

        Ok(())
    }
}

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub lists: Vec<LineList>,
}

/// The calibration line catalog with an id index
#[derive(Debug)]
pub struct LineCatalog {
    /// All line lists
    pub lists: Vec<LineList>,

    /// Index: list ID -> index in lists vec
    id_to_index: HashMap<String, usize>,
}

impl LineCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            lists: Vec::new(),
            id_to_index: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/emission_lines.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION, data.version
            );
        }

        let mut catalog = Self::new();
        for mut list in data.lists {
            list.assign_line_ids();
            list.validate()?;
            catalog.add_list(list);
        }

        Ok(catalog)
    }

    /// Add a line list to the catalog. A list with an existing id replaces it.
    pub fn add_list(&mut self, list: LineList) {
        if let Some(&index) = self.id_to_index.get(&list.id) {
            warn!("Replacing line list '{}'", list.id);
            self.lists[index] = list;
            return;
        }

        self.id_to_index.insert(list.id.clone(), self.lists.len());
        self.lists.push(list);
    }

    /// Get a line list by ID
    pub fn get(&self, id: &str) -> Option<&LineList> {
        self.id_to_index.get(id).map(|&idx| &self.lists[idx])
    }

    /// Get a line list by ID, or fail naming the missing list
    pub fn require(&self, id: &str) -> Result<&LineList, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownList(id.to_string()))
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            lists: self.lists.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of line lists in catalog
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl Default for LineCatalog {
    fn default() -> Self {
        Self::new()
    }
}
