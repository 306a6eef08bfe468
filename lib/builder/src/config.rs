//! Build configuration
//!
//! Declares which columns identify an item and its kind, which attributes are
//! bucketed (and by how much), and the edge weight used for each attribute.

use crate::error::{BuildError, Result};
use diettree_core::{KindRole, KindSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Configuration for turning records into a graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildConfig {
    /// Column holding the item identifier
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Column holding the item kind (compared lowercased)
    #[serde(default = "default_kind_column")]
    pub kind_column: String,

    /// Recommendable item kinds, case-insensitive; records of any other
    /// kind are skipped
    #[serde(default = "default_item_kinds")]
    pub item_kinds: Vec<String>,

    /// Bucket increment per attribute column
    pub increments: BTreeMap<String, f64>,

    /// Edge weight per attribute; attributes not listed use 1
    #[serde(default)]
    pub edge_weights: HashMap<String, f64>,
}

fn default_id_column() -> String {
    "Item".to_string()
}

fn default_kind_column() -> String {
    "Category".to_string()
}

fn default_item_kinds() -> Vec<String> {
    vec!["food".to_string(), "dessert".to_string(), "drink".to_string()]
}

impl Default for BuildConfig {
    /// Menu nutrition defaults
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            kind_column: default_kind_column(),
            item_kinds: default_item_kinds(),
            increments: BTreeMap::from([
                ("Calories".to_string(), 100.0),
                ("Protein (g)".to_string(), 10.0),
                ("Carbs (g)".to_string(), 10.0),
                ("Sugars (g)".to_string(), 5.0),
                ("Total Fat (g)".to_string(), 5.0),
            ]),
            edge_weights: HashMap::new(),
        }
    }
}

impl BuildConfig {
    pub fn new(increments: BTreeMap<String, f64>) -> Self {
        Self {
            increments,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BuildConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_edge_weight(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        self.edge_weights.insert(attribute.into(), weight);
        self
    }

    /// Validate the configuration
    /// - At least one item kind and one bucketed attribute
    /// - Increments and edge weights are positive
    /// - Edge weights only name bucketed attributes
    /// - Item kinds and attribute names do not overlap
    pub fn validate(&self) -> Result<()> {
        if self.item_kinds.is_empty() {
            return Err(BuildError::Config("no item kinds declared".to_string()));
        }
        if self.increments.is_empty() {
            return Err(BuildError::Config("no attributes to bucket".to_string()));
        }
        for (attribute, increment) in &self.increments {
            if !(increment.is_finite() && *increment > 0.0) {
                return Err(BuildError::Config(format!(
                    "increment for '{attribute}' must be positive, got {increment}"
                )));
            }
        }
        for (attribute, weight) in &self.edge_weights {
            if !self.increments.contains_key(attribute) {
                return Err(BuildError::Config(format!(
                    "edge weight given for unknown attribute '{attribute}'"
                )));
            }
            if !(weight.is_finite() && *weight > 0.0) {
                return Err(BuildError::Config(format!(
                    "edge weight for '{attribute}' must be positive, got {weight}"
                )));
            }
        }
        if let Some(kind) = self
            .item_kinds
            .iter()
            .find(|k| self.increments.contains_key(k.to_lowercase().as_str()))
        {
            return Err(BuildError::Config(format!(
                "'{kind}' is declared both as an item kind and an attribute"
            )));
        }
        Ok(())
    }

    pub fn edge_weight(&self, attribute: &str) -> f64 {
        self.edge_weights.get(attribute).copied().unwrap_or(1.0)
    }

    /// Whether `kind` (already lowercased) is a declared item kind
    pub fn is_item_kind(&self, kind: &str) -> bool {
        self.item_kinds.iter().any(|k| k.to_lowercase() == kind)
    }

    /// The closed kind set for graphs built with this configuration.
    /// Fails if an item kind and an attribute share a name.
    pub fn kinds(&self) -> Result<KindSet> {
        let mut kinds = KindSet::new();
        for kind in &self.item_kinds {
            kinds.declare(kind.to_lowercase(), KindRole::Item)?;
        }
        for attribute in self.increments.keys() {
            kinds.declare(attribute.as_str(), KindRole::Category)?;
        }
        Ok(kinds)
    }
}
