// ============================================================
// REFERENCE SNAPSHOT
// ============================================================
// The per-run cache of catalog reference data. Built once at the
// start of an import, then shared read-only (typically behind an
// `Arc`) by every consumer of the run.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::record::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    /// Random identifier of the build, stamped for log correlation.
    pub serial: String,
    pub built_at: DateTime<Utc>,

    pub stores: Vec<Record>,
    pub default_store: Option<Record>,
    pub store_websites: Vec<Record>,
    pub tax_classes: Vec<Record>,
    pub link_types: Vec<Record>,
    pub link_attributes: Vec<Record>,
    pub root_categories: Vec<Record>,
    pub config_entries: Vec<Record>,

    /// Entity types keyed by their code.
    pub entity_types: HashMap<String, Record>,
    /// Attribute sets per entity type code, in gateway order.
    pub attribute_sets: HashMap<String, Vec<Record>>,
    /// Attributes per entity type code, then per attribute set name.
    pub attributes: HashMap<String, HashMap<String, Vec<Record>>>,
    /// User defined attributes per entity type code.
    pub user_defined_attributes: HashMap<String, Vec<Record>>,

    /// Categories keyed by their resolved name path.
    pub categories: HashMap<String, Record>,
}

impl ReferenceSnapshot {
    pub fn entity_type_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.entity_types.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn attribute_sets_of(&self, entity_type_code: &str) -> Option<&[Record]> {
        self.attribute_sets
            .get(entity_type_code)
            .map(Vec::as_slice)
    }

    pub fn attributes_of(
        &self,
        entity_type_code: &str,
        attribute_set_name: &str,
    ) -> Option<&[Record]> {
        self.attributes
            .get(entity_type_code)
            .and_then(|sets| sets.get(attribute_set_name))
            .map(Vec::as_slice)
    }

    pub fn user_defined_attributes_of(&self, entity_type_code: &str) -> Option<&[Record]> {
        self.user_defined_attributes
            .get(entity_type_code)
            .map(Vec::as_slice)
    }

    pub fn category_by_path(&self, resolved_path: &str) -> Option<&Record> {
        self.categories.get(resolved_path)
    }
}
