// ============================================================
// CATEGORY ASSEMBLER
// ============================================================
// Resolves the id path of every category (`1/2/13`) into its name
// path (`Root Catalog/Gear/Bags`) and keys the categories by it,
// the form import files reference categories in.

use std::collections::HashMap;

use sqlx::sqlite::SqlitePool;

use crate::domain::error::{ImportError, Result};
use crate::domain::members;
use crate::domain::record::Record;
use crate::infrastructure::db::repositories::{CategoryRepository, CategoryVarcharRepository};

const NAME_ATTRIBUTE_CODE: &str = "name";
const ADMIN_STORE_ID: i64 = 0;

pub struct CategoryAssembler {
    categories: CategoryRepository,
    varchar_values: CategoryVarcharRepository,
}

impl CategoryAssembler {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            categories: CategoryRepository::new(pool.clone()),
            varchar_values: CategoryVarcharRepository::new(pool),
        }
    }

    /// Loads all categories keyed by their resolved name path.
    pub async fn find_all_with_resolved_path(&self) -> Result<HashMap<String, Record>> {
        let categories = self.categories.find_all().await?;
        if categories.is_empty() {
            return Ok(HashMap::new());
        }

        let mut entity_ids = Vec::with_capacity(categories.len());
        let mut by_id: HashMap<i64, &Record> = HashMap::with_capacity(categories.len());
        for category in &categories {
            let entity_id = category.int_field(members::ENTITY_ID)?;
            entity_ids.push(entity_id);
            by_id.insert(entity_id, category);
        }

        let names = self.load_names(&entity_ids).await?;

        let mut resolved = HashMap::with_capacity(categories.len());
        for category in &categories {
            let path = category.str_field(members::PATH)?;
            let name_path = resolve_name_path(path, &by_id, &names)?;
            resolved.insert(name_path, category.clone());
        }

        Ok(resolved)
    }

    async fn load_names(&self, entity_ids: &[i64]) -> Result<HashMap<i64, String>> {
        let rows = self.varchar_values.find_all_by_entity_ids(entity_ids).await?;

        let mut names = HashMap::new();
        for row in &rows {
            if row.opt_str(members::ATTRIBUTE_CODE) != Some(NAME_ATTRIBUTE_CODE) {
                continue;
            }
            let value = match row.opt_str(members::VALUE) {
                Some(value) => value.to_string(),
                None => continue,
            };
            let entity_id = row.int_field(members::ENTITY_ID)?;

            // The admin scope name wins, store scoped names only fill gaps.
            if row.int_field(members::STORE_ID)? == ADMIN_STORE_ID {
                names.insert(entity_id, value);
            } else {
                names.entry(entity_id).or_insert(value);
            }
        }

        Ok(names)
    }
}

fn resolve_name_path(
    path: &str,
    by_id: &HashMap<i64, &Record>,
    names: &HashMap<i64, String>,
) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();

    for raw_id in path.split('/').filter(|segment| !segment.is_empty()) {
        let entity_id: i64 = raw_id.parse().map_err(|_| {
            ImportError::DataIntegrity(format!(
                "Category path segment '{raw_id}' in '{path}' is not an id"
            ))
        })?;

        if !by_id.contains_key(&entity_id) {
            return Err(ImportError::DataIntegrity(format!(
                "Category path '{path}' references unknown category {entity_id}"
            )));
        }

        if let Some(name) = names.get(&entity_id) {
            segments.push(name.as_str());
        }
    }

    Ok(segments.join("/"))
}
