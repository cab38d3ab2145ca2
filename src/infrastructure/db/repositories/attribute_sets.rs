use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct EavAttributeSetRepository {
    pool: SqlitePool,
}

impl EavAttributeSetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_entity_type_id(&self, entity_type_id: i64) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::EAV_ATTRIBUTE_SETS_BY_ENTITY_TYPE_ID)?)
            .bind(entity_type_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!(
                    "Failed to fetch attribute sets for entity type {entity_type_id}: {e}"
                ))
            })?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_one_by_id(&self, attribute_set_id: i64) -> Result<Option<Record>> {
        let row = sqlx::query(load_statement(keys::EAV_ATTRIBUTE_SET_BY_ID)?)
            .bind(attribute_set_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!(
                    "Failed to fetch attribute set {attribute_set_id}: {e}"
                ))
            })?;

        row.as_ref().map(record_from_row).transpose()
    }
}
