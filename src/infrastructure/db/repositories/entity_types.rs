use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct EavEntityTypeRepository {
    pool: SqlitePool,
}

impl EavEntityTypeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::EAV_ENTITY_TYPES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ImportError::DataAccess(format!("Failed to fetch entity types: {e}")))?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_one_by_code(&self, entity_type_code: &str) -> Result<Option<Record>> {
        let row = sqlx::query(load_statement(keys::EAV_ENTITY_TYPE_BY_CODE)?)
            .bind(entity_type_code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!(
                    "Failed to fetch entity type '{entity_type_code}': {e}"
                ))
            })?;

        row.as_ref().map(record_from_row).transpose()
    }
}
