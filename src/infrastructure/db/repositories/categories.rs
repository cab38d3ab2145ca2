use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement, ENTITY_IDS_TOKEN};

pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::CATEGORIES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ImportError::DataAccess(format!("Failed to fetch categories: {e}")))?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_all_roots(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::ROOT_CATEGORIES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!("Failed to fetch root categories: {e}"))
            })?;

        rows.iter().map(record_from_row).collect()
    }
}

pub struct CategoryVarcharRepository {
    pool: SqlitePool,
}

impl CategoryVarcharRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_entity_ids(&self, entity_ids: &[i64]) -> Result<Vec<Record>> {
        if entity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; entity_ids.len()].join(", ");
        let statement =
            load_statement(keys::CATEGORY_VARCHAR_VALUES)?.replace(ENTITY_IDS_TOKEN, &placeholders);

        let mut query = sqlx::query(&statement);
        for entity_id in entity_ids.iter().copied() {
            query = query.bind(entity_id);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            ImportError::DataAccess(format!("Failed to fetch category text values: {e}"))
        })?;

        rows.iter().map(record_from_row).collect()
    }
}
