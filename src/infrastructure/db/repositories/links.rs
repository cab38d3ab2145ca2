use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct LinkTypeRepository {
    pool: SqlitePool,
}

impl LinkTypeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::LINK_TYPES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!("Failed to fetch product link types: {e}"))
            })?;

        rows.iter().map(record_from_row).collect()
    }
}

pub struct LinkAttributeRepository {
    pool: SqlitePool,
}

impl LinkAttributeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::LINK_ATTRIBUTES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!("Failed to fetch product link attributes: {e}"))
            })?;

        rows.iter().map(record_from_row).collect()
    }
}
