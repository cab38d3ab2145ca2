use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::STORES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ImportError::DataAccess(format!("Failed to fetch stores: {e}")))?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_one_by_default(&self) -> Result<Option<Record>> {
        let row = sqlx::query(load_statement(keys::STORE_DEFAULT)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ImportError::DataAccess(format!("Failed to fetch default store: {e}")))?;

        row.as_ref().map(record_from_row).transpose()
    }
}

pub struct StoreWebsiteRepository {
    pool: SqlitePool,
}

impl StoreWebsiteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::STORE_WEBSITES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ImportError::DataAccess(format!("Failed to fetch store websites: {e}")))?;

        rows.iter().map(record_from_row).collect()
    }
}
