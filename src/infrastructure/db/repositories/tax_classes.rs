use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct TaxClassRepository {
    pool: SqlitePool,
}

impl TaxClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::TAX_CLASSES)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ImportError::DataAccess(format!("Failed to fetch tax classes: {e}")))?;

        rows.iter().map(record_from_row).collect()
    }
}
