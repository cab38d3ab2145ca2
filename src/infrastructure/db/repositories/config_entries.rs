use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct CoreConfigDataRepository {
    pool: SqlitePool,
}

impl CoreConfigDataRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::CORE_CONFIG_DATA)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!("Failed to fetch core config entries: {e}"))
            })?;

        rows.iter().map(record_from_row).collect()
    }
}
