use crate::domain::error::{ImportError, Result};
use crate::domain::record::Record;
use sqlx::sqlite::SqlitePool;

use crate::infrastructure::db::row::record_from_row;
use crate::infrastructure::db::statements::{keys, load_statement};

pub struct EavAttributeRepository {
    pool: SqlitePool,
}

impl EavAttributeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all_by_entity_type_id_and_attribute_set_name(
        &self,
        entity_type_id: i64,
        attribute_set_name: &str,
    ) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(
            keys::EAV_ATTRIBUTES_BY_ENTITY_TYPE_ID_AND_ATTRIBUTE_SET_NAME,
        )?)
        .bind(entity_type_id)
        .bind(attribute_set_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ImportError::DataAccess(format!(
                "Failed to fetch attributes of set '{attribute_set_name}' \
                 for entity type {entity_type_id}: {e}"
            ))
        })?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_all_by_option_value_and_store_id(
        &self,
        option_value: &str,
        store_id: i64,
    ) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::EAV_ATTRIBUTES_BY_OPTION_VALUE_AND_STORE_ID)?)
            .bind(option_value)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!(
                    "Failed to fetch attributes with option value '{option_value}' \
                     for store {store_id}: {e}"
                ))
            })?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_one_by_option_value_and_store_id(
        &self,
        option_value: &str,
        store_id: i64,
    ) -> Result<Option<Record>> {
        let row = sqlx::query(load_statement(keys::EAV_ATTRIBUTES_BY_OPTION_VALUE_AND_STORE_ID)?)
            .bind(option_value)
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!(
                    "Failed to fetch attribute with option value '{option_value}' \
                     for store {store_id}: {e}"
                ))
            })?;

        row.as_ref().map(record_from_row).transpose()
    }

    pub async fn find_all_by_is_user_defined(&self, is_user_defined: i64) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(keys::EAV_ATTRIBUTES_BY_IS_USER_DEFINED)?)
            .bind(is_user_defined)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                ImportError::DataAccess(format!(
                    "Failed to fetch attributes with is_user_defined = {is_user_defined}: {e}"
                ))
            })?;

        rows.iter().map(record_from_row).collect()
    }

    pub async fn find_all_by_entity_type_id_and_is_user_defined(
        &self,
        entity_type_id: i64,
        is_user_defined: i64,
    ) -> Result<Vec<Record>> {
        let rows = sqlx::query(load_statement(
            keys::EAV_ATTRIBUTES_BY_ENTITY_TYPE_ID_AND_IS_USER_DEFINED,
        )?)
        .bind(entity_type_id)
        .bind(is_user_defined)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ImportError::DataAccess(format!(
                "Failed to fetch user defined attributes for entity type {entity_type_id}: {e}"
            ))
        })?;

        rows.iter().map(record_from_row).collect()
    }
}
