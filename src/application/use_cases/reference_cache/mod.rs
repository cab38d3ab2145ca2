// ============================================================
// REFERENCE CACHE BUILDER
// ============================================================
// Builds the reference snapshot an import run works against: one
// round of reads over the reference gateway, assembled into an
// immutable value the whole run shares.


use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::error::{ImportError, Result};
use crate::domain::members;
use crate::domain::record::Record;
use crate::domain::snapshot::ReferenceSnapshot;
use crate::infrastructure::db::gateway::ReferenceGateway;

pub const DEFAULT_USER_DEFINED_FLAG: i64 = 1;

/// Use case assembling a [`ReferenceSnapshot`] from the gateway.
///
/// The flat reference lists are fetched concurrently, then the
/// attribute partitions of every entity type are fetched in one
/// task per entity type. The first error cancels everything that
/// is still in flight and fails the build.
pub struct ReferenceCacheBuilder {
    gateway: Arc<dyn ReferenceGateway>,
    user_defined_flag: i64,
}

struct EntityTypePartitions {
    entity_type_code: String,
    attribute_sets: Vec<Record>,
    attributes: HashMap<String, Vec<Record>>,
    user_defined: Vec<Record>,
}

impl ReferenceCacheBuilder {
    pub fn new(gateway: Arc<dyn ReferenceGateway>) -> Self {
        Self {
            gateway,
            user_defined_flag: DEFAULT_USER_DEFINED_FLAG,
        }
    }

    /// Override the flag value that selects user defined attributes
    pub fn with_user_defined_flag(mut self, user_defined_flag: i64) -> Self {
        self.user_defined_flag = user_defined_flag;
        self
    }

    pub async fn build(&self) -> Result<ReferenceSnapshot> {
        debug!("Fetching reference data for a new import run");

        let (
            stores,
            default_store,
            store_websites,
            tax_classes,
            link_types,
            link_attributes,
            root_categories,
            config_entries,
            categories,
            entity_type_rows,
        ) = tokio::try_join!(
            self.gateway.stores(),
            self.gateway.default_store(),
            self.gateway.store_websites(),
            self.gateway.tax_classes(),
            self.gateway.link_types(),
            self.gateway.link_attributes(),
            self.gateway.root_categories(),
            self.gateway.config_entries(),
            self.gateway.resolved_category_paths(),
            self.gateway.entity_types(),
        )?;

        let mut entity_types: HashMap<String, Record> =
            HashMap::with_capacity(entity_type_rows.len());
        for row in entity_type_rows {
            let entity_type_code = row.str_field(members::ENTITY_TYPE_CODE)?.to_string();
            if entity_types.insert(entity_type_code.clone(), row).is_some() {
                return Err(ImportError::DataIntegrity(format!(
                    "Duplicate entity type code '{entity_type_code}'"
                )));
            }
        }

        let mut fetches: JoinSet<Result<EntityTypePartitions>> = JoinSet::new();
        for (entity_type_code, entity_type) in &entity_types {
            let entity_type_id = entity_type.int_field(members::ENTITY_TYPE_ID)?;
            let gateway = Arc::clone(&self.gateway);
            let entity_type_code = entity_type_code.clone();
            let user_defined_flag = self.user_defined_flag;
            fetches.spawn(async move {
                fetch_entity_type_partitions(
                    gateway,
                    entity_type_code,
                    entity_type_id,
                    user_defined_flag,
                )
                .await
            });
        }

        let mut attribute_sets = HashMap::with_capacity(entity_types.len());
        let mut attributes = HashMap::with_capacity(entity_types.len());
        let mut user_defined_attributes = HashMap::with_capacity(entity_types.len());

        // The first error wins. Dropping the set on `?` aborts the
        // fetches still in flight.
        while let Some(joined) = fetches.join_next().await {
            let partitions = joined
                .map_err(|e| ImportError::DataAccess(format!("Reference fetch task failed: {e}")))??;

            attribute_sets.insert(
                partitions.entity_type_code.clone(),
                partitions.attribute_sets,
            );
            attributes.insert(partitions.entity_type_code.clone(), partitions.attributes);
            user_defined_attributes.insert(partitions.entity_type_code, partitions.user_defined);
        }

        let snapshot = ReferenceSnapshot {
            serial: Uuid::new_v4().to_string(),
            built_at: Utc::now(),
            stores,
            default_store,
            store_websites,
            tax_classes,
            link_types,
            link_attributes,
            root_categories,
            config_entries,
            entity_types,
            attribute_sets,
            attributes,
            user_defined_attributes,
            categories,
        };

        info!(
            "Assembled reference snapshot {} with {} entity types, {} stores and {} categories",
            snapshot.serial,
            snapshot.entity_types.len(),
            snapshot.stores.len(),
            snapshot.categories.len()
        );

        Ok(snapshot)
    }
}

async fn fetch_entity_type_partitions(
    gateway: Arc<dyn ReferenceGateway>,
    entity_type_code: String,
    entity_type_id: i64,
    user_defined_flag: i64,
) -> Result<EntityTypePartitions> {
    debug!("Fetching attribute partitions for entity type '{entity_type_code}'");

    let attribute_sets = gateway.attribute_sets_by_entity_type(entity_type_id).await?;

    let mut set_names = Vec::with_capacity(attribute_sets.len());
    for attribute_set in &attribute_sets {
        set_names.push(
            attribute_set
                .str_field(members::ATTRIBUTE_SET_NAME)?
                .to_string(),
        );
    }

    let mut attributes = HashMap::with_capacity(set_names.len());
    for attribute_set_name in &set_names {
        let rows = gateway
            .attributes_by_entity_type_and_set(entity_type_id, attribute_set_name)
            .await?;
        for row in &rows {
            verify_attribute_scope(row, entity_type_id, &set_names, &entity_type_code)?;
        }
        attributes.insert(attribute_set_name.clone(), rows);
    }

    let user_defined = gateway
        .attributes_by_user_defined(Some(entity_type_id), user_defined_flag)
        .await?;
    for row in &user_defined {
        verify_attribute_scope(row, entity_type_id, &set_names, &entity_type_code)?;
    }

    Ok(EntityTypePartitions {
        entity_type_code,
        attribute_sets,
        attributes,
        user_defined,
    })
}

/// Rejects attribute rows pointing at another entity type or at an
/// attribute set the entity type does not have. Both members are
/// optional on the row, only present ones are checked.
fn verify_attribute_scope(
    attribute: &Record,
    entity_type_id: i64,
    set_names: &[String],
    entity_type_code: &str,
) -> Result<()> {
    if attribute.has(members::ENTITY_TYPE_ID)
        && attribute.int_field(members::ENTITY_TYPE_ID)? != entity_type_id
    {
        return Err(ImportError::DataIntegrity(format!(
            "Attribute '{}' does not belong to entity type '{}'",
            attribute.opt_str(members::ATTRIBUTE_CODE).unwrap_or("?"),
            entity_type_code
        )));
    }

    if attribute.has(members::ATTRIBUTE_SET_NAME) {
        let attribute_set_name = attribute.str_field(members::ATTRIBUTE_SET_NAME)?;
        if !set_names.iter().any(|known| known.as_str() == attribute_set_name) {
            return Err(ImportError::DataIntegrity(format!(
                "Attribute '{}' references unknown attribute set '{}' of entity type '{}'",
                attribute.opt_str(members::ATTRIBUTE_CODE).unwrap_or("?"),
                attribute_set_name,
                entity_type_code
            )));
        }
    }

    Ok(())
}
