// ============================================================
// REFERENCE GATEWAY
// ============================================================
// Read side of the catalog database. The trait is the seam the
// cache builder and the import pipeline depend on, the SQL
// implementation wires the per-table repositories together.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::domain::error::Result;
use crate::domain::record::Record;
use crate::infrastructure::db::category_assembler::CategoryAssembler;
use crate::infrastructure::db::repositories::{
    CategoryRepository, CategoryVarcharRepository, CoreConfigDataRepository, EavAttributeRepository,
    EavAttributeSetRepository, EavEntityTypeRepository, LinkAttributeRepository,
    LinkTypeRepository, StoreRepository, StoreWebsiteRepository, TaxClassRepository,
};

/// Read access to the reference data of the catalog.
#[async_trait]
pub trait ReferenceGateway: Send + Sync {
    async fn entity_types(&self) -> Result<Vec<Record>>;

    async fn entity_type_by_code(&self, entity_type_code: &str) -> Result<Option<Record>>;

    async fn attribute_sets_by_entity_type(&self, entity_type_id: i64) -> Result<Vec<Record>>;

    async fn attribute_set_by_id(&self, attribute_set_id: i64) -> Result<Option<Record>>;

    async fn attributes_by_entity_type_and_set(
        &self,
        entity_type_id: i64,
        attribute_set_name: &str,
    ) -> Result<Vec<Record>>;

    async fn attributes_by_option_value_and_store(
        &self,
        option_value: &str,
        store_id: i64,
    ) -> Result<Vec<Record>>;

    async fn attribute_by_option_value_and_store(
        &self,
        option_value: &str,
        store_id: i64,
    ) -> Result<Option<Record>>;

    /// User defined attributes, optionally scoped to one entity type.
    async fn attributes_by_user_defined(
        &self,
        entity_type_id: Option<i64>,
        is_user_defined: i64,
    ) -> Result<Vec<Record>>;

    async fn stores(&self) -> Result<Vec<Record>>;

    async fn default_store(&self) -> Result<Option<Record>>;

    async fn store_websites(&self) -> Result<Vec<Record>>;

    async fn tax_classes(&self) -> Result<Vec<Record>>;

    async fn link_types(&self) -> Result<Vec<Record>>;

    async fn link_attributes(&self) -> Result<Vec<Record>>;

    async fn categories(&self) -> Result<Vec<Record>>;

    async fn root_categories(&self) -> Result<Vec<Record>>;

    async fn category_text_values(&self, entity_ids: &[i64]) -> Result<Vec<Record>>;

    async fn config_entries(&self) -> Result<Vec<Record>>;

    /// Categories keyed by their resolved name path.
    async fn resolved_category_paths(&self) -> Result<HashMap<String, Record>>;
}

pub struct SqlReferenceGateway {
    entity_types: EavEntityTypeRepository,
    attribute_sets: EavAttributeSetRepository,
    attributes: EavAttributeRepository,
    stores: StoreRepository,
    store_websites: StoreWebsiteRepository,
    tax_classes: TaxClassRepository,
    link_types: LinkTypeRepository,
    link_attributes: LinkAttributeRepository,
    categories: CategoryRepository,
    category_varchar: CategoryVarcharRepository,
    config_entries: CoreConfigDataRepository,
    category_assembler: CategoryAssembler,
}

impl SqlReferenceGateway {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            entity_types: EavEntityTypeRepository::new(pool.clone()),
            attribute_sets: EavAttributeSetRepository::new(pool.clone()),
            attributes: EavAttributeRepository::new(pool.clone()),
            stores: StoreRepository::new(pool.clone()),
            store_websites: StoreWebsiteRepository::new(pool.clone()),
            tax_classes: TaxClassRepository::new(pool.clone()),
            link_types: LinkTypeRepository::new(pool.clone()),
            link_attributes: LinkAttributeRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            category_varchar: CategoryVarcharRepository::new(pool.clone()),
            config_entries: CoreConfigDataRepository::new(pool.clone()),
            category_assembler: CategoryAssembler::new(pool),
        }
    }
}

#[async_trait]
impl ReferenceGateway for SqlReferenceGateway {
    async fn entity_types(&self) -> Result<Vec<Record>> {
        self.entity_types.find_all().await
    }

    async fn entity_type_by_code(&self, entity_type_code: &str) -> Result<Option<Record>> {
        self.entity_types.find_one_by_code(entity_type_code).await
    }

    async fn attribute_sets_by_entity_type(&self, entity_type_id: i64) -> Result<Vec<Record>> {
        self.attribute_sets
            .find_all_by_entity_type_id(entity_type_id)
            .await
    }

    async fn attribute_set_by_id(&self, attribute_set_id: i64) -> Result<Option<Record>> {
        self.attribute_sets.find_one_by_id(attribute_set_id).await
    }

    async fn attributes_by_entity_type_and_set(
        &self,
        entity_type_id: i64,
        attribute_set_name: &str,
    ) -> Result<Vec<Record>> {
        self.attributes
            .find_all_by_entity_type_id_and_attribute_set_name(entity_type_id, attribute_set_name)
            .await
    }

    async fn attributes_by_option_value_and_store(
        &self,
        option_value: &str,
        store_id: i64,
    ) -> Result<Vec<Record>> {
        self.attributes
            .find_all_by_option_value_and_store_id(option_value, store_id)
            .await
    }

    async fn attribute_by_option_value_and_store(
        &self,
        option_value: &str,
        store_id: i64,
    ) -> Result<Option<Record>> {
        self.attributes
            .find_one_by_option_value_and_store_id(option_value, store_id)
            .await
    }

    async fn attributes_by_user_defined(
        &self,
        entity_type_id: Option<i64>,
        is_user_defined: i64,
    ) -> Result<Vec<Record>> {
        match entity_type_id {
            Some(entity_type_id) => {
                self.attributes
                    .find_all_by_entity_type_id_and_is_user_defined(entity_type_id, is_user_defined)
                    .await
            }
            None => {
                self.attributes
                    .find_all_by_is_user_defined(is_user_defined)
                    .await
            }
        }
    }

    async fn stores(&self) -> Result<Vec<Record>> {
        self.stores.find_all().await
    }

    async fn default_store(&self) -> Result<Option<Record>> {
        self.stores.find_one_by_default().await
    }

    async fn store_websites(&self) -> Result<Vec<Record>> {
        self.store_websites.find_all().await
    }

    async fn tax_classes(&self) -> Result<Vec<Record>> {
        self.tax_classes.find_all().await
    }

    async fn link_types(&self) -> Result<Vec<Record>> {
        self.link_types.find_all().await
    }

    async fn link_attributes(&self) -> Result<Vec<Record>> {
        self.link_attributes.find_all().await
    }

    async fn categories(&self) -> Result<Vec<Record>> {
        self.categories.find_all().await
    }

    async fn root_categories(&self) -> Result<Vec<Record>> {
        self.categories.find_all_roots().await
    }

    async fn category_text_values(&self, entity_ids: &[i64]) -> Result<Vec<Record>> {
        self.category_varchar.find_all_by_entity_ids(entity_ids).await
    }

    async fn config_entries(&self) -> Result<Vec<Record>> {
        self.config_entries.find_all().await
    }

    async fn resolved_category_paths(&self) -> Result<HashMap<String, Record>> {
        self.category_assembler.find_all_with_resolved_path().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::reference_cache::ReferenceCacheBuilder;
    use crate::domain::members;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;

    const CATALOG_SCHEMA: &str = r#"
        CREATE TABLE eav_entity_type (
            entity_type_id INTEGER PRIMARY KEY,
            entity_type_code TEXT NOT NULL,
            entity_model TEXT,
            increment_per_store INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE eav_attribute_set (
            attribute_set_id INTEGER PRIMARY KEY,
            entity_type_id INTEGER NOT NULL,
            attribute_set_name TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE eav_attribute (
            attribute_id INTEGER PRIMARY KEY,
            entity_type_id INTEGER NOT NULL,
            attribute_code TEXT NOT NULL,
            backend_type TEXT,
            frontend_input TEXT,
            is_user_defined INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE eav_entity_attribute (
            entity_attribute_id INTEGER PRIMARY KEY,
            entity_type_id INTEGER NOT NULL,
            attribute_set_id INTEGER NOT NULL,
            attribute_id INTEGER NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE eav_attribute_option (
            option_id INTEGER PRIMARY KEY,
            attribute_id INTEGER NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE eav_attribute_option_value (
            value_id INTEGER PRIMARY KEY,
            option_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL,
            value TEXT
        );
        CREATE TABLE store (
            store_id INTEGER PRIMARY KEY,
            code TEXT NOT NULL,
            website_id INTEGER NOT NULL,
            group_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        );
        CREATE TABLE store_group (
            group_id INTEGER PRIMARY KEY,
            website_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            root_category_id INTEGER NOT NULL,
            default_store_id INTEGER NOT NULL
        );
        CREATE TABLE store_website (
            website_id INTEGER PRIMARY KEY,
            code TEXT NOT NULL,
            name TEXT,
            default_group_id INTEGER NOT NULL DEFAULT 0,
            is_default INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE tax_class (
            class_id INTEGER PRIMARY KEY,
            class_name TEXT NOT NULL,
            class_type TEXT NOT NULL
        );
        CREATE TABLE catalog_product_link_type (
            link_type_id INTEGER PRIMARY KEY,
            code TEXT NOT NULL
        );
        CREATE TABLE catalog_product_link_attribute (
            product_link_attribute_id INTEGER PRIMARY KEY,
            link_type_id INTEGER NOT NULL,
            product_link_attribute_code TEXT NOT NULL,
            data_type TEXT NOT NULL
        );
        CREATE TABLE catalog_category_entity (
            entity_id INTEGER PRIMARY KEY,
            attribute_set_id INTEGER NOT NULL DEFAULT 0,
            parent_id INTEGER NOT NULL DEFAULT 0,
            path TEXT NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            level INTEGER NOT NULL DEFAULT 0,
            children_count INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE catalog_category_entity_varchar (
            value_id INTEGER PRIMARY KEY,
            attribute_id INTEGER NOT NULL,
            store_id INTEGER NOT NULL,
            entity_id INTEGER NOT NULL,
            value TEXT
        );
        CREATE TABLE core_config_data (
            config_id INTEGER PRIMARY KEY,
            scope TEXT NOT NULL DEFAULT 'default',
            scope_id INTEGER NOT NULL DEFAULT 0,
            path TEXT NOT NULL,
            value TEXT
        )
    "#;

    const CATALOG_SEED: &str = r#"
        INSERT INTO eav_entity_type (entity_type_id, entity_type_code) VALUES (3, 'catalog_category');
        INSERT INTO eav_entity_type (entity_type_id, entity_type_code) VALUES (4, 'catalog_product');

        INSERT INTO eav_attribute_set VALUES (3, 3, 'Default', 1);
        INSERT INTO eav_attribute_set VALUES (4, 4, 'Default', 1);
        INSERT INTO eav_attribute_set VALUES (9, 4, 'Sport', 2);

        INSERT INTO eav_attribute VALUES (45, 3, 'name', 'varchar', 'text', 0);
        INSERT INTO eav_attribute VALUES (73, 4, 'sku', 'static', 'text', 0);
        INSERT INTO eav_attribute VALUES (74, 4, 'color', 'int', 'select', 1);
        INSERT INTO eav_attribute VALUES (75, 4, 'tax_class_id', 'int', 'select', 0);

        INSERT INTO eav_entity_attribute VALUES (1, 4, 4, 73, 10);
        INSERT INTO eav_entity_attribute VALUES (2, 4, 4, 74, 20);
        INSERT INTO eav_entity_attribute VALUES (3, 4, 4, 75, 30);
        INSERT INTO eav_entity_attribute VALUES (4, 4, 9, 73, 10);
        INSERT INTO eav_entity_attribute VALUES (5, 4, 9, 74, 20);
        INSERT INTO eav_entity_attribute VALUES (6, 3, 3, 45, 10);

        INSERT INTO eav_attribute_option VALUES (10, 74, 1);
        INSERT INTO eav_attribute_option VALUES (11, 74, 2);
        INSERT INTO eav_attribute_option_value VALUES (1, 10, 0, 'red');
        INSERT INTO eav_attribute_option_value VALUES (2, 10, 1, 'rot');
        INSERT INTO eav_attribute_option_value VALUES (3, 11, 0, 'blue');

        INSERT INTO store VALUES (0, 'admin', 0, 0, 'Admin', 0, 1);
        INSERT INTO store VALUES (1, 'default', 1, 1, 'Default Store View', 0, 1);
        INSERT INTO store VALUES (2, 'de', 1, 1, 'German', 10, 1);

        INSERT INTO store_group VALUES (1, 1, 'Main Group', 2, 1);

        INSERT INTO store_website VALUES (0, 'admin', 'Admin', 0, 0);
        INSERT INTO store_website VALUES (1, 'base', 'Main Website', 1, 1);

        INSERT INTO tax_class VALUES (2, 'Taxable Goods', 'PRODUCT');

        INSERT INTO catalog_product_link_type VALUES (1, 'relation');
        INSERT INTO catalog_product_link_type VALUES (4, 'upsell');
        INSERT INTO catalog_product_link_type VALUES (5, 'crosssell');

        INSERT INTO catalog_product_link_attribute VALUES (1, 1, 'position', 'int');
        INSERT INTO catalog_product_link_attribute VALUES (2, 4, 'position', 'int');

        INSERT INTO catalog_category_entity VALUES (1, 3, 0, '1', 0, 0, 1);
        INSERT INTO catalog_category_entity VALUES (2, 3, 1, '1/2', 1, 1, 1);
        INSERT INTO catalog_category_entity VALUES (3, 3, 2, '1/2/3', 1, 2, 0);

        INSERT INTO catalog_category_entity_varchar VALUES (1, 45, 0, 1, 'Root Catalog');
        INSERT INTO catalog_category_entity_varchar VALUES (2, 45, 0, 2, 'Default Category');
        INSERT INTO catalog_category_entity_varchar VALUES (3, 45, 0, 3, 'Gear');
        INSERT INTO catalog_category_entity_varchar VALUES (4, 45, 1, 3, 'Ausruestung');

        INSERT INTO core_config_data VALUES (1, 'default', 0, 'general/locale/code', 'en_US');
        INSERT INTO core_config_data VALUES (2, 'websites', 1, 'general/locale/code', 'de_DE')
    "#;

    async fn seeded_gateway() -> SqlReferenceGateway {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        for sql in [CATALOG_SCHEMA, CATALOG_SEED] {
            for statement in sql.split(';') {
                let stmt = statement.trim();
                if stmt.is_empty() {
                    continue;
                }
                sqlx::query(stmt).execute(&pool).await.unwrap();
            }
        }

        SqlReferenceGateway::new(pool)
    }

    fn codes(records: &[Record], member: &str) -> Vec<String> {
        records
            .iter()
            .map(|record| record.str_field(member).unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_entity_type_queries() {
        let gateway = seeded_gateway().await;

        let all = gateway.entity_types().await.unwrap();
        assert_eq!(all.len(), 2);

        let product = gateway
            .entity_type_by_code("catalog_product")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.int_field(members::ENTITY_TYPE_ID).unwrap(), 4);

        let missing = gateway.entity_type_by_code("customer").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_attribute_set_and_attribute_queries() {
        let gateway = seeded_gateway().await;

        let sets = gateway.attribute_sets_by_entity_type(4).await.unwrap();
        assert_eq!(codes(&sets, members::ATTRIBUTE_SET_NAME), ["Default", "Sport"]);

        let sport = gateway.attribute_set_by_id(9).await.unwrap().unwrap();
        assert_eq!(sport.str_field(members::ATTRIBUTE_SET_NAME).unwrap(), "Sport");

        let default_attributes = gateway
            .attributes_by_entity_type_and_set(4, "Default")
            .await
            .unwrap();
        assert_eq!(
            codes(&default_attributes, members::ATTRIBUTE_CODE),
            ["sku", "color", "tax_class_id"]
        );
        for attribute in &default_attributes {
            assert_eq!(
                attribute.str_field(members::ATTRIBUTE_SET_NAME).unwrap(),
                "Default"
            );
        }

        let sport_attributes = gateway
            .attributes_by_entity_type_and_set(4, "Sport")
            .await
            .unwrap();
        assert_eq!(codes(&sport_attributes, members::ATTRIBUTE_CODE), ["sku", "color"]);
    }

    #[tokio::test]
    async fn test_option_value_lookup() {
        let gateway = seeded_gateway().await;

        let admin = gateway
            .attribute_by_option_value_and_store("red", 0)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.str_field(members::ATTRIBUTE_CODE).unwrap(), "color");

        let translated = gateway
            .attribute_by_option_value_and_store("rot", 1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(translated.int_field(members::ATTRIBUTE_ID).unwrap(), 74);

        let wrong_store = gateway
            .attribute_by_option_value_and_store("red", 1)
            .await
            .unwrap();
        assert!(wrong_store.is_none());

        let all = gateway
            .attributes_by_option_value_and_store("red", 0)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_user_defined_attribute_queries() {
        let gateway = seeded_gateway().await;

        let scoped = gateway.attributes_by_user_defined(Some(4), 1).await.unwrap();
        assert_eq!(codes(&scoped, members::ATTRIBUTE_CODE), ["color"]);

        let unscoped = gateway.attributes_by_user_defined(None, 1).await.unwrap();
        assert_eq!(codes(&unscoped, members::ATTRIBUTE_CODE), ["color"]);

        let none_for_categories = gateway.attributes_by_user_defined(Some(3), 1).await.unwrap();
        assert!(none_for_categories.is_empty());
    }

    #[tokio::test]
    async fn test_store_and_flat_reference_queries() {
        let gateway = seeded_gateway().await;

        assert_eq!(gateway.stores().await.unwrap().len(), 3);
        assert_eq!(gateway.store_websites().await.unwrap().len(), 2);
        assert_eq!(gateway.tax_classes().await.unwrap().len(), 1);
        assert_eq!(gateway.link_types().await.unwrap().len(), 3);
        assert_eq!(gateway.link_attributes().await.unwrap().len(), 2);
        assert_eq!(gateway.config_entries().await.unwrap().len(), 2);

        let default_store = gateway.default_store().await.unwrap().unwrap();
        assert_eq!(default_store.str_field(members::CODE).unwrap(), "default");
    }

    #[tokio::test]
    async fn test_category_queries() {
        let gateway = seeded_gateway().await;

        assert_eq!(gateway.categories().await.unwrap().len(), 3);

        let roots = gateway.root_categories().await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].int_field(members::ENTITY_ID).unwrap(), 2);

        let texts = gateway.category_text_values(&[3]).await.unwrap();
        assert_eq!(texts.len(), 2);
        assert!(gateway.category_text_values(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolved_category_paths() {
        let gateway = seeded_gateway().await;

        let resolved = gateway.resolved_category_paths().await.unwrap();
        assert_eq!(resolved.len(), 3);
        assert!(resolved.contains_key("Root Catalog"));
        assert!(resolved.contains_key("Root Catalog/Default Category"));

        // The admin scope name wins over the store scoped one.
        let gear = &resolved["Root Catalog/Default Category/Gear"];
        assert_eq!(gear.int_field(members::ENTITY_ID).unwrap(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_build_over_catalog() {
        let gateway = seeded_gateway().await;
        let builder = ReferenceCacheBuilder::new(Arc::new(gateway));

        let snapshot = builder.build().await.unwrap();

        assert_eq!(
            snapshot.entity_type_codes(),
            ["catalog_category", "catalog_product"]
        );

        let mut set_keys: Vec<&str> = snapshot.attribute_sets.keys().map(String::as_str).collect();
        set_keys.sort_unstable();
        let mut attribute_keys: Vec<&str> =
            snapshot.attributes.keys().map(String::as_str).collect();
        attribute_keys.sort_unstable();
        let mut user_defined_keys: Vec<&str> = snapshot
            .user_defined_attributes
            .keys()
            .map(String::as_str)
            .collect();
        user_defined_keys.sort_unstable();
        assert_eq!(set_keys, ["catalog_category", "catalog_product"]);
        assert_eq!(attribute_keys, set_keys);
        assert_eq!(user_defined_keys, set_keys);

        assert_eq!(snapshot.attributes_of("catalog_product", "Default").unwrap().len(), 3);
        assert_eq!(snapshot.attributes_of("catalog_product", "Sport").unwrap().len(), 2);
        assert_eq!(
            codes(
                snapshot.user_defined_attributes_of("catalog_product").unwrap(),
                members::ATTRIBUTE_CODE
            ),
            ["color"]
        );
        assert!(snapshot
            .user_defined_attributes_of("catalog_category")
            .unwrap()
            .is_empty());

        assert_eq!(snapshot.stores.len(), 3);
        assert_eq!(snapshot.root_categories.len(), 1);
        assert_eq!(snapshot.categories.len(), 3);
        assert!(snapshot.default_store.is_some());
        assert!(!snapshot.serial.is_empty());
    }
}
