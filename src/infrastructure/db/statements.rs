// ============================================================
// SQL STATEMENT REGISTRY
// ============================================================
// Every statement the reference gateway runs, keyed by name so
// repositories never carry SQL inline.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::error::{ImportError, Result};

/// Token replaced with the bind placeholders of an `IN` list.
pub const ENTITY_IDS_TOKEN: &str = ":entity_ids";

pub mod keys {
    pub const EAV_ENTITY_TYPES: &str = "eav_entity_type.all";
    pub const EAV_ENTITY_TYPE_BY_CODE: &str = "eav_entity_type.by.code";
    pub const EAV_ATTRIBUTE_SETS_BY_ENTITY_TYPE_ID: &str = "eav_attribute_set.all.by.entity_type_id";
    pub const EAV_ATTRIBUTE_SET_BY_ID: &str = "eav_attribute_set.by.id";
    pub const EAV_ATTRIBUTES_BY_ENTITY_TYPE_ID_AND_ATTRIBUTE_SET_NAME: &str =
        "eav_attribute.all.by.entity_type_id.attribute_set_name";
    pub const EAV_ATTRIBUTES_BY_OPTION_VALUE_AND_STORE_ID: &str =
        "eav_attribute.all.by.option_value.store_id";
    pub const EAV_ATTRIBUTES_BY_IS_USER_DEFINED: &str = "eav_attribute.all.by.is_user_defined";
    pub const EAV_ATTRIBUTES_BY_ENTITY_TYPE_ID_AND_IS_USER_DEFINED: &str =
        "eav_attribute.all.by.entity_type_id.is_user_defined";
    pub const STORES: &str = "store.all";
    pub const STORE_DEFAULT: &str = "store.default";
    pub const STORE_WEBSITES: &str = "store_website.all";
    pub const TAX_CLASSES: &str = "tax_class.all";
    pub const LINK_TYPES: &str = "catalog_product_link_type.all";
    pub const LINK_ATTRIBUTES: &str = "catalog_product_link_attribute.all";
    pub const CATEGORIES: &str = "catalog_category.all";
    pub const ROOT_CATEGORIES: &str = "catalog_category.root.all";
    pub const CATEGORY_VARCHAR_VALUES: &str = "catalog_category_varchar.all.by.entity_ids";
    pub const CORE_CONFIG_DATA: &str = "core_config_data.all";
}

static STATEMENTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (keys::EAV_ENTITY_TYPES, "SELECT * FROM eav_entity_type"),
        (
            keys::EAV_ENTITY_TYPE_BY_CODE,
            "SELECT * FROM eav_entity_type WHERE entity_type_code = ?",
        ),
        (
            keys::EAV_ATTRIBUTE_SETS_BY_ENTITY_TYPE_ID,
            "SELECT * FROM eav_attribute_set WHERE entity_type_id = ? \
             ORDER BY sort_order, attribute_set_id",
        ),
        (
            keys::EAV_ATTRIBUTE_SET_BY_ID,
            "SELECT * FROM eav_attribute_set WHERE attribute_set_id = ?",
        ),
        (
            keys::EAV_ATTRIBUTES_BY_ENTITY_TYPE_ID_AND_ATTRIBUTE_SET_NAME,
            r#"SELECT t1.*, t3.attribute_set_name
                 FROM eav_attribute t1
                INNER JOIN eav_entity_attribute t2 ON t2.attribute_id = t1.attribute_id
                INNER JOIN eav_attribute_set t3 ON t3.attribute_set_id = t2.attribute_set_id
                WHERE t1.entity_type_id = ?
                  AND t3.entity_type_id = t1.entity_type_id
                  AND t3.attribute_set_name = ?
                ORDER BY t2.sort_order, t1.attribute_id"#,
        ),
        (
            keys::EAV_ATTRIBUTES_BY_OPTION_VALUE_AND_STORE_ID,
            r#"SELECT DISTINCT t1.*
                 FROM eav_attribute t1
                INNER JOIN eav_attribute_option t2 ON t2.attribute_id = t1.attribute_id
                INNER JOIN eav_attribute_option_value t3 ON t3.option_id = t2.option_id
                WHERE t3.value = ?
                  AND t3.store_id = ?
                ORDER BY t1.attribute_id"#,
        ),
        (
            keys::EAV_ATTRIBUTES_BY_IS_USER_DEFINED,
            "SELECT * FROM eav_attribute WHERE is_user_defined = ? ORDER BY attribute_id",
        ),
        (
            keys::EAV_ATTRIBUTES_BY_ENTITY_TYPE_ID_AND_IS_USER_DEFINED,
            "SELECT * FROM eav_attribute WHERE entity_type_id = ? AND is_user_defined = ? \
             ORDER BY attribute_id",
        ),
        (keys::STORES, "SELECT * FROM store ORDER BY store_id"),
        (
            keys::STORE_DEFAULT,
            r#"SELECT t0.*
                 FROM store t0
                INNER JOIN store_group t1 ON t1.default_store_id = t0.store_id
                INNER JOIN store_website t2 ON t2.website_id = t1.website_id
                WHERE t2.is_default = 1"#,
        ),
        (
            keys::STORE_WEBSITES,
            "SELECT * FROM store_website ORDER BY website_id",
        ),
        (keys::TAX_CLASSES, "SELECT * FROM tax_class ORDER BY class_id"),
        (
            keys::LINK_TYPES,
            "SELECT * FROM catalog_product_link_type ORDER BY link_type_id",
        ),
        (
            keys::LINK_ATTRIBUTES,
            "SELECT * FROM catalog_product_link_attribute ORDER BY product_link_attribute_id",
        ),
        (
            keys::CATEGORIES,
            "SELECT * FROM catalog_category_entity ORDER BY entity_id",
        ),
        (
            keys::ROOT_CATEGORIES,
            r#"SELECT DISTINCT t1.*
                 FROM store_group t0
                INNER JOIN catalog_category_entity t1 ON t1.entity_id = t0.root_category_id
                ORDER BY t1.entity_id"#,
        ),
        (
            keys::CATEGORY_VARCHAR_VALUES,
            r#"SELECT t1.entity_id, t1.store_id, t1.value, t2.attribute_code
                 FROM catalog_category_entity_varchar t1
                INNER JOIN eav_attribute t2 ON t2.attribute_id = t1.attribute_id
                WHERE t1.entity_id IN (:entity_ids)
                ORDER BY t1.entity_id, t1.store_id"#,
        ),
        (
            keys::CORE_CONFIG_DATA,
            "SELECT * FROM core_config_data ORDER BY config_id",
        ),
    ])
});

pub fn load_statement(key: &str) -> Result<&'static str> {
    STATEMENTS
        .get(key)
        .copied()
        .ok_or_else(|| ImportError::DataAccess(format!("No SQL statement registered for key '{key}'")))
}
