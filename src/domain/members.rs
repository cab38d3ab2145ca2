// ============================================================
// RECORD MEMBER NAMES
// ============================================================
// Column names shared between the reference gateway and the
// snapshot consumers. Keys into `Record`, not SQL identifiers.

pub const ENTITY_TYPE_ID: &str = "entity_type_id";
pub const ENTITY_TYPE_CODE: &str = "entity_type_code";
pub const ATTRIBUTE_SET_ID: &str = "attribute_set_id";
pub const ATTRIBUTE_SET_NAME: &str = "attribute_set_name";
pub const ATTRIBUTE_ID: &str = "attribute_id";
pub const ATTRIBUTE_CODE: &str = "attribute_code";
pub const IS_USER_DEFINED: &str = "is_user_defined";
pub const STORE_ID: &str = "store_id";
pub const CODE: &str = "code";
pub const WEBSITE_ID: &str = "website_id";
pub const ENTITY_ID: &str = "entity_id";
pub const PARENT_ID: &str = "parent_id";
pub const PATH: &str = "path";
pub const VALUE: &str = "value";
