mod attribute_sets;
mod attributes;
mod categories;
mod config_entries;
mod entity_types;
mod links;
mod stores;
mod tax_classes;

pub use attribute_sets::EavAttributeSetRepository;
pub use attributes::EavAttributeRepository;
pub use categories::{CategoryRepository, CategoryVarcharRepository};
pub use config_entries::CoreConfigDataRepository;
pub use entity_types::EavEntityTypeRepository;
pub use links::{LinkAttributeRepository, LinkTypeRepository};
pub use stores::{StoreRepository, StoreWebsiteRepository};
pub use tax_classes::TaxClassRepository;
