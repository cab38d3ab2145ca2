pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::reference_cache::ReferenceCacheBuilder;
pub use domain::csv::CsvDialect;
pub use domain::error::{ImportError, Result};
pub use domain::members;
pub use domain::record::Record;
pub use domain::snapshot::ReferenceSnapshot;
pub use infrastructure::bootstrap::{init_tracing, setup, ImportContext};
pub use infrastructure::config::ImportConfig;
pub use infrastructure::csv::ValueCodec;
pub use infrastructure::db::{
    connect_catalog_pool, CategoryAssembler, ReferenceGateway, SqlReferenceGateway,
};
