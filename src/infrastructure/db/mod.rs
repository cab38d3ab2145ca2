pub mod category_assembler;
pub mod connection;
pub mod gateway;
pub mod repositories;
pub mod row;
pub mod statements;

pub use category_assembler::CategoryAssembler;
pub use connection::connect_catalog_pool;
pub use gateway::{ReferenceGateway, SqlReferenceGateway};
pub use row::record_from_row;
