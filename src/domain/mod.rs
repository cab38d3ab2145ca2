pub mod csv;
pub mod error;
pub mod members;
pub mod record;
pub mod snapshot;
