// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Value objects for delimited cell handling
// No I/O, no async, no external dependencies

mod dialect;

pub use dialect::CsvDialect;
