pub mod reference_cache;
