pub mod use_cases;

pub use use_cases::reference_cache::ReferenceCacheBuilder;
