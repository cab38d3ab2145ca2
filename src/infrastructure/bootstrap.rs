// ============================================================
// BOOTSTRAP
// ============================================================
// Wires configuration, catalog pool and services into a ready
// import context

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::info;

use crate::application::use_cases::reference_cache::ReferenceCacheBuilder;
use crate::domain::error::{ImportError, Result};
use crate::infrastructure::config::ImportConfig;
use crate::infrastructure::csv::ValueCodec;
use crate::infrastructure::db::{connect_catalog_pool, ReferenceGateway, SqlReferenceGateway};

/// Services assembled once at startup and shared by the import run.
pub struct ImportContext {
    pub pool: SqlitePool,
    pub gateway: Arc<dyn ReferenceGateway>,
    pub cache_builder: ReferenceCacheBuilder,
    pub value_codec: ValueCodec,
}

impl std::fmt::Debug for ImportContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportContext")
            .field("pool", &self.pool)
            .field("value_codec", &self.value_codec)
            .finish_non_exhaustive()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

pub async fn setup(config: &ImportConfig) -> Result<ImportContext> {
    config.validate().map_err(ImportError::Configuration)?;

    let pool = connect_catalog_pool(&config.database_url, config.max_connections).await?;
    let gateway: Arc<dyn ReferenceGateway> = Arc::new(SqlReferenceGateway::new(pool.clone()));
    let cache_builder = ReferenceCacheBuilder::new(Arc::clone(&gateway))
        .with_user_defined_flag(config.user_defined_flag);
    let value_codec = ValueCodec::new(config.csv);

    info!("Import context ready for {}", config.database_url);

    Ok(ImportContext {
        pool,
        gateway,
        cache_builder,
        value_codec,
    })
}
