pub mod analytics_repo;
pub use analytics_repo::AnalyticsRepository;
pub mod audit_repo;
pub use audit_repo::AuditRepository;
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod property_repo;
pub use property_repo::PropertyRepository;
pub mod site_config_repo;
pub use site_config_repo::SiteConfigRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// Abre o pool do SQLite. Chaves estrangeiras ligadas em toda conexão para
/// que o CASCADE das imagens funcione.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
