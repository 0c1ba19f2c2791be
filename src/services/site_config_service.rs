// src/services/site_config_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::SiteConfigRepository,
    models::site_config::{SiteConfig, SiteConfigPatch},
};

#[derive(Clone)]
pub struct SiteConfigService {
    repo: SiteConfigRepository,
    pool: SqlitePool,
}

impl SiteConfigService {
    pub fn new(repo: SiteConfigRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn get(&self) -> Result<SiteConfig, AppError> {
        self.repo
            .get(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Configuração".to_string()))
    }

    pub async fn update(&self, patch: SiteConfigPatch) -> Result<SiteConfig, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut config = self
            .repo
            .get(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Configuração".to_string()))?;

        patch.apply_to(&mut config);
        let updated = self.repo.update(&mut *tx, &config).await?;

        tx.commit().await?;
        Ok(updated)
    }
}
