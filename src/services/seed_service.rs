// src/services/seed_service.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{SiteConfigRepository, UserRepository},
    models::{
        auth::Role,
        site_config::{default_site_config, SiteConfig},
    },
    services::auth::hash_password,
};

/// Cria o admin inicial e a configuração do site, se ainda não existirem.
/// Pode rodar em toda inicialização.
pub async fn seed_defaults(
    pool: &SqlitePool,
    admin_email: &str,
    admin_password: &str,
) -> Result<(), AppError> {
    let users = UserRepository::new(pool.clone());
    if users.find_by_email(admin_email).await?.is_none() {
        tracing::info!(email = admin_email, "criando usuário admin inicial");
        let senha_hash = hash_password(admin_password).await?;
        users.create_user(pool, admin_email, &senha_hash, Role::Admin).await?;
    }

    let configs = SiteConfigRepository::new();
    if configs.get(pool).await?.is_none() {
        tracing::info!("criando configuração padrão do site");
        let mut config = SiteConfig {
            id: 0,
            hero_title: None,
            hero_subtitle: None,
            hero_image_url: None,
            footer_phone: None,
            footer_whatsapp: None,
            footer_address: None,
            footer_hours: None,
            footer_email: None,
            updated_at: Utc::now(),
        };
        default_site_config().apply_to(&mut config);
        configs.insert(pool, &config).await?;
    }

    Ok(())
}
