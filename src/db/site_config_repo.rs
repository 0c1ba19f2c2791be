// src/db/site_config_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::{common::error::AppError, models::site_config::SiteConfig};

const SITE_CONFIG_COLUMNS: &str = "id, hero_title, hero_subtitle, hero_image_url, footer_phone, \
    footer_whatsapp, footer_address, footer_hours, footer_email, updated_at";

#[derive(Clone, Default)]
pub struct SiteConfigRepository;

impl SiteConfigRepository {
    pub fn new() -> Self {
        Self
    }

    // Linha única; se houver mais de uma, vale a primeira
    pub async fn get<'e, E>(&self, executor: E) -> Result<Option<SiteConfig>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let config = sqlx::query_as::<_, SiteConfig>(&format!(
            "SELECT {SITE_CONFIG_COLUMNS} FROM site_config ORDER BY id ASC LIMIT 1"
        ))
        .fetch_optional(executor)
        .await?;
        Ok(config)
    }

    pub async fn insert<'e, E>(&self, executor: E, config: &SiteConfig) -> Result<SiteConfig, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let inserted = sqlx::query_as::<_, SiteConfig>(&format!(
            r#"
            INSERT INTO site_config (
                hero_title, hero_subtitle, hero_image_url, footer_phone,
                footer_whatsapp, footer_address, footer_hours, footer_email, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SITE_CONFIG_COLUMNS}
            "#
        ))
        .bind(&config.hero_title)
        .bind(&config.hero_subtitle)
        .bind(&config.hero_image_url)
        .bind(&config.footer_phone)
        .bind(&config.footer_whatsapp)
        .bind(&config.footer_address)
        .bind(&config.footer_hours)
        .bind(&config.footer_email)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(inserted)
    }

    pub async fn update<'e, E>(&self, executor: E, config: &SiteConfig) -> Result<SiteConfig, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, SiteConfig>(&format!(
            r#"
            UPDATE site_config SET
                hero_title = ?, hero_subtitle = ?, hero_image_url = ?, footer_phone = ?,
                footer_whatsapp = ?, footer_address = ?, footer_hours = ?, footer_email = ?,
                updated_at = ?
            WHERE id = ?
            RETURNING {SITE_CONFIG_COLUMNS}
            "#
        ))
        .bind(&config.hero_title)
        .bind(&config.hero_subtitle)
        .bind(&config.hero_image_url)
        .bind(&config.footer_phone)
        .bind(&config.footer_whatsapp)
        .bind(&config.footer_address)
        .bind(&config.footer_hours)
        .bind(&config.footer_email)
        .bind(Utc::now())
        .bind(config.id)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }
}
