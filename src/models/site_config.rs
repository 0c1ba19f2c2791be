// src/models/site_config.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::patch::{double_option, merge};

// Configuração pública do site (linha única)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SiteConfig {
    pub id: i64,
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub hero_image_url: Option<String>,
    pub footer_phone: Option<String>,
    pub footer_whatsapp: Option<String>,
    pub footer_address: Option<String>,
    pub footer_hours: Option<String>,
    pub footer_email: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SiteConfigPatch {
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub hero_title: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub hero_subtitle: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub hero_image_url: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub footer_phone: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub footer_whatsapp: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub footer_address: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub footer_hours: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub footer_email: Option<Option<String>>,
}

impl SiteConfigPatch {
    pub fn apply_to(self, config: &mut SiteConfig) {
        merge(&mut config.hero_title, self.hero_title);
        merge(&mut config.hero_subtitle, self.hero_subtitle);
        merge(&mut config.hero_image_url, self.hero_image_url);
        merge(&mut config.footer_phone, self.footer_phone);
        merge(&mut config.footer_whatsapp, self.footer_whatsapp);
        merge(&mut config.footer_address, self.footer_address);
        merge(&mut config.footer_hours, self.footer_hours);
        merge(&mut config.footer_email, self.footer_email);
    }
}

/// Valores gravados na primeira inicialização.
pub fn default_site_config() -> SiteConfigPatch {
    SiteConfigPatch {
        hero_title: Some(Some("ADÃO SILVA".to_string())),
        hero_subtitle: Some(Some("Imóveis de Luxo & Investimentos Exclusivos".to_string())),
        hero_image_url: None,
        footer_phone: Some(Some("64 3671-3590".to_string())),
        footer_whatsapp: Some(Some("556436713590".to_string())),
        footer_address: Some(Some(
            "Rua Rio Verde, esq. Rua Serra Dourada, Qd. 71, Lt. 01 - St. Montes Belos - São Luís de Montes Belos - GO"
                .to_string(),
        )),
        footer_hours: Some(Some("Seg - Sex: 08:00 - 18:00".to_string())),
        footer_email: Some(Some("adaocandidosilva@hotmail.com".to_string())),
    }
}
