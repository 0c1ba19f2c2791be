// src/models/property.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::patch::{double_option, merge};

pub const STATUS_ATIVO: &str = "ATIVO";

// Imóvel. Preço, condomínio, IPTU e área são textos de exibição, não números.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Property {
    pub id: i64,
    #[schema(example = "Casa no Setor Montes Belos")]
    pub titulo: String,
    pub descricao: Option<String>,
    #[schema(example = "R$ 850.000")]
    pub preco: Option<String>,
    pub condominio: Option<String>,
    pub iptu: Option<String>,
    pub localizacao: Option<String>,
    pub tipo: Option<String>,
    pub quartos: i64,
    pub banheiros: i64,
    pub vagas: i64,
    pub area: Option<String>,
    pub status: String,
    pub video_url: Option<String>,
    pub main_image_url: Option<String>,
    pub thumb_image_url: Option<String>,
    pub is_destaque: i64,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Carregada à parte, ordenada por (ordem, id)
    #[sqlx(skip)]
    pub images: Vec<PropertyImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PropertyImage {
    pub id: i64,
    pub property_id: i64,
    pub image_url: String,
    pub thumb_url: Option<String>,
    pub ordem: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewPropertyImage {
    #[validate(length(min = 1, message = "A imagem é obrigatória."))]
    pub image_url: String,
    pub thumb_url: Option<String>,
    pub ordem: Option<i64>,
}

impl NewPropertyImage {
    pub fn ordem(&self) -> i64 {
        self.ordem.unwrap_or(0)
    }
}

fn default_status() -> String {
    STATUS_ATIVO.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePropertyPayload {
    #[validate(length(min = 1, max = 100, message = "O título é obrigatório."))]
    pub titulo: String,
    pub descricao: Option<String>,
    pub preco: Option<String>,
    pub condominio: Option<String>,
    pub iptu: Option<String>,
    pub localizacao: Option<String>,
    pub tipo: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quartos: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub banheiros: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub vagas: i64,
    pub area: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub video_url: Option<String>,
    pub main_image_url: Option<String>,
    pub thumb_image_url: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 1))]
    pub is_destaque: i64,
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<NewPropertyImage>,
}

/// PATCH de imóvel.
///
/// Campos escalares seguem mesclagem esparsa: ausente = intocado. Colunas
/// anuláveis aceitam `null` explícito. `images`, quando presente (mesmo
/// vazio), substitui a galeria inteira.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PropertyPatch {
    #[validate(length(min = 1, max = 100, message = "O título não pode ser vazio."))]
    pub titulo: Option<String>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub descricao: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub preco: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub condominio: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub iptu: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub localizacao: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub tipo: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub quartos: Option<i64>,
    #[validate(range(min = 0))]
    pub banheiros: Option<i64>,
    #[validate(range(min = 0))]
    pub vagas: Option<i64>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub area: Option<Option<String>>,
    #[validate(length(min = 1, message = "O status não pode ser vazio."))]
    pub status: Option<String>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub video_url: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub main_image_url: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub thumb_image_url: Option<Option<String>>,
    #[validate(range(min = 0, max = 1))]
    pub is_destaque: Option<i64>,
    #[validate(nested)]
    pub images: Option<Vec<NewPropertyImage>>,
}

impl PropertyPatch {
    /// Novo preço, se o campo veio no payload e difere do atual.
    pub fn price_change<'a>(&'a self, current: Option<&'a str>) -> Option<(Option<&'a str>, Option<&'a str>)> {
        let incoming = self.preco.as_ref()?.as_deref();
        (incoming != current).then_some((current, incoming))
    }

    /// Mescla campo a campo. Devolve as imagens, que são tratadas à parte.
    pub fn apply_to(self, property: &mut Property) -> Option<Vec<NewPropertyImage>> {
        merge(&mut property.titulo, self.titulo);
        merge(&mut property.descricao, self.descricao);
        merge(&mut property.preco, self.preco);
        merge(&mut property.condominio, self.condominio);
        merge(&mut property.iptu, self.iptu);
        merge(&mut property.localizacao, self.localizacao);
        merge(&mut property.tipo, self.tipo);
        merge(&mut property.quartos, self.quartos);
        merge(&mut property.banheiros, self.banheiros);
        merge(&mut property.vagas, self.vagas);
        merge(&mut property.area, self.area);
        merge(&mut property.status, self.status);
        merge(&mut property.video_url, self.video_url);
        merge(&mut property.main_image_url, self.main_image_url);
        merge(&mut property.thumb_image_url, self.thumb_image_url);
        merge(&mut property.is_destaque, self.is_destaque);
        self.images
    }
}

// GET /properties?search=&skip=&limit=
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertySearchParams {
    pub search: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
