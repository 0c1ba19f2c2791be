// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::site_config::{SiteConfig, SiteConfigPatch},
};

// GET /api/config (público)
#[utoipa::path(
    get,
    path = "/api/config",
    tag = "Configuração",
    responses(
        (status = 200, description = "Configuração pública do site", body = SiteConfig),
        (status = 404, description = "Configuração ainda não criada")
    )
)]
pub async fn get_config(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let config = app_state.site_config_service.get().await?;
    Ok((StatusCode::OK, Json(config)))
}

// PATCH /api/config
#[utoipa::path(
    patch,
    path = "/api/config",
    tag = "Configuração",
    request_body = SiteConfigPatch,
    responses(
        (status = 200, description = "Configuração atualizada", body = SiteConfig),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_config(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(patch): Json<SiteConfigPatch>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state.site_config_service.update(patch).await?;
    tracing::info!(user_id = user.id, "configuração do site atualizada");
    Ok((StatusCode::OK, Json(updated)))
}
