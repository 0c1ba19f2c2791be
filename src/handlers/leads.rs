// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::lead::{CreateLeadPayload, Lead, LeadPatch},
};

// POST /api/leads (público)
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead registrado", body = Lead),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.lead_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/leads?skip=&limit=
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    params(Pagination),
    responses(
        (status = 200, description = "Leads visíveis para o usuário", body = Vec<Lead>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.lead_service.list(&user, pagination).await?;
    Ok((StatusCode::OK, Json(leads)))
}

// PATCH /api/leads/{id}
#[utoipa::path(
    patch,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(("id" = i64, Path, description = "ID do lead")),
    request_body = LeadPatch,
    responses(
        (status = 200, description = "Lead atualizado", body = Lead),
        (status = 403, description = "Atribuição de corretor exclusiva de admin"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(lead_id): Path<i64>,
    Json(patch): Json<LeadPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.validate()?;

    let lead = app_state.lead_service.update(&user, lead_id, patch).await?;
    tracing::info!(lead_id, user_id = user.id, "lead atualizado");
    Ok((StatusCode::OK, Json(lead)))
}
