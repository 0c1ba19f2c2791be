// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        audit::AuditLog,
        auth::{CreateUserPayload, User},
    },
};

// GET /api/users (somente admin)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Usuários",
    responses(
        (status = 200, description = "Equipe cadastrada", body = Vec<User>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.user_service.list(&user).await?;
    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users (somente admin)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Usuários",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Email já cadastrado ou dados inválidos"),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state.user_service.create(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/audit-logs (somente admin, últimas 100)
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    tag = "Usuários",
    responses(
        (status = 200, description = "Últimas 100 entradas de auditoria", body = Vec<AuditLog>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_audit_logs(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state.audit_service.list(&user).await?;
    Ok((StatusCode::OK, Json(logs)))
}
