// src/handlers/auth.rs

use axum::{extract::State, Form, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginForm, TokenResponse},
};

// POST /api/auth/login (form-urlencoded: username, password)
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token de sessão emitido", body = TokenResponse),
        (status = 401, description = "Email ou senha incorretos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = app_state
        .auth_service
        .login_user(form.username.trim(), &form.password)
        .await?;

    Ok(Json(TokenResponse::bearer(token)))
}
