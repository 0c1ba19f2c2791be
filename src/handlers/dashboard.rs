// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::analytics::{AnalyticsReport, DashboardStats},
};

// GET /api/stats
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards do dashboard", body = DashboardStats),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.analytics_service.dashboard_summary().await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/analytics/stats
// Falhas internas viram uma resposta genérica; o detalhe fica só no log.
#[utoipa::path(
    get,
    path = "/api/analytics/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Gráfico, ranking e conversão", body = AnalyticsReport),
        (status = 500, description = "Erro interno ao processar analítica")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_analytics(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let report = app_state.analytics_service.report().await.map_err(|e| {
        tracing::error!(error = %e, "falha ao processar analítica");
        AppError::AnalyticsUnavailable
    })?;
    Ok((StatusCode::OK, Json(report)))
}
