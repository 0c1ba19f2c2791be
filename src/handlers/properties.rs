// src/handlers/properties.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Pagination},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::property::{CreatePropertyPayload, Property, PropertyPatch, PropertySearchParams},
};

// POST /api/properties
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "Imóveis",
    request_body = CreatePropertyPayload,
    responses(
        (status = 201, description = "Imóvel criado com a galeria", body = Property),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreatePropertyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let property = app_state.property_service.create(&user, &payload).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

// GET /api/properties?search=&skip=&limit= (público)
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "Imóveis",
    params(PropertySearchParams),
    responses(
        (status = 200, description = "Imóveis encontrados", body = Vec<Property>)
    )
)]
pub async fn search_properties(
    State(app_state): State<AppState>,
    Query(params): Query<PropertySearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = Pagination {
        skip: params.skip,
        limit: params.limit,
    };
    let properties = app_state
        .property_service
        .search(params.search.as_deref(), pagination)
        .await?;
    Ok((StatusCode::OK, Json(properties)))
}

// GET /api/properties/{id} (público, conta uma visualização)
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "Imóveis",
    params(("id" = i64, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "Detalhe do imóvel", body = Property),
        (status = 404, description = "Imóvel não encontrado")
    )
)]
pub async fn get_property(
    State(app_state): State<AppState>,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let property = app_state.property_service.get(property_id).await?;
    Ok((StatusCode::OK, Json(property)))
}

// PATCH /api/properties/{id}
#[utoipa::path(
    patch,
    path = "/api/properties/{id}",
    tag = "Imóveis",
    params(("id" = i64, Path, description = "ID do imóvel")),
    request_body = PropertyPatch,
    responses(
        (status = 200, description = "Imóvel atualizado", body = Property),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_property(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(property_id): Path<i64>,
    Json(patch): Json<PropertyPatch>,
) -> Result<impl IntoResponse, AppError> {
    patch.validate()?;

    let property = app_state
        .property_service
        .update(&user, property_id, patch)
        .await?;
    Ok((StatusCode::OK, Json(property)))
}

// DELETE /api/properties/{id} (somente admin)
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "Imóveis",
    params(("id" = i64, Path, description = "ID do imóvel")),
    responses(
        (status = 200, description = "Imóvel excluído"),
        (status = 403, description = "Apenas administradores"),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_property(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete(&user, property_id).await?;
    Ok((StatusCode::OK, Json(json!({ "detail": "Property deleted" }))))
}
