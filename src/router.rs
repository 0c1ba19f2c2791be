// src/router.rs

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};

use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

/// Monta o roteador completo da API. Usado pelo binário e pelos testes.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Leads: criação pública, listagem e edição exigem sessão (via extrator)
    let lead_routes = Router::new()
        .route(
            "/",
            post(handlers::leads::create_lead).get(handlers::leads::list_leads),
        )
        .route("/{id}", patch(handlers::leads::update_lead));

    // Imóveis: busca e detalhe públicos, o resto exige sessão (via extrator)
    let property_routes = Router::new()
        .route(
            "/",
            get(handlers::properties::search_properties).post(handlers::properties::create_property),
        )
        .route(
            "/{id}",
            get(handlers::properties::get_property)
                .patch(handlers::properties::update_property)
                .delete(handlers::properties::delete_property),
        );

    let config_routes = Router::new().route(
        "/",
        get(handlers::settings::get_config).patch(handlers::settings::update_config),
    );

    // Grupos inteiramente protegidos
    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route("/audit-logs", get(handlers::users::list_audit_logs))
        .route("/stats", get(handlers::dashboard::get_stats))
        .route("/analytics/stats", get(handlers::dashboard::get_analytics))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/auth", auth_routes)
        .nest("/leads", lead_routes)
        .nest("/properties", property_routes)
        .nest("/config", config_routes)
        .merge(admin_routes);

    let cors = cors_layer(&app_state.cors_origins);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .with_state(app_state)
        .layer(cors)
}

/// O painel e a vitrine rodam em outra origem. Lista vazia libera qualquer uma.
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().cloned())
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
