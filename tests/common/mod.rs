//! Helpers compartilhados pelos testes de integração: banco SQLite em
//! memória, migrações e usuários prontos.

#![allow(dead_code)]

use std::sync::Arc;

use jsonwebtoken::Algorithm;
use sqlx::SqlitePool;

use imobiliaria_backend::{
    config::{AppState, Config},
    db::{self, UserRepository},
    models::auth::{Role, User},
    services::notifier::{LeadNotifier, LogNotifier},
};

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "segredo-de-teste".into(),
        jwt_algorithm: Algorithm::HS256,
        token_ttl: chrono::Duration::minutes(60),
        admin_email: "admin@crm.com".into(),
        admin_password: "admin123".into(),
        bind_addr: "127.0.0.1:0".into(),
        cors_origins: Vec::new(),
    }
}

/// Uma conexão só: o banco em memória vive enquanto ela estiver aberta.
pub async fn pool() -> SqlitePool {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

pub async fn setup() -> AppState {
    setup_with_notifier(Arc::new(LogNotifier)).await
}

pub async fn setup_with_notifier(notifier: Arc<dyn LeadNotifier>) -> AppState {
    let pool = pool().await;
    AppState::from_pool(pool, &test_config(), notifier)
}

/// Cria um usuário com custo de bcrypt baixo para não arrastar os testes.
pub async fn create_user(state: &AppState, email: &str, password: &str, role: Role) -> User {
    let senha_hash = bcrypt::hash(password, 4).unwrap();
    UserRepository::new(state.db_pool.clone())
        .create_user(&state.db_pool, email, &senha_hash, role)
        .await
        .unwrap()
}

pub async fn admin(state: &AppState) -> User {
    create_user(state, "admin@crm.com", "admin123", Role::Admin).await
}

pub async fn vendedor(state: &AppState, email: &str) -> User {
    create_user(state, email, "senha123", Role::Vendedor).await
}

pub fn token_for(user: &User) -> String {
    test_config().token_issuer().issue(user).unwrap()
}

pub async fn count(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await.unwrap()
}
