// src/config.rs

use std::{env, str::FromStr, sync::Arc};

use anyhow::Context;
use axum::http::HeaderValue;
use jsonwebtoken::Algorithm;
use sqlx::SqlitePool;

use crate::{
    db::{
        AnalyticsRepository, AuditRepository, LeadRepository, PropertyRepository,
        SiteConfigRepository, UserRepository,
    },
    services::{
        analytics_service::AnalyticsService,
        audit_service::AuditService,
        auth::{AuthService, TokenIssuer},
        lead_service::LeadService,
        notifier::{LeadNotifier, LogNotifier},
        property_service::PropertyService,
        site_config_service::SiteConfigService,
        user_service::UserService,
    },
};

const DEV_SECRET: &str = "dev-secret-change-me";

// Configuração lida do ambiente (.env incluso)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub token_ttl: chrono::Duration,
    pub admin_email: String,
    pub admin_password: String,
    pub bind_addr: String,
    // Vazio = qualquer origem
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("SECRET_KEY não definida; usando segredo de desenvolvimento");
                DEV_SECRET.to_string()
            }
            _ => anyhow::bail!("SECRET_KEY deve ser definida"),
        };

        let algorithm_name = env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let jwt_algorithm = Algorithm::from_str(&algorithm_name)
            .with_context(|| format!("ALGORITHM inválido: {algorithm_name}"))?;
        if !matches!(jwt_algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            anyhow::bail!("ALGORITHM deve ser HS256, HS384 ou HS512");
        }

        let token_ttl = match env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(raw) => parse_token_ttl(&raw)?,
            Err(_) => chrono::Duration::minutes(1440),
        };

        let cors_origins = parse_cors_origins(&env::var("CORS_ORIGINS").unwrap_or_default())?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://imobiliaria.db?mode=rwc".to_string()),
            jwt_secret,
            jwt_algorithm,
            token_ttl,
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@crm.com".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            cors_origins,
        })
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            self.jwt_secret.clone(),
            self.jwt_algorithm,
            self.token_ttl,
        )
    }
}

fn parse_token_ttl(raw: &str) -> anyhow::Result<chrono::Duration> {
    let minutes = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("ACCESS_TOKEN_EXPIRE_MINUTES inválido: {raw}"))?;
    if minutes <= 0 {
        anyhow::bail!("ACCESS_TOKEN_EXPIRE_MINUTES deve ser positivo: {minutes}");
    }
    chrono::Duration::try_minutes(minutes)
        .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
        .with_context(|| format!("ACCESS_TOKEN_EXPIRE_MINUTES fora do intervalo: {minutes}"))
}

// Lista separada por vírgulas; vazio ou "*" libera qualquer origem
fn parse_cors_origins(raw: &str) -> anyhow::Result<Vec<HeaderValue>> {
    let origins: Vec<&str> = raw.split(',').map(str::trim).filter(|o| !o.is_empty()).collect();
    if origins.iter().any(|o| *o == "*") {
        return Ok(Vec::new());
    }
    origins
        .into_iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("CORS_ORIGINS inválido: {o}")))
        .collect()
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub lead_service: LeadService,
    pub property_service: PropertyService,
    pub audit_service: AuditService,
    pub analytics_service: AnalyticsService,
    pub user_service: UserService,
    pub site_config_service: SiteConfigService,
    pub cors_origins: Vec<HeaderValue>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = crate::db::connect(&config.database_url, 5).await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(Self::from_pool(db_pool, config, Arc::new(LogNotifier)))
    }

    // --- Monta o grafo de dependências ---
    pub fn from_pool(db_pool: SqlitePool, config: &Config, notifier: Arc<dyn LeadNotifier>) -> Self {
        let audit_service = AuditService::new(AuditRepository::new(), db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo.clone(), config.token_issuer()),
            lead_service: LeadService::new(LeadRepository::new(), db_pool.clone(), notifier),
            property_service: PropertyService::new(
                PropertyRepository::new(),
                audit_service.clone(),
                db_pool.clone(),
            ),
            analytics_service: AnalyticsService::new(AnalyticsRepository::new(), db_pool.clone()),
            user_service: UserService::new(user_repo, audit_service.clone(), db_pool.clone()),
            site_config_service: SiteConfigService::new(SiteConfigRepository::new(), db_pool.clone()),
            audit_service,
            db_pool,
            cors_origins: config.cors_origins.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_ttl_rejects_out_of_range_values() {
        assert_eq!(parse_token_ttl("30").unwrap(), chrono::Duration::minutes(30));
        assert!(parse_token_ttl("0").is_err());
        assert!(parse_token_ttl("abc").is_err());
        assert!(parse_token_ttl(&i64::MAX.to_string()).is_err());
        // Cabe em Duration, mas estoura a data de expiração
        assert!(parse_token_ttl("100000000000000").is_err());
    }

    #[test]
    fn cors_origins_wildcard_and_list() {
        assert!(parse_cors_origins("").unwrap().is_empty());
        assert!(parse_cors_origins("*").unwrap().is_empty());

        let origins = parse_cors_origins("https://site.example, http://127.0.0.1:5173").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "http://127.0.0.1:5173");

        assert!(parse_cors_origins("https://ok.example,bad\norigin").is_err());
    }
}
