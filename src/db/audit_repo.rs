// src/db/audit_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::{
        audit::{AuditLog, NewAuditLog},
        auth::User,
    },
};

// Somente inserção e leitura: a trilha nunca é alterada nem apagada.
#[derive(Clone, Default)]
pub struct AuditRepository;

impl AuditRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert<'e, E>(&self, executor: E, actor: &User, entry: &NewAuditLog) -> Result<AuditLog, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let log = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (user_id, user_email, acao, recurso_tipo, recurso_id, detalhes, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, user_email, acao, recurso_tipo, recurso_id, detalhes, timestamp
            "#,
        )
        .bind(actor.id)
        .bind(&actor.email)
        .bind(entry.action.as_str())
        .bind(entry.resource_type.as_str())
        .bind(entry.resource_id)
        .bind(&entry.details)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(log)
    }

    pub async fn list_recent<'e, E>(&self, executor: E, limit: i64) -> Result<Vec<AuditLog>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let logs = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, user_id, user_email, acao, recurso_tipo, recurso_id, detalhes, timestamp
            FROM audit_logs
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;
        Ok(logs)
    }
}
