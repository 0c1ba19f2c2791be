// src/services/audit_service.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    db::AuditRepository,
    models::{
        audit::{AuditAction, AuditLog, NewAuditLog, ResourceType},
        auth::User,
    },
    services::access_policy,
};

pub const AUDIT_LOG_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct AuditService {
    repo: AuditRepository,
    pool: SqlitePool,
}

impl AuditService {
    pub fn new(repo: AuditRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    /// Acrescenta uma entrada usando o executor do chamador, para que a
    /// auditoria e a alteração entrem na mesma transação.
    pub async fn record<'e, E>(
        &self,
        executor: E,
        actor: &User,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: Option<i64>,
        details: String,
    ) -> Result<AuditLog, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let entry = NewAuditLog {
            action,
            resource_type,
            resource_id,
            details,
        };
        let log = self.repo.insert(executor, actor, &entry).await?;

        tracing::info!(
            acao = log.acao.as_str(),
            recurso = log.recurso_tipo.as_str(),
            recurso_id = ?log.recurso_id,
            user_id = actor.id,
            "auditoria registrada"
        );
        Ok(log)
    }

    pub async fn list(&self, caller: &User) -> Result<Vec<AuditLog>, AppError> {
        access_policy::ensure(access_policy::can_view_audit_log(caller.role), "Acesso negado")?;
        self.repo.list_recent(&self.pool, AUDIT_LOG_LIMIT).await
    }
}
