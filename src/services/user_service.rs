// src/services/user_service.rs

use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        audit::{AuditAction, ResourceType},
        auth::{CreateUserPayload, Role, User},
    },
    services::{access_policy, audit_service::AuditService, auth::hash_password},
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
    audit: AuditService,
    pool: SqlitePool,
}

impl UserService {
    pub fn new(repo: UserRepository, audit: AuditService, pool: SqlitePool) -> Self {
        Self { repo, audit, pool }
    }

    pub async fn list(&self, caller: &User) -> Result<Vec<User>, AppError> {
        access_policy::ensure(access_policy::can_manage_users(caller.role), "Acesso negado")?;
        self.repo.list_all(&self.pool).await
    }

    pub async fn create(&self, caller: &User, input: &CreateUserPayload) -> Result<User, AppError> {
        access_policy::ensure(access_policy::can_manage_users(caller.role), "Acesso negado")?;

        // Hash fora da transação: não toca no banco
        let senha_hash = hash_password(&input.password).await?;
        let role = input.role.unwrap_or(Role::Vendedor);

        let mut tx = self.pool.begin().await?;

        let user = self
            .repo
            .create_user(&mut *tx, &input.email, &senha_hash, role)
            .await?;

        self.audit
            .record(
                &mut *tx,
                caller,
                AuditAction::CreateUser,
                ResourceType::User,
                Some(user.id),
                format!("Novo usuário criado: {} ({})", user.email, user.role),
            )
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}
