// src/db/user_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

// Repositório de usuários, responsável pela tabela 'usuarios'
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(
            "SELECT id, email, senha_hash, role, created_at FROM usuarios WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    pub async fn list_all<'e, E>(&self, executor: E) -> Result<Vec<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, senha_hash, role, created_at FROM usuarios ORDER BY id ASC",
        )
        .fetch_all(executor)
        .await?;
        Ok(users)
    }

    // Cria um usuário, convertendo violação de unicidade em erro de domínio
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        email: &str,
        senha_hash: &str,
        role: Role,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuarios (email, senha_hash, role, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, senha_hash, role, created_at
            "#,
        )
        .bind(email)
        .bind(senha_hash)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }
}
