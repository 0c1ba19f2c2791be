// src/db/lead_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::{
    common::error::AppError,
    models::lead::{CreateLeadPayload, Lead, DEFAULT_LEAD_STATUS},
    services::access_policy::LeadScope,
};

const LEAD_COLUMNS: &str = "id, nome, whatsapp, email, origem, status, usuario_id, anotacoes, created_at, updated_at";

#[derive(Clone, Default)]
pub struct LeadRepository;

impl LeadRepository {
    pub fn new() -> Self {
        Self
    }

    /// Entrada pública: o lead nasce sem corretor.
    pub async fn create<'e, E>(&self, executor: E, input: &CreateLeadPayload) -> Result<Lead, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let now = Utc::now();
        let lead = sqlx::query_as::<_, Lead>(&format!(
            r#"
            INSERT INTO leads (nome, whatsapp, email, origem, status, usuario_id, anotacoes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, NULL, ?, ?, ?)
            RETURNING {LEAD_COLUMNS}
            "#
        ))
        .bind(&input.nome)
        .bind(&input.whatsapp)
        .bind(&input.email)
        .bind(&input.origem)
        .bind(DEFAULT_LEAD_STATUS)
        .bind(&input.anotacoes)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(lead)
    }

    /// Lista já restrita ao escopo do chamador, mais recentes primeiro.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        scope: LeadScope,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Lead>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let leads = match scope {
            LeadScope::All => {
                sqlx::query_as::<_, Lead>(&format!(
                    "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
                ))
                .bind(limit)
                .bind(skip)
                .fetch_all(executor)
                .await?
            }
            LeadScope::Owner(owner_id) => {
                sqlx::query_as::<_, Lead>(&format!(
                    "SELECT {LEAD_COLUMNS} FROM leads WHERE usuario_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
                ))
                .bind(owner_id)
                .bind(limit)
                .bind(skip)
                .fetch_all(executor)
                .await?
            }
        };
        Ok(leads)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Lead>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let lead = sqlx::query_as::<_, Lead>(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?"))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(lead)
    }

    // Grava os campos mutáveis do lead já mesclado
    pub async fn update<'e, E>(&self, executor: E, lead: &Lead) -> Result<Lead, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let updated = sqlx::query_as::<_, Lead>(&format!(
            r#"
            UPDATE leads
            SET status = ?, anotacoes = ?, usuario_id = ?, updated_at = ?
            WHERE id = ?
            RETURNING {LEAD_COLUMNS}
            "#
        ))
        .bind(&lead.status)
        .bind(&lead.anotacoes)
        .bind(lead.usuario_id)
        .bind(Utc::now())
        .bind(lead.id)
        .fetch_one(executor)
        .await?;
        Ok(updated)
    }
}
