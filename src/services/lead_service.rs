// src/services/lead_service.rs

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    common::{error::AppError, pagination::Pagination},
    db::LeadRepository,
    models::{
        auth::User,
        lead::{CreateLeadPayload, Lead, LeadPatch},
    },
    services::{access_policy, notifier::LeadNotifier},
};

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    pool: SqlitePool,
    notifier: Arc<dyn LeadNotifier>,
}

impl LeadService {
    pub fn new(repo: LeadRepository, pool: SqlitePool, notifier: Arc<dyn LeadNotifier>) -> Self {
        Self { repo, pool, notifier }
    }

    /// Entrada pública. O aviso roda depois do commit e nunca derruba a criação.
    pub async fn create(&self, input: &CreateLeadPayload) -> Result<Lead, AppError> {
        let lead = self.repo.create(&self.pool, input).await?;
        tracing::info!(lead_id = lead.id, "lead criado");

        if let Err(e) = self.notifier.notify_new_lead(&lead).await {
            tracing::warn!(lead_id = lead.id, error = %e, "falha ao enviar aviso de novo lead");
        }

        Ok(lead)
    }

    pub async fn list(&self, caller: &User, pagination: Pagination) -> Result<Vec<Lead>, AppError> {
        let (skip, limit) = pagination.window()?;
        let scope = access_policy::scope_lead_query(caller.role, caller.id);
        self.repo.list(&self.pool, scope, skip, limit).await
    }

    /// Atribuição de corretor é checada antes da busca, como no delete de imóvel.
    pub async fn update(&self, caller: &User, id: i64, patch: LeadPatch) -> Result<Lead, AppError> {
        if patch.assigns_owner() {
            access_policy::ensure(
                access_policy::can_assign_lead(caller.role),
                "Apenas administradores podem atribuir leads",
            )?;
        }

        let mut tx = self.pool.begin().await?;

        let mut lead = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lead".to_string()))?;

        if patch.is_empty() {
            tx.commit().await?;
            return Ok(lead);
        }

        patch.apply_to(&mut lead);
        let updated = self.repo.update(&mut *tx, &lead).await?;

        tx.commit().await?;
        Ok(updated)
    }
}
