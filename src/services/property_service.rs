// src/services/property_service.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::{error::AppError, pagination::Pagination},
    db::PropertyRepository,
    models::{
        audit::{AuditAction, ResourceType},
        auth::User,
        property::{CreatePropertyPayload, Property, PropertyPatch},
    },
    services::{access_policy, audit_service::AuditService},
};

/// Decide a entrada de auditoria de um PATCH: `UPDATE_PRICE` quando o preço
/// veio no payload e mudou, `UPDATE_PROPERTY` caso contrário.
pub fn update_audit_entry(current: &Property, patch: &PropertyPatch) -> (AuditAction, String) {
    match patch.price_change(current.preco.as_deref()) {
        Some((old, new)) => (
            AuditAction::UpdatePrice,
            format!(
                "Preço alterado de {} para {}",
                old.unwrap_or("(vazio)"),
                new.unwrap_or("(vazio)")
            ),
        ),
        None => {
            let titulo = patch.titulo.as_deref().unwrap_or(&current.titulo);
            (
                AuditAction::UpdateProperty,
                format!("Imóvel '{titulo}' atualizado"),
            )
        }
    }
}

#[derive(Clone)]
pub struct PropertyService {
    repo: PropertyRepository,
    audit: AuditService,
    pool: SqlitePool,
}

impl PropertyService {
    pub fn new(repo: PropertyRepository, audit: AuditService, pool: SqlitePool) -> Self {
        Self { repo, audit, pool }
    }

    pub async fn create(&self, actor: &User, input: &CreatePropertyPayload) -> Result<Property, AppError> {
        let mut tx = self.pool.begin().await?;

        let id = self.repo.insert(&mut tx, input).await?;
        self.repo.insert_images(&mut tx, id, &input.images).await?;

        self.audit
            .record(
                &mut *tx,
                actor,
                AuditAction::CreateProperty,
                ResourceType::Property,
                Some(id),
                format!("Imóvel '{}' criado", input.titulo),
            )
            .await?;

        let property = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imóvel".to_string()))?;

        tx.commit().await?;
        Ok(property)
    }

    /// Leitura com efeito colateral: incrementa o contador e grava o evento
    /// de visualização na mesma transação.
    pub async fn get(&self, id: i64) -> Result<Property, AppError> {
        let mut tx = self.pool.begin().await?;

        let affected = self.repo.increment_views(&mut *tx, id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Imóvel".to_string()));
        }
        self.repo.record_view(&mut *tx, id, Utc::now()).await?;

        let property = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imóvel".to_string()))?;

        tx.commit().await?;
        Ok(property)
    }

    pub async fn update(&self, actor: &User, id: i64, patch: PropertyPatch) -> Result<Property, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut property = self
            .repo
            .find_row(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imóvel".to_string()))?;

        let (action, details) = update_audit_entry(&property, &patch);

        if let Some(images) = patch.apply_to(&mut property) {
            // Substituição total da galeria, nunca mesclagem
            self.repo.delete_images(&mut *tx, id).await?;
            self.repo.insert_images(&mut tx, id, &images).await?;
        }
        self.repo.update(&mut *tx, &property).await?;

        self.audit
            .record(&mut *tx, actor, action, ResourceType::Property, Some(id), details)
            .await?;

        let property = self
            .repo
            .find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imóvel".to_string()))?;

        tx.commit().await?;
        Ok(property)
    }

    /// O papel é checado antes de qualquer busca: um vendedor recebe
    /// `Forbidden` mesmo para um id inexistente.
    pub async fn delete(&self, actor: &User, id: i64) -> Result<(), AppError> {
        access_policy::ensure(
            access_policy::can_delete_property(actor.role),
            "Apenas administradores podem excluir imóveis",
        )?;

        let mut tx = self.pool.begin().await?;

        let property = self
            .repo
            .find_row(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imóvel".to_string()))?;

        self.audit
            .record(
                &mut *tx,
                actor,
                AuditAction::DeleteProperty,
                ResourceType::Property,
                Some(id),
                format!("Imóvel '{}' excluído", property.titulo),
            )
            .await?;

        self.repo.delete(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn search(&self, query: Option<&str>, pagination: Pagination) -> Result<Vec<Property>, AppError> {
        let (skip, limit) = pagination.window()?;
        let mut conn = self.pool.acquire().await?;
        self.repo.search(&mut conn, query, skip, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::STATUS_ATIVO;

    fn property(preco: Option<&str>) -> Property {
        let now = Utc::now();
        Property {
            id: 9,
            titulo: "Apartamento Centro".into(),
            descricao: None,
            preco: preco.map(str::to_string),
            condominio: None,
            iptu: None,
            localizacao: None,
            tipo: None,
            quartos: 0,
            banheiros: 0,
            vagas: 0,
            area: None,
            status: STATUS_ATIVO.into(),
            video_url: None,
            main_image_url: None,
            thumb_image_url: None,
            is_destaque: 0,
            views_count: 0,
            created_at: now,
            updated_at: now,
            images: vec![],
        }
    }

    #[test]
    fn price_change_is_audited_with_both_values() {
        let patch: PropertyPatch = serde_json::from_str(r#"{"preco": "1200"}"#).unwrap();
        let (action, details) = update_audit_entry(&property(Some("1000")), &patch);
        assert_eq!(action, AuditAction::UpdatePrice);
        assert!(details.contains("1000"));
        assert!(details.contains("1200"));
    }

    #[test]
    fn unchanged_price_falls_back_to_generic_update() {
        let patch: PropertyPatch =
            serde_json::from_str(r#"{"preco": "1000", "descricao": "Nova"}"#).unwrap();
        let (action, details) = update_audit_entry(&property(Some("1000")), &patch);
        assert_eq!(action, AuditAction::UpdateProperty);
        assert_eq!(details, "Imóvel 'Apartamento Centro' atualizado");
    }

    #[test]
    fn generic_update_uses_new_title() {
        let patch: PropertyPatch = serde_json::from_str(r#"{"titulo": "Cobertura"}"#).unwrap();
        let (action, details) = update_audit_entry(&property(None), &patch);
        assert_eq!(action, AuditAction::UpdateProperty);
        assert_eq!(details, "Imóvel 'Cobertura' atualizado");
    }

    #[test]
    fn first_price_is_a_price_change() {
        let patch: PropertyPatch = serde_json::from_str(r#"{"preco": "850000"}"#).unwrap();
        let (action, details) = update_audit_entry(&property(None), &patch);
        assert_eq!(action, AuditAction::UpdatePrice);
        assert_eq!(details, "Preço alterado de (vazio) para 850000");
    }
}
