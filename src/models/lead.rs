// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::{double_option, merge};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Lead {
    pub id: i64,
    pub nome: String,
    pub whatsapp: String,
    pub email: Option<String>,
    pub origem: Option<String>,
    pub status: String,
    pub usuario_id: Option<i64>, // corretor responsável
    pub anotacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_LEAD_STATUS: &str = "NOVO";

// Formulário público do site
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, max = 100, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, max = 20, message = "O WhatsApp é obrigatório."))]
    pub whatsapp: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub origem: Option<String>,
    pub anotacoes: Option<String>,
}

/// PATCH de lead. Só os campos presentes no JSON são aplicados.
///
/// `status` não aceita vazio; `anotacoes` e `usuario_id` aceitam `null`
/// para limpar o valor. Trocar o corretor responsável é exclusivo de admin.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LeadPatch {
    #[validate(length(min = 1, max = 20, message = "O status não pode ser vazio."))]
    pub status: Option<String>,

    #[schema(value_type = Option<String>)]
    #[serde(default, deserialize_with = "double_option")]
    pub anotacoes: Option<Option<String>>,

    #[schema(value_type = Option<i64>)]
    #[serde(default, deserialize_with = "double_option")]
    pub usuario_id: Option<Option<i64>>,
}

impl LeadPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.anotacoes.is_none() && self.usuario_id.is_none()
    }

    pub fn assigns_owner(&self) -> bool {
        self.usuario_id.is_some()
    }

    pub fn apply_to(self, lead: &mut Lead) {
        merge(&mut lead.status, self.status);
        merge(&mut lead.anotacoes, self.anotacoes);
        merge(&mut lead.usuario_id, self.usuario_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> Lead {
        let now = Utc::now();
        Lead {
            id: 1,
            nome: "Maria".into(),
            whatsapp: "64999990000".into(),
            email: None,
            origem: Some("site".into()),
            status: DEFAULT_LEAD_STATUS.into(),
            usuario_id: Some(7),
            anotacoes: Some("ligar à tarde".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn absent_fields_are_left_untouched() {
        let mut l = lead();
        let patch: LeadPatch = serde_json::from_str(r#"{"status": "CONTATADO"}"#).unwrap();
        patch.apply_to(&mut l);
        assert_eq!(l.status, "CONTATADO");
        assert_eq!(l.anotacoes.as_deref(), Some("ligar à tarde"));
        assert_eq!(l.usuario_id, Some(7));
    }

    #[test]
    fn explicit_empty_notes_are_applied() {
        let mut l = lead();
        let patch: LeadPatch = serde_json::from_str(r#"{"anotacoes": ""}"#).unwrap();
        patch.apply_to(&mut l);
        assert_eq!(l.anotacoes.as_deref(), Some(""));
    }

    #[test]
    fn null_clears_owner() {
        let mut l = lead();
        let patch: LeadPatch = serde_json::from_str(r#"{"usuario_id": null}"#).unwrap();
        patch.apply_to(&mut l);
        assert_eq!(l.usuario_id, None);
    }

    #[test]
    fn owner_field_marks_assignment_even_when_null() {
        let status_only: LeadPatch = serde_json::from_str(r#"{"status": "VISITA"}"#).unwrap();
        let unassign: LeadPatch = serde_json::from_str(r#"{"usuario_id": null}"#).unwrap();
        assert!(!status_only.assigns_owner());
        assert!(unassign.assigns_owner());
    }

    #[test]
    fn empty_status_fails_validation() {
        let patch: LeadPatch = serde_json::from_str(r#"{"status": ""}"#).unwrap();
        assert!(patch.validate().is_err());
    }
}
