// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

// Linha imutável da trilha de auditoria
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct AuditLog {
    pub id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub acao: String,
    pub recurso_tipo: String,
    pub recurso_id: Option<i64>,
    pub detalhes: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CreateProperty,
    UpdatePrice,
    UpdateProperty,
    DeleteProperty,
    CreateUser,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::CreateProperty => "CREATE_PROPERTY",
            AuditAction::UpdatePrice => "UPDATE_PRICE",
            AuditAction::UpdateProperty => "UPDATE_PROPERTY",
            AuditAction::DeleteProperty => "DELETE_PROPERTY",
            AuditAction::CreateUser => "CREATE_USER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Property,
    User,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Property => "PROPERTY",
            ResourceType::User => "USER",
        }
    }
}

/// Entrada a ser gravada; o ator vem da sessão.
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub action: AuditAction,
    pub resource_type: ResourceType,
    pub resource_id: Option<i64>,
    pub details: String,
}
