// src/services/access_policy.rs

//! Regras de acesso por papel. Funções puras: nenhuma consulta ao banco.
//!
//! Ações exclusivas de admin: excluir imóvel, gerir usuários, atribuir
//! leads a corretores e ver auditoria. O resto exige só uma sessão válida.

use crate::{common::error::AppError, models::auth::Role};

/// Como a listagem de leads deve ser restringida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadScope {
    All,
    Owner(i64),
}

pub fn scope_lead_query(role: Role, self_id: i64) -> LeadScope {
    match role {
        Role::Admin => LeadScope::All,
        Role::Vendedor => LeadScope::Owner(self_id),
    }
}

pub fn can_delete_property(role: Role) -> bool {
    role == Role::Admin
}

pub fn can_manage_users(role: Role) -> bool {
    role == Role::Admin
}

pub fn can_assign_lead(role: Role) -> bool {
    role == Role::Admin
}

pub fn can_view_audit_log(role: Role) -> bool {
    role == Role::Admin
}

pub fn ensure(allowed: bool, message: &str) -> Result<(), AppError> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}
