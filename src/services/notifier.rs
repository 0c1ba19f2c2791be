// src/services/notifier.rs

use async_trait::async_trait;

use crate::models::lead::Lead;

/// Aviso de novo lead. Falhas são engolidas por quem chama.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    async fn notify_new_lead(&self, lead: &Lead) -> anyhow::Result<()>;
}

/// Implementação padrão: apenas um evento de log estruturado.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl LeadNotifier for LogNotifier {
    async fn notify_new_lead(&self, lead: &Lead) -> anyhow::Result<()> {
        tracing::info!(
            lead_id = lead.id,
            nome = lead.nome.as_str(),
            whatsapp = lead.whatsapp.as_str(),
            origem = ?lead.origem,
            "ALERTA: novo lead"
        );
        Ok(())
    }
}
