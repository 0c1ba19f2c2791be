// src/db/analytics_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};

use crate::{common::error::AppError, models::analytics::TopProperty};

// Consultas somente leitura usadas pelo dashboard e pela analítica
#[derive(Clone, Default)]
pub struct AnalyticsRepository;

impl AnalyticsRepository {
    pub fn new() -> Self {
        Self
    }

    /// Visualizações em `[start, end)`.
    pub async fn count_view_events_between<'e, E>(
        &self,
        executor: E,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM property_analytics WHERE timestamp >= ? AND timestamp < ?",
        )
        .bind(start)
        .bind(end)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }

    // Empates ficam na ordem de armazenamento (id)
    pub async fn top_viewed<'e, E>(&self, executor: E, limit: i64) -> Result<Vec<TopProperty>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let top = sqlx::query_as::<_, TopProperty>(
            r#"
            SELECT
                CASE WHEN titulo IS NULL OR titulo = '' THEN 'Sem Título' ELSE titulo END AS titulo,
                views_count AS views
            FROM properties
            ORDER BY views_count DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;
        Ok(top)
    }

    pub async fn count_leads<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    pub async fn count_leads_since<'e, E>(&self, executor: E, since: DateTime<Utc>) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leads WHERE created_at >= ?")
            .bind(since)
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    pub async fn count_view_events<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM property_analytics")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    pub async fn count_properties_with_status<'e, E>(&self, executor: E, status: &str) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties WHERE status = ?")
            .bind(status)
            .fetch_one(executor)
            .await?;
        Ok(total)
    }

    pub async fn sum_views<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(views_count), 0) FROM properties")
            .fetch_one(executor)
            .await?;
        Ok(total)
    }
}
