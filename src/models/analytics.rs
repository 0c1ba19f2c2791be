// src/models/analytics.rs

use serde::Serialize;
use utoipa::ToSchema;

// Cards do topo do dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub leads_today: i64,
    pub leads_week: i64,
    pub active_properties: i64,
    pub total_views: i64,
}

// Um ponto do gráfico de visualizações por dia
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyViews {
    pub date: String, // "dd/mm"
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct TopProperty {
    pub titulo: String,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyticsReport {
    pub views_chart: Vec<DailyViews>,
    pub top_properties: Vec<TopProperty>,
    pub conversion_rate: f64,
    pub total_leads: i64,
    pub total_views: i64,
}
