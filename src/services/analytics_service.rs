// src/services/analytics_service.rs

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::AnalyticsRepository,
    models::{
        analytics::{AnalyticsReport, DailyViews, DashboardStats, TopProperty},
        property::STATUS_ATIVO,
    },
};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_TOP_LIMIT: i64 = 5;

/// Meia-noite local de `date`, em UTC. Em dia com lacuna de horário de
/// verão cai para a interpretação UTC.
pub fn local_midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Os últimos `window_days` dias locais (hoje incluso), do mais antigo para
/// o mais recente.
pub fn window_days_ending(today: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
    (0..i64::from(window_days))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

pub fn day_label(day: NaiveDate) -> String {
    day.format("%d/%m").to_string()
}

/// `leads / views * 100` com duas casas; zero quando não há visualizações.
pub fn conversion_rate(total_leads: i64, total_views: i64) -> f64 {
    if total_views <= 0 {
        return 0.0;
    }
    let rate = total_leads as f64 / total_views as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
    pool: SqlitePool,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository, pool: SqlitePool) -> Self {
        Self { repo, pool }
    }

    pub async fn daily_view_histogram(&self, window_days: u32) -> Result<Vec<DailyViews>, AppError> {
        let today = Local::now().date_naive();
        let days = window_days_ending(today, window_days.max(1));

        // Um COUNT por dia local; nenhum timestamp sobe para a memória
        let mut conn = self.pool.acquire().await?;
        let mut chart = Vec::with_capacity(days.len());
        for day in days {
            let start = local_midnight_utc(day);
            let end = local_midnight_utc(day + Duration::days(1));
            let views = self
                .repo
                .count_view_events_between(&mut *conn, start, end)
                .await?;
            chart.push(DailyViews {
                date: day_label(day),
                views,
            });
        }

        Ok(chart)
    }

    pub async fn top_viewed_properties(&self, limit: i64) -> Result<Vec<TopProperty>, AppError> {
        self.repo.top_viewed(&self.pool, limit).await
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardStats, AppError> {
        let today = Local::now().date_naive();
        let today_start = local_midnight_utc(today);
        let week_start = local_midnight_utc(today - Duration::days(7));

        // Snapshot consistente dos contadores
        let mut tx = self.pool.begin().await?;
        let leads_today = self.repo.count_leads_since(&mut *tx, today_start).await?;
        let leads_week = self.repo.count_leads_since(&mut *tx, week_start).await?;
        let active_properties = self
            .repo
            .count_properties_with_status(&mut *tx, STATUS_ATIVO)
            .await?;
        let total_views = self.repo.sum_views(&mut *tx).await?;
        tx.commit().await?;

        Ok(DashboardStats {
            leads_today,
            leads_week,
            active_properties,
            total_views,
        })
    }

    pub async fn report(&self) -> Result<AnalyticsReport, AppError> {
        let views_chart = self.daily_view_histogram(DEFAULT_WINDOW_DAYS).await?;
        let top_properties = self.top_viewed_properties(DEFAULT_TOP_LIMIT).await?;

        let total_leads = self.repo.count_leads(&self.pool).await?;
        let total_views = self.repo.count_view_events(&self.pool).await?;

        Ok(AnalyticsReport {
            views_chart,
            top_properties,
            conversion_rate: conversion_rate(total_leads, total_views),
            total_leads,
            total_views,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn conversion_rate_is_zero_without_views() {
        assert_eq!(conversion_rate(10, 0), 0.0);
    }

    #[test]
    fn conversion_rate_rounds_to_two_places() {
        assert_eq!(conversion_rate(3, 40), 7.5);
        assert_eq!(conversion_rate(1, 3), 33.33);
        assert_eq!(conversion_rate(2, 3), 66.67);
    }

    #[test]
    fn window_is_chronological_and_includes_today() {
        let days = window_days_ending(date(2024, 3, 5), 7);

        assert_eq!(days.len(), 7);
        assert_eq!(days.first().copied(), Some(date(2024, 2, 28)));
        assert_eq!(days.last().copied(), Some(date(2024, 3, 5)));
        assert!(days.windows(2).all(|w| w[1] - w[0] == Duration::days(1)));
    }

    #[test]
    fn labels_are_day_then_month() {
        assert_eq!(day_label(date(2024, 2, 29)), "29/02");
        assert_eq!(day_label(date(2024, 12, 1)), "01/12");
    }

    #[test]
    fn local_midnight_round_trips_to_local_date() {
        let day = date(2024, 7, 15);
        let midnight = local_midnight_utc(day);
        assert_eq!(midnight.with_timezone(&Local).date_naive(), day);
    }
}
