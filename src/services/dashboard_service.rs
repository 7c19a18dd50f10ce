// src/services/dashboard_service.rs

use chrono::{Duration, Local};
use std::collections::HashMap;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::{
        dashboard::{ChartData, DailyMovement, DashboardStats},
        inventory::StockMovementKind,
        product::Product,
    },
};

const CHART_WINDOW_DAYS: i64 = 30;
const TOP_PRODUCTS: i64 = 10;
const DEFAULT_LOW_STOCK_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        self.dashboard_repo.stats().await
    }

    pub async fn chart_data(&self) -> Result<ChartData, AppError> {
        let today = Local::now().date_naive();
        let since = today - Duration::days(CHART_WINDOW_DAYS - 1);

        // O banco devolve só os dias com movimento; a janela completa
        // (sempre 30 entradas, do mais antigo para o mais recente, com
        // zeros nos dias parados) é montada aqui.
        let rows = self.dashboard_repo.daily_movements(since).await?;
        let mut by_day: HashMap<String, (i64, i64)> = HashMap::new();
        for row in rows {
            let entry = by_day.entry(row.day).or_default();
            match row.kind {
                StockMovementKind::StockIn => entry.0 += row.total,
                StockMovementKind::StockOut => entry.1 += row.total,
                // Ajustes não entram no gráfico de entrada/saída.
                StockMovementKind::Adjust => {}
            }
        }

        let mut stock_movement = Vec::with_capacity(CHART_WINDOW_DAYS as usize);
        for i in 0..CHART_WINDOW_DAYS {
            let date = (since + Duration::days(i)).to_string();
            let (stock_in, stock_out) = by_day.get(&date).copied().unwrap_or((0, 0));
            stock_movement.push(DailyMovement { date, stock_in, stock_out });
        }

        let top_products = self.dashboard_repo.top_products_by_value(TOP_PRODUCTS).await?;
        let category_stats = self.dashboard_repo.category_stats().await?;

        Ok(ChartData { stock_movement, top_products, category_stats })
    }

    pub async fn low_stock_products(&self, limit: Option<i64>) -> Result<Vec<Product>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LOW_STOCK_LIMIT).clamp(1, 100);
        self.dashboard_repo.low_stock_products(limit).await
    }
}
