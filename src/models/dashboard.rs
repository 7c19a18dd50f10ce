// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// Resumo geral do painel.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_categories: i64,
    pub total_suppliers: i64,
    // Soma de current_stock * cost_price dos produtos ativos.
    pub total_stock_value: f64,
    pub low_stock_count: i64,
    pub today_stock_in: i64,
    pub today_stock_out: i64,
    pub today_records: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    // Janela fixa de 30 dias (hoje + 29 anteriores), do mais antigo
    // para o mais recente, com dias sem movimento zerados.
    pub stock_movement: Vec<DailyMovement>,
    pub top_products: Vec<ProductRank>,
    pub category_stats: Vec<CategoryStat>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyMovement {
    pub date: String, // "AAAA-MM-DD"
    pub stock_in: i64,
    pub stock_out: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRank {
    pub name: String,
    pub value: f64, // current_stock * cost_price
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub name: String,
    pub count: i64,
}
