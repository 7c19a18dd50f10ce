// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        dashboard::{ChartData, DashboardStats},
        product::Product,
    },
};

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses((status = 200, description = "Resumo geral do estoque", body = DashboardStats)),
    security(("api_jwt" = []))
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.dashboard_service.stats().await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/charts",
    tag = "Dashboard",
    responses((status = 200, description = "Dados dos gráficos (janela de 30 dias)", body = ChartData)),
    security(("api_jwt" = []))
)]
pub async fn get_charts(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let charts = app_state.dashboard_service.chart_data().await?;
    Ok(Json(charts))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockQuery {
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/low-stock",
    tag = "Dashboard",
    params(LowStockQuery),
    responses((status = 200, description = "Produtos no alerta de estoque baixo", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn low_stock(
    State(app_state): State<AppState>,
    Query(query): Query<LowStockQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.dashboard_service.low_stock_products(query.limit).await?;
    Ok(Json(products))
}
