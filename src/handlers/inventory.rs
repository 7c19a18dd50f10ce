// src/handlers/inventory.rs
//
// Entradas HTTP do motor de estoque. A identidade do operador vem do
// token (camada de autenticação), nunca do corpo da requisição.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Paginated},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::{
        MovementFilter, StockAdjustPayload, StockInPayload, StockMovement, StockMovementKind,
        StockOutPayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/v1/inventory/stock-in",
    tag = "Estoque",
    request_body = StockInPayload,
    responses(
        (status = 201, description = "Entrada registrada", body = StockMovement),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_in(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StockInPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let movement = app_state.inventory_service.stock_in(&payload, &user.0).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/stock-out",
    tag = "Estoque",
    request_body = StockOutPayload,
    responses(
        (status = 201, description = "Saída registrada", body = StockMovement),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Estoque insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_out(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StockOutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let movement = app_state.inventory_service.stock_out(&payload, &user.0).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/adjust",
    tag = "Estoque",
    request_body = StockAdjustPayload,
    responses(
        (status = 201, description = "Ajuste registrado (inclusive delta zero)", body = StockMovement),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn stock_adjust(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<StockAdjustPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let movement = app_state.inventory_service.stock_adjust(&payload, &user.0).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MovementListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub product_id: Option<i64>,
    pub kind: Option<StockMovementKind>,
    // Inclusivas nas duas pontas, granularidade de dia.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    // Busca livre sobre número de referência e observações.
    pub keyword: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/records",
    tag = "Estoque",
    params(MovementListQuery),
    responses((status = 200, description = "Página do livro-razão, mais recentes primeiro", body = Paginated<StockMovement>)),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    Query(query): Query<MovementListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = MovementFilter {
        product_id: query.product_id,
        kind: query.kind,
        start_date: query.start_date,
        end_date: query.end_date,
        keyword: query.keyword,
    };
    let page = app_state
        .inventory_service
        .list_movements(&filter, query.page, query.page_size)
        .await?;
    Ok(Json(page))
}
