// src/handlers/products.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Paginated},
    config::AppState,
    middleware::auth::AdminUser,
    models::product::{Product, ProductPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub keyword: Option<String>,
    pub status: Option<i64>,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "Produtos",
    params(ProductListQuery),
    responses((status = 200, description = "Página de produtos", body = Paginated<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .product_service
        .list_products(
            query.keyword.as_deref(),
            query.status,
            query.category_id,
            query.supplier_id,
            query.page,
            query.page_size,
        )
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    tag = "Produtos",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Detalhe do produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.get_product(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    tag = "Produtos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado (estoque inicia em 0)", body = Product),
        (status = 409, description = "SKU já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state.product_service.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    tag = "Produtos",
    params(("id" = i64, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado (estoque intacto)", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let product = app_state.product_service.update_product(id, &payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    tag = "Produtos",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
