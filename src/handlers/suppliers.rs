// src/handlers/suppliers.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        pagination::{Paginated, PaginationQuery},
    },
    config::AppState,
    middleware::auth::AdminUser,
    models::catalog::{Supplier, SupplierPayload},
};

#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    tag = "Catálogo",
    params(PaginationQuery),
    responses((status = 200, description = "Página de fornecedores", body = Paginated<Supplier>)),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .catalog_service
        .list_suppliers(query.keyword.as_deref(), query.status, query.page, query.page_size)
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/suppliers/all",
    tag = "Catálogo",
    responses((status = 200, description = "Todos os fornecedores ativos", body = Vec<Supplier>)),
    security(("api_jwt" = []))
)]
pub async fn all_suppliers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.catalog_service.all_suppliers().await?;
    Ok(Json(suppliers))
}

#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    tag = "Catálogo",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor criado", body = Supplier),
        (status = 409, description = "Código já em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let supplier = app_state.catalog_service.create_supplier(&payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    tag = "Catálogo",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let supplier = app_state.catalog_service.update_supplier(id, &payload).await?;
    Ok(Json(supplier))
}

#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    tag = "Catálogo",
    params(("id" = i64, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor excluído"),
        (status = 409, description = "Fornecedor com produtos vinculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_supplier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
