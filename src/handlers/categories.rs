// src/handlers/categories.rs

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
    models::catalog::{Category, CategoryPayload},
};

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "Catálogo",
    params(PaginationQuery),
    responses((status = 200, description = "Página de categorias", body = Paginated<Category>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = app_state
        .catalog_service
        .list_categories(query.keyword.as_deref(), query.status, query.page, query.page_size)
        .await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/all",
    tag = "Catálogo",
    responses((status = 200, description = "Todas as categorias ativas", body = Vec<Category>)),
    security(("api_jwt" = []))
)]
pub async fn all_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.catalog_service.all_categories().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    tag = "Catálogo",
    request_body = CategoryPayload,
    responses((status = 201, description = "Categoria criada", body = Category)),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let category = app_state.catalog_service.create_category(&payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    tag = "Catálogo",
    params(("id" = i64, Path, description = "ID da categoria")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let category = app_state.catalog_service.update_category(id, &payload).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    tag = "Catálogo",
    params(("id" = i64, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Categoria excluída"),
        (status = 409, description = "Categoria com produtos vinculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
