// src/common/pagination.rs
//
// Paginação padrão das listagens: page começa em 1, pageSize padrão 20
// com teto de 100. O envelope carrega o total para o frontend montar
// a navegação.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

pub fn clamp_page(page: Option<i64>) -> i64 {
    match page {
        Some(p) if p >= 1 => p,
        _ => 1,
    }
}

pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    match page_size {
        Some(s) if s >= 1 && s <= MAX_PAGE_SIZE => s,
        Some(s) if s > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
        _ => DEFAULT_PAGE_SIZE,
    }
}

pub fn offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}

// Parâmetros de query compartilhados pelas listagens simples.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub keyword: Option<String>,
    pub status: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };
        Self { items, total, page, page_size, total_pages }
    }
}
