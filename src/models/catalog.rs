// src/models/catalog.rs
//
// Dados de referência do catálogo: categorias e fornecedores.
// Ambos têm ciclo de vida simples (criar/atualizar/soft-delete) e a
// exclusão é barrada enquanto houver produtos dependentes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::EntityMeta;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: EntityMeta,

    pub name: String,
    pub description: String,
    pub sort_order: i64,
    pub status: i64, // 1 = ativo, 0 = desativado

    // Preenchido apenas nas listagens (subquery); não existe como coluna.
    #[sqlx(default)]
    pub product_count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: EntityMeta,

    pub code: String,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: i64,
    pub remark: String,

    #[sqlx(default)]
    pub product_count: i64,
}

// O mesmo payload serve para criar e atualizar.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 100, message = "O nome da categoria é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sort_order: i64,
    pub status: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(min = 1, max = 50, message = "O código do fornecedor é obrigatório."))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "O nome do fornecedor é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub status: Option<i64>,
    #[serde(default)]
    pub remark: String,
}
