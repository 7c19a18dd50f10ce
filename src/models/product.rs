// src/models/product.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::EntityMeta;

// Produto do catálogo. O campo current_stock é escrito EXCLUSIVAMENTE
// pelo motor de estoque (InventoryService); criação e atualização de
// produto nunca tocam nele.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub meta: EntityMeta,

    pub sku: String,
    pub name: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub unit: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub current_stock: i64,
    pub min_stock: i64, // alerta de estoque baixo quando current_stock <= min_stock (e min_stock > 0)
    pub max_stock: i64, // teto apenas informativo, nunca validado na entrada
    pub barcode: String,
    pub location: String,
    pub image_url: String,
    pub status: i64,

    // Nomes das referências, preenchidos nas consultas com JOIN.
    #[sqlx(default)]
    pub category_name: Option<String>,
    #[sqlx(default)]
    pub supplier_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 50, message = "O SKU é obrigatório."))]
    pub sku: String,
    #[validate(length(min = 1, max = 200, message = "O nome do produto é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub unit: String,
    #[validate(range(min = 0.0, message = "O preço de custo não pode ser negativo."))]
    #[serde(default)]
    pub cost_price: f64,
    #[validate(range(min = 0.0, message = "O preço de venda não pode ser negativo."))]
    #[serde(default)]
    pub selling_price: f64,
    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default)]
    pub min_stock: i64,
    #[validate(range(min = 0, message = "O estoque máximo não pode ser negativo."))]
    #[serde(default)]
    pub max_stock: i64,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    pub status: Option<i64>,
}
