// src/models/inventory.rs
//
// O livro-razão de estoque: cada mutação bem-sucedida gera exatamente
// um StockMovement, imutável, com as quantidades antes/depois.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Os três tipos de mutação suportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StockMovementKind {
    StockIn,  // entrada (compra/recebimento)
    StockOut, // saída (venda/perda)
    Adjust,   // correção para um valor alvo
}

// Registro imutável de uma mudança de quantidade. Nunca sofre UPDATE
// nem DELETE; correções viram um novo movimento de ajuste.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: i64,
    pub product_id: i64,
    pub kind: StockMovementKind,
    // Magnitude da mudança, sempre >= 0. A direção está implícita no
    // par before/after, não no sinal.
    pub quantity: i64,
    pub before_qty: i64,
    pub after_qty: i64,
    pub unit_cost: f64,  // só faz sentido em entradas; 0 nos demais
    pub total_cost: f64, // quantity * unit_cost (entradas)
    pub reference_no: String,
    pub notes: String,
    // Identidade do operador capturada no momento da escrita,
    // não é uma referência viva ao usuário.
    pub operator_id: i64,
    pub operator_name: String,
    pub created_at: NaiveDateTime,

    #[sqlx(default)]
    pub product_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockInPayload {
    pub product_id: i64,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i64,
    #[validate(range(min = 0.0, message = "O custo unitário não pode ser negativo."))]
    #[serde(default)]
    pub unit_cost: f64,
    #[serde(default)]
    pub reference_no: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockOutPayload {
    pub product_id: i64,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i64,
    #[serde(default)]
    pub reference_no: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustPayload {
    pub product_id: i64,
    #[validate(range(min = 0, message = "A nova quantidade não pode ser negativa."))]
    pub new_quantity: i64,
    #[serde(default)]
    pub notes: String,
}

// Filtros da consulta ao livro-razão. Datas são inclusivas nas duas
// pontas, com granularidade de dia (calendário local).
#[derive(Debug, Default, Clone)]
pub struct MovementFilter {
    pub product_id: Option<i64>,
    pub kind: Option<StockMovementKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub keyword: Option<String>,
}
