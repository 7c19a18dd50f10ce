// src/models.rs

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod inventory;
pub mod product;

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

// Metadados comuns de linha, embutidos por composição em cada entidade
// (id + timestamps). A coluna deleted_at não entra aqui de propósito:
// ela nunca é serializada e só interessa às queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    pub id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
