// src/db/dashboard_repo.rs
//
// Camada de agregação: só leituras, nenhuma mutação. Os números são um
// snapshot pontual; não precisam ser consistentes com mutações em voo.

use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{CategoryStat, DashboardStats, ProductRank},
        inventory::StockMovementKind,
        product::Product,
    },
};

// Linha agregada por dia/tipo, usada pelo serviço para montar a janela
// de 30 dias (os dias sem movimento são zerados lá).
#[derive(Debug, sqlx::FromRow)]
pub struct DailyMovementRow {
    pub day: String,
    pub kind: StockMovementKind,
    pub total: i64,
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let today = Local::now().date_naive();

        let total_products: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE status = 1 AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_categories: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM categories WHERE status = 1 AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_suppliers: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM suppliers WHERE status = 1 AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let total_stock_value: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(current_stock * cost_price), 0.0) FROM products \
             WHERE status = 1 AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let low_stock_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products \
             WHERE current_stock <= min_stock AND min_stock > 0 AND status = 1 AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let today_stock_in: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0) FROM stock_movements \
             WHERE kind = ? AND DATE(created_at) = ?",
        )
        .bind(StockMovementKind::StockIn)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let today_stock_out: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0) FROM stock_movements \
             WHERE kind = ? AND DATE(created_at) = ?",
        )
        .bind(StockMovementKind::StockOut)
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let today_records: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM stock_movements WHERE DATE(created_at) = ?",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardStats {
            total_products,
            total_categories,
            total_suppliers,
            total_stock_value,
            low_stock_count,
            today_stock_in,
            today_stock_out,
            today_records,
        })
    }

    // Somas diárias por tipo a partir de uma data (inclusive).
    pub async fn daily_movements(&self, since: NaiveDate) -> Result<Vec<DailyMovementRow>, AppError> {
        let rows = sqlx::query_as::<_, DailyMovementRow>(
            r#"
            SELECT DATE(created_at) AS day, kind, COALESCE(SUM(quantity), 0) AS total
            FROM stock_movements
            WHERE DATE(created_at) >= ?
            GROUP BY day, kind
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Ranking por valor em estoque (current_stock * cost_price).
    pub async fn top_products_by_value(&self, limit: i64) -> Result<Vec<ProductRank>, AppError> {
        let ranks = sqlx::query_as::<_, ProductRank>(
            r#"
            SELECT name, (current_stock * cost_price) AS value
            FROM products
            WHERE status = 1 AND deleted_at IS NULL
            ORDER BY value DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(ranks)
    }

    pub async fn category_stats(&self) -> Result<Vec<CategoryStat>, AppError> {
        let stats = sqlx::query_as::<_, CategoryStat>(
            r#"
            SELECT c.name,
                   (SELECT COUNT(*) FROM products p
                    WHERE p.category_id = c.id AND p.status = 1 AND p.deleted_at IS NULL) AS count
            FROM categories c
            WHERE c.status = 1 AND c.deleted_at IS NULL
            ORDER BY c.sort_order ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }

    // Produtos ativos com saldo no alerta, do mais crítico para o menos.
    pub async fn low_stock_products(&self, limit: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE current_stock <= min_stock AND min_stock > 0 AND status = 1 AND deleted_at IS NULL
            ORDER BY current_stock ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }
}
