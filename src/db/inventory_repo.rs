// src/db/inventory_repo.rs

use chrono::Local;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::inventory::{MovementFilter, StockMovement, StockMovementKind},
};

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &MovementFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(pid) = filter.product_id {
        qb.push(" AND m.product_id = ").push_bind(pid);
    }
    if let Some(kind) = filter.kind {
        qb.push(" AND m.kind = ").push_bind(kind);
    }
    // Datas inclusivas nas duas pontas, granularidade de dia.
    if let Some(start) = filter.start_date {
        qb.push(" AND DATE(m.created_at) >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND DATE(m.created_at) <= ").push_bind(end);
    }
    if let Some(kw) = filter.keyword.as_deref() {
        let like = format!("%{}%", kw);
        qb.push(" AND (m.reference_no LIKE ")
            .push_bind(like.clone())
            .push(" OR m.notes LIKE ")
            .push_bind(like)
            .push(")");
    }
}

#[derive(Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Escritas transacionais
    // ---
    // As duas funções abaixo são sempre chamadas juntas, dentro da mesma
    // transação aberta pelo InventoryService: ou as duas persistem, ou
    // nenhuma.

    pub async fn set_product_stock<'e, E>(
        &self,
        executor: E,
        product_id: i64,
        new_stock: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE products SET current_stock = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(new_stock)
        .bind(Local::now().naive_local())
        .bind(product_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        product_id: i64,
        kind: StockMovementKind,
        quantity: i64,
        before_qty: i64,
        after_qty: i64,
        unit_cost: f64,
        total_cost: f64,
        reference_no: &str,
        notes: &str,
        operator_id: i64,
        operator_name: &str,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements
                (product_id, kind, quantity, before_qty, after_qty, unit_cost, total_cost,
                 reference_no, notes, operator_id, operator_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(kind)
        .bind(quantity)
        .bind(before_qty)
        .bind(after_qty)
        .bind(unit_cost)
        .bind(total_cost)
        .bind(reference_no)
        .bind(notes)
        .bind(operator_id)
        .bind(operator_name)
        .bind(Local::now().naive_local())
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    // ---
    // Consulta ao livro-razão
    // ---

    pub async fn list_movements(
        &self,
        filter: &MovementFilter,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<StockMovement>, i64), AppError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM stock_movements m");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(
            "SELECT m.*, p.name AS product_name FROM stock_movements m \
             LEFT JOIN products p ON p.id = m.product_id",
        );
        push_filters(&mut qb, filter);
        // Mais recentes primeiro; id desempata movimentos no mesmo instante.
        qb.push(" ORDER BY m.created_at DESC, m.id DESC LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(offset);
        let movements = qb.build_query_as::<StockMovement>().fetch_all(&self.pool).await?;

        Ok((movements, total))
    }
}
