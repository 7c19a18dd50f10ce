// src/db/product_repo.rs

use chrono::Local;
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::product::Product};

// Listagens e buscas por id carregam os nomes das referências via JOIN.
const SELECT_WITH_NAMES: &str = "SELECT p.*, c.name AS category_name, s.name AS supplier_name \
    FROM products p \
    LEFT JOIN categories c ON c.id = p.category_id AND c.deleted_at IS NULL \
    LEFT JOIN suppliers s ON s.id = p.supplier_id AND s.deleted_at IS NULL";

fn push_filters(
    qb: &mut QueryBuilder<'_, Sqlite>,
    keyword: Option<&str>,
    status: Option<i64>,
    category_id: Option<i64>,
    supplier_id: Option<i64>,
) {
    qb.push(" WHERE p.deleted_at IS NULL");
    if let Some(kw) = keyword {
        let like = format!("%{}%", kw);
        qb.push(" AND (p.name LIKE ")
            .push_bind(like.clone())
            .push(" OR p.sku LIKE ")
            .push_bind(like.clone())
            .push(" OR p.barcode LIKE ")
            .push_bind(like)
            .push(")");
    }
    if let Some(st) = status {
        qb.push(" AND p.status = ").push_bind(st);
    }
    if let Some(cid) = category_id {
        qb.push(" AND p.category_id = ").push_bind(cid);
    }
    if let Some(sid) = supplier_id {
        qb.push(" AND p.supplier_id = ").push_bind(sid);
    }
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        &self,
        keyword: Option<&str>,
        status: Option<i64>,
        category_id: Option<i64>,
        supplier_id: Option<i64>,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
        push_filters(&mut count_qb, keyword, status, category_id, supplier_id);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(SELECT_WITH_NAMES);
        push_filters(&mut qb, keyword, status, category_id, supplier_id);
        qb.push(" ORDER BY p.id DESC LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(offset);
        let products = qb.build_query_as::<Product>().fetch_all(&self.pool).await?;

        Ok((products, total))
    }

    // Genérico sobre o executor: o motor de estoque precisa ler o saldo
    // atual DENTRO da mesma transação que vai gravá-lo.
    pub async fn find_by_id<'e, E>(&self, executor: E, id: i64) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = format!("{} WHERE p.id = ? AND p.deleted_at IS NULL", SELECT_WITH_NAMES);
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    // Variante sobre a pool, para leituras fora de transação.
    pub async fn get(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.find_by_id(&self.pool, id).await
    }

    pub async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE sku = ? AND deleted_at IS NULL",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        sku: &str,
        name: &str,
        description: &str,
        category_id: Option<i64>,
        supplier_id: Option<i64>,
        unit: &str,
        cost_price: f64,
        selling_price: f64,
        min_stock: i64,
        max_stock: i64,
        barcode: &str,
        location: &str,
        image_url: &str,
        status: i64,
    ) -> Result<Product, AppError> {
        let now = Local::now().naive_local();
        // current_stock nasce em 0: só o motor de estoque escreve nele.
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (sku, name, description, category_id, supplier_id, unit, cost_price, selling_price,
                 current_stock, min_stock, max_stock, barcode, location, image_url, status,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(sku)
        .bind(name)
        .bind(description)
        .bind(category_id)
        .bind(supplier_id)
        .bind(unit)
        .bind(cost_price)
        .bind(selling_price)
        .bind(min_stock)
        .bind(max_stock)
        .bind(barcode)
        .bind(location)
        .bind(image_url)
        .bind(status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        sku: &str,
        name: &str,
        description: &str,
        category_id: Option<i64>,
        supplier_id: Option<i64>,
        unit: &str,
        cost_price: f64,
        selling_price: f64,
        min_stock: i64,
        max_stock: i64,
        barcode: &str,
        location: &str,
        image_url: &str,
        status: i64,
    ) -> Result<Product, AppError> {
        // Nunca toca em current_stock.
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET sku = ?, name = ?, description = ?, category_id = ?, supplier_id = ?, unit = ?,
                cost_price = ?, selling_price = ?, min_stock = ?, max_stock = ?, barcode = ?,
                location = ?, image_url = ?, status = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(sku)
        .bind(name)
        .bind(description)
        .bind(category_id)
        .bind(supplier_id)
        .bind(unit)
        .bind(cost_price)
        .bind(selling_price)
        .bind(min_stock)
        .bind(max_stock)
        .bind(barcode)
        .bind(location)
        .bind(image_url)
        .bind(status)
        .bind(Local::now().naive_local())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        product.ok_or(AppError::ProductNotFound)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(Local::now().naive_local())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }
}
