// src/db/category_repo.rs

use chrono::Local;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::catalog::Category};

// Subquery que preenche o product_count de cada linha da listagem.
const LIST_COLUMNS: &str = "SELECT c.*, \
    (SELECT COUNT(*) FROM products p WHERE p.category_id = c.id AND p.deleted_at IS NULL) AS product_count \
    FROM categories c";

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, keyword: Option<&str>, status: Option<i64>) {
    qb.push(" WHERE c.deleted_at IS NULL");
    if let Some(kw) = keyword {
        qb.push(" AND c.name LIKE ").push_bind(format!("%{}%", kw));
    }
    if let Some(s) = status {
        qb.push(" AND c.status = ").push_bind(s);
    }
}

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        keyword: Option<&str>,
        status: Option<i64>,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<Category>, i64), AppError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM categories c");
        push_filters(&mut count_qb, keyword, status);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(LIST_COLUMNS);
        push_filters(&mut qb, keyword, status);
        qb.push(" ORDER BY c.sort_order ASC, c.id ASC LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(offset);
        let categories = qb.build_query_as::<Category>().fetch_all(&self.pool).await?;

        Ok((categories, total))
    }

    // Todas as ativas, para combos de seleção no frontend.
    pub async fn all_active(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE status = 1 AND deleted_at IS NULL ORDER BY sort_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        sort_order: i64,
        status: i64,
    ) -> Result<Category, AppError> {
        let now = Local::now().naive_local();
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, sort_order, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(sort_order)
        .bind(status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        sort_order: i64,
        status: i64,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = ?, description = ?, sort_order = ?, status = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(sort_order)
        .bind(status)
        .bind(Local::now().naive_local())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        category.ok_or(AppError::CategoryNotFound)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(Local::now().naive_local())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::CategoryNotFound);
        }
        Ok(())
    }

    // Quantos produtos vivos ainda apontam para a categoria.
    pub async fn dependent_products(&self, id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE category_id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
