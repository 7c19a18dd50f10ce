// src/db/supplier_repo.rs

use chrono::Local;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::catalog::Supplier};

const LIST_COLUMNS: &str = "SELECT s.*, \
    (SELECT COUNT(*) FROM products p WHERE p.supplier_id = s.id AND p.deleted_at IS NULL) AS product_count \
    FROM suppliers s";

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, keyword: Option<&str>, status: Option<i64>) {
    qb.push(" WHERE s.deleted_at IS NULL");
    if let Some(kw) = keyword {
        let like = format!("%{}%", kw);
        qb.push(" AND (s.name LIKE ")
            .push_bind(like.clone())
            .push(" OR s.code LIKE ")
            .push_bind(like.clone())
            .push(" OR s.contact_person LIKE ")
            .push_bind(like)
            .push(")");
    }
    if let Some(st) = status {
        qb.push(" AND s.status = ").push_bind(st);
    }
}

#[derive(Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        keyword: Option<&str>,
        status: Option<i64>,
        page_size: i64,
        offset: i64,
    ) -> Result<(Vec<Supplier>, i64), AppError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM suppliers s");
        push_filters(&mut count_qb, keyword, status);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(LIST_COLUMNS);
        push_filters(&mut qb, keyword, status);
        qb.push(" ORDER BY s.id DESC LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(offset);
        let suppliers = qb.build_query_as::<Supplier>().fetch_all(&self.pool).await?;

        Ok((suppliers, total))
    }

    pub async fn all_active(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE status = 1 AND deleted_at IS NULL ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(supplier)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE code = ? AND deleted_at IS NULL",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(supplier)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        code: &str,
        name: &str,
        contact_person: &str,
        phone: &str,
        email: &str,
        address: &str,
        status: i64,
        remark: &str,
    ) -> Result<Supplier, AppError> {
        let now = Local::now().naive_local();
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (code, name, contact_person, phone, email, address, status, remark, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(contact_person)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(status)
        .bind(remark)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(supplier)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        code: &str,
        name: &str,
        contact_person: &str,
        phone: &str,
        email: &str,
        address: &str,
        status: i64,
        remark: &str,
    ) -> Result<Supplier, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET code = ?, name = ?, contact_person = ?, phone = ?, email = ?, address = ?, status = ?, remark = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .bind(contact_person)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(status)
        .bind(remark)
        .bind(Local::now().naive_local())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        supplier.ok_or(AppError::SupplierNotFound)
    }

    pub async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE suppliers SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(Local::now().naive_local())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::SupplierNotFound);
        }
        Ok(())
    }

    pub async fn dependent_products(&self, id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE supplier_id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
