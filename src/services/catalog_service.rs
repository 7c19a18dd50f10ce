// src/services/catalog_service.rs
//
// CRUD de dados de referência (categorias e fornecedores). A única
// regra além da unicidade é a guarda de exclusão: nada some do
// catálogo enquanto houver produtos apontando para ele.

use crate::{
    common::{
        error::AppError,
        pagination::{self, Paginated},
    },
    db::{CategoryRepository, SupplierRepository},
    models::catalog::{Category, CategoryPayload, Supplier, SupplierPayload},
};

#[derive(Clone)]
pub struct CatalogService {
    category_repo: CategoryRepository,
    supplier_repo: SupplierRepository,
}

impl CatalogService {
    pub fn new(category_repo: CategoryRepository, supplier_repo: SupplierRepository) -> Self {
        Self { category_repo, supplier_repo }
    }

    // ---
    // Categorias
    // ---

    pub async fn list_categories(
        &self,
        keyword: Option<&str>,
        status: Option<i64>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Paginated<Category>, AppError> {
        let page = pagination::clamp_page(page);
        let page_size = pagination::clamp_page_size(page_size);
        let (categories, total) = self
            .category_repo
            .list(keyword, status, page_size, pagination::offset(page, page_size))
            .await?;
        Ok(Paginated::new(categories, total, page, page_size))
    }

    pub async fn all_categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.all_active().await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<Category, AppError> {
        let status = payload.status.unwrap_or(1);
        self.category_repo
            .create(&payload.name, &payload.description, payload.sort_order, status)
            .await
    }

    pub async fn update_category(
        &self,
        id: i64,
        payload: &CategoryPayload,
    ) -> Result<Category, AppError> {
        let current = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CategoryNotFound)?;
        let status = payload.status.unwrap_or(current.status);
        self.category_repo
            .update(id, &payload.name, &payload.description, payload.sort_order, status)
            .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), AppError> {
        let dependents = self.category_repo.dependent_products(id).await?;
        if dependents > 0 {
            return Err(AppError::CategoryInUse(dependents));
        }
        self.category_repo.soft_delete(id).await
    }

    // ---
    // Fornecedores
    // ---

    pub async fn list_suppliers(
        &self,
        keyword: Option<&str>,
        status: Option<i64>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Paginated<Supplier>, AppError> {
        let page = pagination::clamp_page(page);
        let page_size = pagination::clamp_page_size(page_size);
        let (suppliers, total) = self
            .supplier_repo
            .list(keyword, status, page_size, pagination::offset(page, page_size))
            .await?;
        Ok(Paginated::new(suppliers, total, page, page_size))
    }

    pub async fn all_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.all_active().await
    }

    pub async fn create_supplier(&self, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        if self.supplier_repo.find_by_code(&payload.code).await?.is_some() {
            return Err(AppError::SupplierCodeTaken(payload.code.clone()));
        }
        self.supplier_repo
            .create(
                &payload.code,
                &payload.name,
                &payload.contact_person,
                &payload.phone,
                &payload.email,
                &payload.address,
                payload.status.unwrap_or(1),
                &payload.remark,
            )
            .await
    }

    pub async fn update_supplier(
        &self,
        id: i64,
        payload: &SupplierPayload,
    ) -> Result<Supplier, AppError> {
        let current = self
            .supplier_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::SupplierNotFound)?;

        // Código novo não pode colidir com outro fornecedor vivo.
        if payload.code != current.code {
            if let Some(existing) = self.supplier_repo.find_by_code(&payload.code).await? {
                if existing.meta.id != id {
                    return Err(AppError::SupplierCodeTaken(payload.code.clone()));
                }
            }
        }

        self.supplier_repo
            .update(
                id,
                &payload.code,
                &payload.name,
                &payload.contact_person,
                &payload.phone,
                &payload.email,
                &payload.address,
                payload.status.unwrap_or(current.status),
                &payload.remark,
            )
            .await
    }

    pub async fn delete_supplier(&self, id: i64) -> Result<(), AppError> {
        let dependents = self.supplier_repo.dependent_products(id).await?;
        if dependents > 0 {
            return Err(AppError::SupplierInUse(dependents));
        }
        self.supplier_repo.soft_delete(id).await
    }
}
