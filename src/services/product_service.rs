// src/services/product_service.rs

use crate::{
    common::{
        error::AppError,
        pagination::{self, Paginated},
    },
    db::ProductRepository,
    models::product::{Product, ProductPayload},
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn list_products(
        &self,
        keyword: Option<&str>,
        status: Option<i64>,
        category_id: Option<i64>,
        supplier_id: Option<i64>,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Paginated<Product>, AppError> {
        let page = pagination::clamp_page(page);
        let page_size = pagination::clamp_page_size(page_size);
        let (products, total) = self
            .product_repo
            .list(
                keyword,
                status,
                category_id,
                supplier_id,
                page_size,
                pagination::offset(page, page_size),
            )
            .await?;
        Ok(Paginated::new(products, total, page, page_size))
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        self.product_repo.get(id).await?.ok_or(AppError::ProductNotFound)
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, AppError> {
        if self.product_repo.find_by_sku(&payload.sku).await?.is_some() {
            return Err(AppError::SkuTaken(payload.sku.clone()));
        }

        let unit = if payload.unit.is_empty() { "pcs" } else { payload.unit.as_str() };
        self.product_repo
            .create(
                &payload.sku,
                &payload.name,
                &payload.description,
                payload.category_id,
                payload.supplier_id,
                unit,
                payload.cost_price,
                payload.selling_price,
                payload.min_stock,
                payload.max_stock,
                &payload.barcode,
                &payload.location,
                &payload.image_url,
                payload.status.unwrap_or(1),
            )
            .await
    }

    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> Result<Product, AppError> {
        let current = self.get_product(id).await?;

        // SKU alterado não pode colidir com outro produto vivo.
        if payload.sku != current.sku {
            if let Some(existing) = self.product_repo.find_by_sku(&payload.sku).await? {
                if existing.meta.id != id {
                    return Err(AppError::SkuTaken(payload.sku.clone()));
                }
            }
        }

        let unit = if payload.unit.is_empty() { current.unit.as_str() } else { payload.unit.as_str() };
        self.product_repo
            .update(
                id,
                &payload.sku,
                &payload.name,
                &payload.description,
                payload.category_id,
                payload.supplier_id,
                unit,
                payload.cost_price,
                payload.selling_price,
                payload.min_stock,
                payload.max_stock,
                &payload.barcode,
                &payload.location,
                &payload.image_url,
                payload.status.unwrap_or(current.status),
            )
            .await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        self.product_repo.soft_delete(id).await
    }
}
