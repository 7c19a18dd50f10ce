// src/services/inventory_service.rs
//
// O motor de mutação de estoque. Cada operação é uma única transação
// ler-calcular-gravar: lê o saldo atual, calcula o novo, grava o saldo
// E o movimento do livro-razão juntos. Ou os dois persistem, ou nenhum.
//
// A guarda de estoque insuficiente é avaliada DENTRO da transação que
// faz o commit, nunca contra uma leitura antiga: duas saídas
// concorrentes sobre o mesmo produto serializam no banco, e a segunda
// enxerga o efeito da primeira antes de validar.

use sqlx::SqlitePool;

use crate::{
    common::{
        error::AppError,
        pagination::{self, Paginated},
    },
    db::{InventoryRepository, ProductRepository},
    models::{
        auth::User,
        inventory::{
            MovementFilter, StockAdjustPayload, StockInPayload, StockMovement,
            StockMovementKind, StockOutPayload,
        },
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    product_repo: ProductRepository,
    pool: SqlitePool,
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        product_repo: ProductRepository,
        pool: SqlitePool,
    ) -> Self {
        Self { inventory_repo, product_repo, pool }
    }

    // --- ENTRADA ---
    pub async fn stock_in(
        &self,
        payload: &StockInPayload,
        operator: &User,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, payload.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let before = product.current_stock;
        let after = before + payload.quantity;
        let total_cost = payload.quantity as f64 * payload.unit_cost;
        // max_stock é apenas informativo: a entrada nunca valida contra ele.

        self.inventory_repo
            .set_product_stock(&mut *tx, product.meta.id, after)
            .await?;
        let movement = self
            .inventory_repo
            .insert_movement(
                &mut *tx,
                product.meta.id,
                StockMovementKind::StockIn,
                payload.quantity,
                before,
                after,
                payload.unit_cost,
                total_cost,
                &payload.reference_no,
                &payload.notes,
                operator.meta.id,
                &operator.username,
            )
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    // --- SAÍDA ---
    pub async fn stock_out(
        &self,
        payload: &StockOutPayload,
        operator: &User,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, payload.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let before = product.current_stock;
        if before < payload.quantity {
            // O retorno antecipado derruba `tx` sem commit: rollback
            // automático, nem o saldo nem o razão mudam.
            return Err(AppError::InsufficientStock {
                current: before,
                requested: payload.quantity,
            });
        }
        let after = before - payload.quantity;

        self.inventory_repo
            .set_product_stock(&mut *tx, product.meta.id, after)
            .await?;
        let movement = self
            .inventory_repo
            .insert_movement(
                &mut *tx,
                product.meta.id,
                StockMovementKind::StockOut,
                payload.quantity,
                before,
                after,
                0.0,
                0.0,
                &payload.reference_no,
                &payload.notes,
                operator.meta.id,
                &operator.username,
            )
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    // --- AJUSTE ---
    pub async fn stock_adjust(
        &self,
        payload: &StockAdjustPayload,
        operator: &User,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .product_repo
            .find_by_id(&mut *tx, payload.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let before = product.current_stock;
        let after = payload.new_quantity;
        // A direção fica implícita no par before/after; a quantidade é
        // só a magnitude. Ajuste para o mesmo valor (delta 0) também é
        // registrado: toda intenção do operador fica no razão.
        let quantity = (after - before).abs();

        self.inventory_repo
            .set_product_stock(&mut *tx, product.meta.id, after)
            .await?;
        let movement = self
            .inventory_repo
            .insert_movement(
                &mut *tx,
                product.meta.id,
                StockMovementKind::Adjust,
                quantity,
                before,
                after,
                0.0,
                0.0,
                "",
                &payload.notes,
                operator.meta.id,
                &operator.username,
            )
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    // --- CONSULTA AO RAZÃO ---
    pub async fn list_movements(
        &self,
        filter: &MovementFilter,
        page: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Paginated<StockMovement>, AppError> {
        let page = pagination::clamp_page(page);
        let page_size = pagination::clamp_page_size(page_size);
        let offset = pagination::offset(page, page_size);

        let (movements, total) = self
            .inventory_repo
            .list_movements(filter, page_size, offset)
            .await?;

        Ok(Paginated::new(movements, total, page, page_size))
    }
}
