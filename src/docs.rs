// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::common::pagination::Paginated;
use crate::handlers;
use crate::models;
use crate::models::{
    catalog::{Category, Supplier},
    inventory::StockMovement,
    product::Product,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::get_profile,
        handlers::auth::update_profile,
        handlers::auth::change_password,

        // --- Catálogo ---
        handlers::categories::list_categories,
        handlers::categories::all_categories,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::all_suppliers,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Produtos ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Estoque ---
        handlers::inventory::stock_in,
        handlers::inventory::stock_out,
        handlers::inventory::stock_adjust,
        handlers::inventory::list_movements,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_charts,
        handlers::dashboard::low_stock,
    ),
    components(
        schemas(
            // --- Auth ---
            models::EntityMeta,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::RegisterPayload,
            models::auth::UpdateProfilePayload,
            models::auth::ChangePasswordPayload,
            models::auth::AuthResponse,

            // --- Catálogo ---
            models::catalog::Category,
            models::catalog::Supplier,
            models::catalog::CategoryPayload,
            models::catalog::SupplierPayload,

            // --- Produtos ---
            models::product::Product,
            models::product::ProductPayload,

            // --- Estoque ---
            models::inventory::StockMovementKind,
            models::inventory::StockMovement,
            models::inventory::StockInPayload,
            models::inventory::StockOutPayload,
            models::inventory::StockAdjustPayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::ChartData,
            models::dashboard::DailyMovement,
            models::dashboard::ProductRank,
            models::dashboard::CategoryStat,

            // --- Envelopes de paginação ---
            Paginated<Category>,
            Paginated<Supplier>,
            Paginated<Product>,
            Paginated<StockMovement>,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Perfil"),
        (name = "Catálogo", description = "Categorias e Fornecedores"),
        (name = "Produtos", description = "Cadastro de Produtos"),
        (name = "Estoque", description = "Movimentações e Livro-Razão"),
        (name = "Dashboard", description = "Indicadores e Gráficos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
