// src/app.rs
//
// Montagem do router. Fica fora do main para os testes de API subirem
// exatamente o mesmo app em uma porta efêmera.

use axum::{
    Json, Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas (sem token)
    let public_routes = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/register", post(handlers::auth::register));

    // Rotas protegidas pelo middleware de autenticação. As mutações de
    // dados mestres exigem admin via extrator AdminUser nos handlers.
    let protected_routes = Router::new()
        .route(
            "/auth/profile",
            get(handlers::auth::get_profile).put(handlers::auth::update_profile),
        )
        .route("/auth/change-password", put(handlers::auth::change_password))
        .route("/dashboard/stats", get(handlers::dashboard::get_stats))
        .route("/dashboard/charts", get(handlers::dashboard::get_charts))
        .route("/dashboard/low-stock", get(handlers::dashboard::low_stock))
        .route(
            "/categories",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route("/categories/all", get(handlers::categories::all_categories))
        .route(
            "/categories/{id}",
            put(handlers::categories::update_category).delete(handlers::categories::delete_category),
        )
        .route(
            "/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route("/suppliers/all", get(handlers::suppliers::all_suppliers))
        .route(
            "/suppliers/{id}",
            put(handlers::suppliers::update_supplier).delete(handlers::suppliers::delete_supplier),
        )
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route("/inventory/stock-in", post(handlers::inventory::stock_in))
        .route("/inventory/stock-out", post(handlers::inventory::stock_out))
        .route("/inventory/adjust", post(handlers::inventory::stock_adjust))
        .route("/inventory/records", get(handlers::inventory::list_movements))
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .nest("/api/v1", public_routes.merge(protected_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
