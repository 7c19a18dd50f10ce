// src/services.rs

pub mod auth;
pub use auth::AuthService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod product_service;
pub use product_service::ProductService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
