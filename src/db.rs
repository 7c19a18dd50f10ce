// src/db.rs

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
