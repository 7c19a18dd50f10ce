// src/config.rs

use std::{env, path::Path, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use crate::{
    db::{
        CategoryRepository, DashboardRepository, InventoryRepository, ProductRepository,
        SupplierRepository, UserRepository,
    },
    services::{AuthService, CatalogService, DashboardService, InventoryService, ProductService},
};

// Configuração carregada do ambiente (com .env opcional).
#[derive(Debug, Clone)]
pub struct Config {
    pub app_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expire_hours: i64,
    pub admin_username: String,
    pub admin_password: String,
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        // .env é opcional: não existir não é erro.
        dotenvy::dotenv().ok();

        Self {
            app_port: get_env("APP_PORT", "8080").parse().unwrap_or(8080),
            database_url: get_env("DATABASE_URL", "sqlite://./data/stockroom.db"),
            jwt_secret: get_env("JWT_SECRET", "stockroom-default-secret-key"),
            jwt_expire_hours: get_env("JWT_EXPIRE_HOURS", "72").parse().unwrap_or(72),
            admin_username: get_env("ADMIN_USERNAME", "admin"),
            admin_password: get_env("ADMIN_PASSWORD", "admin123"),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Config,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub product_service: ProductService,
    pub inventory_service: InventoryService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Garante o diretório do arquivo do banco antes de conectar.
        if let Some(path) = config.database_url.strip_prefix("sqlite://") {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // SQLite admite um único escritor. Com uma conexão só, cada
        // transação serializa no banco e a guarda de estoque
        // insuficiente sempre avalia estado já commitado.
        let db_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!().run(&db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let category_repo = CategoryRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo, config.jwt_secret.clone(), config.jwt_expire_hours);
        let catalog_service = CatalogService::new(category_repo, supplier_repo);
        let product_service = ProductService::new(product_repo.clone());
        let inventory_service =
            InventoryService::new(inventory_repo, product_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        // Conta de administrador garantida na primeira subida.
        auth_service
            .seed_admin(&config.admin_username, &config.admin_password)
            .await?;

        Ok(Self {
            db_pool,
            config,
            auth_service,
            catalog_service,
            product_service,
            inventory_service,
            dashboard_service,
        })
    }
}
