// src/main.rs

use tokio::net::TcpListener;

use stockroom::{
    app::build_router,
    config::{AppState, Config},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let config = Config::from_env();
    let app_port = config.app_port;

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new(config)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{}", app_port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Erro no servidor Axum");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Falha ao instalar o handler de Ctrl+C");
    tracing::info!("👋 Sinal de encerramento recebido, finalizando...");
}
