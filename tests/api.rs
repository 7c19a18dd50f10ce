// tests/api.rs
//
// Teste caixa-preta da API HTTP: sobe o servidor de verdade numa porta
// aleatória, com SQLite em memória, e conversa com ele via reqwest.

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};

use stockroom::{
    app::build_router,
    config::{AppState, Config},
};

struct TestServer {
    base_url: String,
    handle: JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let config = Config {
            app_port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "segredo-de-teste".to_string(),
            jwt_expire_hours: 1,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        };
        let state = AppState::new(config).await.expect("falha ao montar o estado de teste");
        let app = build_router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("falha ao abrir a porta");
        let addr = listener.local_addr().expect("endereço local");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("servidor de teste caiu");
        });

        Self { base_url: format!("http://{}", addr), handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    async fn login(&self, client: &reqwest::Client, username: &str, password: &str) -> String {
        let resp = client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_responde_ok() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn admin_semeado_faz_login() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/auth/login"))
        .json(&json!({ "username": "admin", "password": "admin123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["role"], "admin");
    // O hash da senha jamais sai na resposta.
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn senha_errada_e_rejeitada() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/auth/login"))
        .json(&json!({ "username": "admin", "password": "errada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("inválidos"));
}

#[tokio::test]
async fn rotas_protegidas_exigem_token() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client.get(server.url("/products")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(server.url("/products"))
        .bearer_auth("token-qualquer")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn operador_nao_muta_dados_mestres() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/auth/register"))
        .json(&json!({ "username": "joao", "password": "senha123", "realName": "João" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let token = server.login(&client, "joao", "senha123").await;

    // Operador consulta, mas não cria categoria.
    let resp = client
        .get(server.url("/categories"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(server.url("/categories"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Bebidas" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Admin cria.
    let admin = server.login(&client, "admin", "admin123").await;
    let resp = client
        .post(server.url("/categories"))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Bebidas" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn fluxo_completo_de_estoque() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = server.login(&client, "admin", "admin123").await;

    // Cadastro mestre: categoria, fornecedor e produto.
    let resp = client
        .post(server.url("/categories"))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Limpeza" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = resp.json().await.unwrap();

    let resp = client
        .post(server.url("/suppliers"))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Distribuidora Sul", "code": "FOR-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let supplier: Value = resp.json().await.unwrap();

    let resp = client
        .post(server.url("/products"))
        .bearer_auth(&admin)
        .json(&json!({
            "sku": "SAB-001",
            "name": "Sabão em pó 1kg",
            "categoryId": category["id"],
            "supplierId": supplier["id"],
            "costPrice": 3.5,
            "sellingPrice": 6.0,
            "minStock": 5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.unwrap();
    let product_id = product["id"].as_i64().unwrap();
    // Estoque inicial é sempre zero, mesmo que o payload tentasse dizer outra coisa.
    assert_eq!(product["currentStock"], 0);

    // Entrada de 20 unidades a 3.50.
    let resp = client
        .post(server.url("/inventory/stock-in"))
        .bearer_auth(&admin)
        .json(&json!({ "productId": product_id, "quantity": 20, "unitCost": 3.5, "referenceNo": "NF-777" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let movement: Value = resp.json().await.unwrap();
    assert_eq!(movement["kind"], "stock_in");
    assert_eq!(movement["beforeQty"], 0);
    assert_eq!(movement["afterQty"], 20);
    assert_eq!(movement["totalCost"], 70.0);
    assert_eq!(movement["operatorName"], "admin");

    // Saída maior que o saldo: 409 e nada muda.
    let resp = client
        .post(server.url("/inventory/stock-out"))
        .bearer_auth(&admin)
        .json(&json!({ "productId": product_id, "quantity": 25 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Estoque insuficiente"));

    // Saída válida de 5.
    let resp = client
        .post(server.url("/inventory/stock-out"))
        .bearer_auth(&admin)
        .json(&json!({ "productId": product_id, "quantity": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(server.url(&format!("/products/{}", product_id)))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let product: Value = resp.json().await.unwrap();
    assert_eq!(product["currentStock"], 15);

    // Razão filtrado por produto: só os dois movimentos efetivados.
    let resp = client
        .get(server.url(&format!("/inventory/records?productId={}", product_id)))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["total"], 2);
    // Mais recente primeiro.
    assert_eq!(page["items"][0]["kind"], "stock_out");
    assert_eq!(page["items"][1]["referenceNo"], "NF-777");

    // O painel enxerga o dia.
    let resp = client
        .get(server.url("/dashboard/stats"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    let stats: Value = resp.json().await.unwrap();
    assert_eq!(stats["todayStockIn"], 20);
    assert_eq!(stats["todayStockOut"], 5);
    assert_eq!(stats["totalProducts"], 1);
}

#[tokio::test]
async fn categoria_com_produtos_nao_e_excluida() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = server.login(&client, "admin", "admin123").await;

    let resp = client
        .post(server.url("/categories"))
        .bearer_auth(&admin)
        .json(&json!({ "name": "Padaria" }))
        .send()
        .await
        .unwrap();
    let category: Value = resp.json().await.unwrap();
    let category_id = category["id"].as_i64().unwrap();

    let resp = client
        .post(server.url("/products"))
        .bearer_auth(&admin)
        .json(&json!({ "sku": "PAO-001", "name": "Pão francês", "categoryId": category_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product: Value = resp.json().await.unwrap();

    let resp = client
        .delete(server.url(&format!("/categories/{}", category_id)))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Removendo o produto, a exclusão passa a valer.
    let resp = client
        .delete(server.url(&format!("/products/{}", product["id"].as_i64().unwrap())))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .delete(server.url(&format!("/categories/{}", category_id)))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn sku_duplicado_e_conflito() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = server.login(&client, "admin", "admin123").await;

    let payload = json!({ "sku": "DUP-001", "name": "Produto A" });
    let resp = client
        .post(server.url("/products"))
        .bearer_auth(&admin)
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(server.url("/products"))
        .bearer_auth(&admin)
        .json(&json!({ "sku": "DUP-001", "name": "Produto B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("DUP-001"));
}

#[tokio::test]
async fn troca_de_senha() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/auth/register"))
        .json(&json!({ "username": "carla", "password": "senha123" }))
        .send()
        .await
        .unwrap();
    let token = server.login(&client, "carla", "senha123").await;

    // Senha atual errada não passa.
    let resp = client
        .put(server.url("/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({ "oldPassword": "errada", "newPassword": "novasenha" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .put(server.url("/auth/change-password"))
        .bearer_auth(&token)
        .json(&json!({ "oldPassword": "senha123", "newPassword": "novasenha" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // A senha antiga morreu, a nova funciona.
    let resp = client
        .post(server.url("/auth/login"))
        .json(&json!({ "username": "carla", "password": "senha123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    server.login(&client, "carla", "novasenha").await;
}

#[tokio::test]
async fn payload_invalido_devolve_detalhes() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = server.login(&client, "admin", "admin123").await;

    let resp = client
        .post(server.url("/inventory/stock-in"))
        .bearer_auth(&admin)
        .json(&json!({ "productId": 1, "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["details"]["quantity"].is_array());
}
