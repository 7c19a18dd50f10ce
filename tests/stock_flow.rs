// tests/stock_flow.rs
//
// Propriedades do motor de estoque e da camada de agregação, direto
// nos serviços, com SQLite em memória.

use chrono::{Duration, Local};

use stockroom::{
    common::error::AppError,
    config::{AppState, Config},
    models::{
        auth::{RegisterPayload, User},
        inventory::{
            MovementFilter, StockAdjustPayload, StockInPayload, StockMovementKind,
            StockOutPayload,
        },
        product::ProductPayload,
    },
};

async fn test_state() -> AppState {
    let config = Config {
        app_port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "segredo-de-teste".to_string(),
        jwt_expire_hours: 1,
        admin_username: "admin".to_string(),
        admin_password: "admin123".to_string(),
    };
    AppState::new(config).await.expect("falha ao montar o estado de teste")
}

async fn operator(state: &AppState, username: &str) -> User {
    state
        .auth_service
        .register(&RegisterPayload {
            username: username.to_string(),
            password: "senha123".to_string(),
            email: String::new(),
            real_name: "Operador de Teste".to_string(),
        })
        .await
        .expect("falha ao registrar operador")
}

fn product_payload(sku: &str, cost_price: f64, min_stock: i64) -> ProductPayload {
    ProductPayload {
        sku: sku.to_string(),
        name: format!("Produto {}", sku),
        description: String::new(),
        category_id: None,
        supplier_id: None,
        unit: String::new(),
        cost_price,
        selling_price: 0.0,
        min_stock,
        max_stock: 0,
        barcode: String::new(),
        location: String::new(),
        image_url: String::new(),
        status: None,
    }
}

fn stock_in(product_id: i64, quantity: i64, unit_cost: f64) -> StockInPayload {
    StockInPayload {
        product_id,
        quantity,
        unit_cost,
        reference_no: String::new(),
        notes: String::new(),
    }
}

fn stock_out(product_id: i64, quantity: i64) -> StockOutPayload {
    StockOutPayload {
        product_id,
        quantity,
        reference_no: String::new(),
        notes: String::new(),
    }
}

fn adjust(product_id: i64, new_quantity: i64) -> StockAdjustPayload {
    StockAdjustPayload { product_id, new_quantity, notes: String::new() }
}

#[tokio::test]
async fn entrada_atualiza_saldo_e_razao() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-001", 3.5, 0))
        .await
        .unwrap();
    assert_eq!(product.current_stock, 0);

    let movement = state
        .inventory_service
        .stock_in(&stock_in(product.meta.id, 20, 3.5), &op)
        .await
        .unwrap();

    assert_eq!(movement.kind, StockMovementKind::StockIn);
    assert_eq!(movement.before_qty, 0);
    assert_eq!(movement.after_qty, 20);
    assert_eq!(movement.quantity, 20);
    assert_eq!(movement.unit_cost, 3.5);
    assert_eq!(movement.total_cost, 70.0);
    assert_eq!(movement.operator_id, op.meta.id);
    assert_eq!(movement.operator_name, op.username);

    let fresh = state.product_service.get_product(product.meta.id).await.unwrap();
    assert_eq!(fresh.current_stock, 20);
}

#[tokio::test]
async fn saida_insuficiente_nao_altera_nada() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-002", 1.0, 0))
        .await
        .unwrap();
    state
        .inventory_service
        .stock_in(&stock_in(product.meta.id, 5, 1.0), &op)
        .await
        .unwrap();

    let err = state
        .inventory_service
        .stock_out(&stock_out(product.meta.id, 6), &op)
        .await
        .unwrap_err();
    match err {
        AppError::InsufficientStock { current, requested } => {
            assert_eq!(current, 5);
            assert_eq!(requested, 6);
        }
        other => panic!("esperava InsufficientStock, veio {:?}", other),
    }

    // Nem o saldo nem o razão mudaram.
    let fresh = state.product_service.get_product(product.meta.id).await.unwrap();
    assert_eq!(fresh.current_stock, 5);
    let filter = MovementFilter { product_id: Some(product.meta.id), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn saida_de_produto_inexistente_e_not_found() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;

    let err = state.inventory_service.stock_out(&stock_out(9999, 1), &op).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));

    let err = state
        .inventory_service
        .stock_in(&stock_in(9999, 1, 1.0), &op)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));

    let err = state.inventory_service.stock_adjust(&adjust(9999, 0), &op).await.unwrap_err();
    assert!(matches!(err, AppError::ProductNotFound));
}

#[tokio::test]
async fn ajuste_registra_magnitude_nas_duas_direcoes() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-003", 1.0, 0))
        .await
        .unwrap();
    state
        .inventory_service
        .stock_in(&stock_in(product.meta.id, 10, 1.0), &op)
        .await
        .unwrap();

    // Para baixo: 10 -> 4, magnitude 6.
    let down = state
        .inventory_service
        .stock_adjust(&adjust(product.meta.id, 4), &op)
        .await
        .unwrap();
    assert_eq!(down.kind, StockMovementKind::Adjust);
    assert_eq!(down.before_qty, 10);
    assert_eq!(down.after_qty, 4);
    assert_eq!(down.quantity, 6);

    // Para cima: 4 -> 9, magnitude 5.
    let up = state
        .inventory_service
        .stock_adjust(&adjust(product.meta.id, 9), &op)
        .await
        .unwrap();
    assert_eq!(up.before_qty, 4);
    assert_eq!(up.after_qty, 9);
    assert_eq!(up.quantity, 5);

    let fresh = state.product_service.get_product(product.meta.id).await.unwrap();
    assert_eq!(fresh.current_stock, 9);
}

#[tokio::test]
async fn ajuste_sem_delta_tambem_e_registrado() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-004", 1.0, 0))
        .await
        .unwrap();
    state.inventory_service.stock_adjust(&adjust(product.meta.id, 5), &op).await.unwrap();

    // Ajustar para o valor atual gera um movimento com magnitude zero.
    let noop = state
        .inventory_service
        .stock_adjust(&adjust(product.meta.id, 5), &op)
        .await
        .unwrap();
    assert_eq!(noop.quantity, 0);
    assert_eq!(noop.before_qty, 5);
    assert_eq!(noop.after_qty, 5);

    let filter = MovementFilter { product_id: Some(product.meta.id), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn razao_encadeia_before_e_after() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-005", 1.0, 0))
        .await
        .unwrap();
    let id = product.meta.id;

    state.inventory_service.stock_in(&stock_in(id, 10, 1.0), &op).await.unwrap();
    state.inventory_service.stock_out(&stock_out(id, 3), &op).await.unwrap();
    state.inventory_service.stock_adjust(&adjust(id, 12), &op).await.unwrap();
    state.inventory_service.stock_out(&stock_out(id, 5), &op).await.unwrap();

    let filter = MovementFilter { product_id: Some(id), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 4);

    // A listagem vem do mais recente para o mais antigo.
    let mut chain = page.items;
    chain.reverse();
    for pair in chain.windows(2) {
        assert_eq!(pair[0].after_qty, pair[1].before_qty);
    }

    let fresh = state.product_service.get_product(id).await.unwrap();
    assert_eq!(chain.last().unwrap().after_qty, fresh.current_stock);
    assert_eq!(fresh.current_stock, 7);
}

#[tokio::test]
async fn saidas_concorrentes_admitem_uma_so() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-006", 1.0, 0))
        .await
        .unwrap();
    let id = product.meta.id;
    state.inventory_service.stock_in(&stock_in(id, 10, 1.0), &op).await.unwrap();

    // Duas saídas de 6 sobre saldo 10: exatamente uma passa.
    let svc_a = state.inventory_service.clone();
    let svc_b = state.inventory_service.clone();
    let payload_a = stock_out(id, 6);
    let payload_b = stock_out(id, 6);
    let op_a = op.clone();
    let op_b = op.clone();

    let (res_a, res_b) = tokio::join!(
        tokio::spawn(async move { svc_a.stock_out(&payload_a, &op_a).await }),
        tokio::spawn(async move { svc_b.stock_out(&payload_b, &op_b).await }),
    );
    let results = [res_a.unwrap(), res_b.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    let failure = results.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        failure.as_ref().unwrap_err(),
        AppError::InsufficientStock { current: 4, requested: 6 }
    ));

    // Saldo nunca fica negativo; só a vencedora entrou no razão.
    let fresh = state.product_service.get_product(id).await.unwrap();
    assert_eq!(fresh.current_stock, 4);
    let filter = MovementFilter { product_id: Some(id), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn alerta_de_estoque_baixo_entra_e_sai() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-007", 1.0, 10))
        .await
        .unwrap();
    let id = product.meta.id;
    state.inventory_service.stock_in(&stock_in(id, 5, 1.0), &op).await.unwrap();

    // 5 <= 10 com min_stock > 0: entra no alerta.
    let low = state.dashboard_service.low_stock_products(None).await.unwrap();
    assert!(low.iter().any(|p| p.meta.id == id));

    // 15 > 10: sai do alerta.
    state.inventory_service.stock_in(&stock_in(id, 10, 1.0), &op).await.unwrap();
    let low = state.dashboard_service.low_stock_products(None).await.unwrap();
    assert!(!low.iter().any(|p| p.meta.id == id));
}

#[tokio::test]
async fn estoque_baixo_ordena_do_mais_critico() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let quase = state
        .product_service
        .create_product(&product_payload("SKU-008", 1.0, 10))
        .await
        .unwrap();
    let critico = state
        .product_service
        .create_product(&product_payload("SKU-009", 1.0, 10))
        .await
        .unwrap();
    state.inventory_service.stock_in(&stock_in(quase.meta.id, 9, 1.0), &op).await.unwrap();
    state.inventory_service.stock_in(&stock_in(critico.meta.id, 2, 1.0), &op).await.unwrap();

    let low = state.dashboard_service.low_stock_products(Some(10)).await.unwrap();
    assert_eq!(low.len(), 2);
    assert_eq!(low[0].meta.id, critico.meta.id);
    assert_eq!(low[1].meta.id, quase.meta.id);
}

#[tokio::test]
async fn janela_do_grafico_tem_sempre_30_dias() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-010", 2.0, 0))
        .await
        .unwrap();
    let id = product.meta.id;
    state.inventory_service.stock_in(&stock_in(id, 8, 2.0), &op).await.unwrap();
    state.inventory_service.stock_out(&stock_out(id, 3), &op).await.unwrap();

    let charts = state.dashboard_service.chart_data().await.unwrap();
    assert_eq!(charts.stock_movement.len(), 30);

    // Do mais antigo para o mais recente, com os dias parados zerados.
    let today = Local::now().date_naive();
    assert_eq!(charts.stock_movement[0].date, (today - Duration::days(29)).to_string());
    let last = charts.stock_movement.last().unwrap();
    assert_eq!(last.date, today.to_string());
    assert_eq!(last.stock_in, 8);
    assert_eq!(last.stock_out, 3);
    for day in &charts.stock_movement[..29] {
        assert_eq!(day.stock_in, 0);
        assert_eq!(day.stock_out, 0);
    }

    // Top por valor em estoque: 5 * 2.0.
    assert_eq!(charts.top_products[0].value, 10.0);
}

#[tokio::test]
async fn stats_refletem_o_dia() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let product = state
        .product_service
        .create_product(&product_payload("SKU-011", 2.0, 3))
        .await
        .unwrap();
    let id = product.meta.id;
    state.inventory_service.stock_in(&stock_in(id, 10, 2.0), &op).await.unwrap();
    state.inventory_service.stock_out(&stock_out(id, 3), &op).await.unwrap();
    state.inventory_service.stock_adjust(&adjust(id, 7), &op).await.unwrap();

    let stats = state.dashboard_service.stats().await.unwrap();
    assert_eq!(stats.total_products, 1);
    assert_eq!(stats.today_stock_in, 10);
    assert_eq!(stats.today_stock_out, 3);
    assert_eq!(stats.today_records, 3);
    // 7 unidades a 2.0 de custo.
    assert_eq!(stats.total_stock_value, 14.0);
    assert_eq!(stats.low_stock_count, 0);
}

#[tokio::test]
async fn filtros_do_razao() {
    let state = test_state().await;
    let op = operator(&state, "maria").await;
    let a = state
        .product_service
        .create_product(&product_payload("SKU-012", 1.0, 0))
        .await
        .unwrap();
    let b = state
        .product_service
        .create_product(&product_payload("SKU-013", 1.0, 0))
        .await
        .unwrap();

    let mut entrada = stock_in(a.meta.id, 10, 1.0);
    entrada.reference_no = "NF-123".to_string();
    state.inventory_service.stock_in(&entrada, &op).await.unwrap();
    state.inventory_service.stock_out(&stock_out(a.meta.id, 2), &op).await.unwrap();
    state.inventory_service.stock_in(&stock_in(b.meta.id, 4, 1.0), &op).await.unwrap();

    // Por produto.
    let filter = MovementFilter { product_id: Some(a.meta.id), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 2);

    // Por tipo.
    let filter = MovementFilter { kind: Some(StockMovementKind::StockOut), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].product_id, a.meta.id);

    // Por palavra-chave no número de referência.
    let filter = MovementFilter { keyword: Some("NF-123".to_string()), ..Default::default() };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].kind, StockMovementKind::StockIn);

    // Intervalo de datas: hoje inclui, amanhã em diante exclui.
    let today = Local::now().date_naive();
    let filter = MovementFilter {
        start_date: Some(today),
        end_date: Some(today),
        ..Default::default()
    };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 3);

    let filter = MovementFilter {
        start_date: Some(today + Duration::days(1)),
        ..Default::default()
    };
    let page = state.inventory_service.list_movements(&filter, None, None).await.unwrap();
    assert_eq!(page.total, 0);

    // Paginação: total estável, página limitada.
    let filter = MovementFilter::default();
    let page = state
        .inventory_service
        .list_movements(&filter, Some(1), Some(2))
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_pages, 2);
}
