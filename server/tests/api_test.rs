//! HTTP 层集成测试
//!
//! 通过 `tower::ServiceExt::oneshot` 直接驱动路由，验证路径、
//! JSON 键名（camelCase）和错误码映射。

mod common;

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use loja_server::ServerState;
use loja_server::api;

fn app(state: ServerState) -> axum::Router {
    api::build_app().with_state(state)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn patch(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (state, _dir) = common::setup().await;
    let response = app(state).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn create_pedido_and_pay_over_http() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let response = app(state.clone())
        .oneshot(post(
            "/pedido",
            json!({
                "clienteId": fixture.cliente_id,
                "enderecoId": fixture.endereco_id,
                "itens": [{"produtoId": fixture.produto_id, "quantidade": 2}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let pedido = body_json(response).await;
    assert_eq!(pedido["status"], "AGUARDANDO_PAGAMENTO");
    assert_eq!(pedido["quantidadeTotal"], 2);
    assert_eq!(pedido["itens"][0]["produto"]["id"], fixture.produto_id);
    let pedido_id = pedido["id"].as_i64().unwrap();

    let response = app(state.clone())
        .oneshot(post(
            "/pagamento/processar",
            json!({
                "pedidoId": pedido_id,
                "metodo": "PIX",
                "valor": 1.0,
                "novoStatus": "PAGO"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let pagamento = body_json(response).await;
    assert_eq!(pagamento["status"], "PAGO");
    assert_eq!(pagamento["metodo"], "PIX");
    // valor forced to the pedido total: 2 x 199.90
    assert_eq!(pagamento["valor"], json!(399.8));

    assert_eq!(common::ledger(&state, fixture.produto_id).await, (8, 0));
}

#[tokio::test]
async fn pedido_errors_map_to_http_codes() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 1).await;

    // Unknown cliente -> 404 E0003
    let response = app(state.clone())
        .oneshot(post(
            "/pedido",
            json!({
                "clienteId": 404,
                "enderecoId": fixture.endereco_id,
                "itens": [{"produtoId": fixture.produto_id, "quantidade": 1}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0003");

    // Insufficient stock -> 400 E0006
    let response = app(state.clone())
        .oneshot(post(
            "/pedido",
            json!({
                "clienteId": fixture.cliente_id,
                "enderecoId": fixture.endereco_id,
                "itens": [{"produtoId": fixture.produto_id, "quantidade": 5}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0006");

    // Unknown pedido on payment -> 404
    let response = app(state.clone())
        .oneshot(post(
            "/pagamento/processar",
            json!({"pedidoId": 404, "metodo": "Boleto", "valor": 1.0, "novoStatus": "PAGO"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pedido_status_patch_roundtrip() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let response = app(state.clone())
        .oneshot(post(
            "/pedido",
            json!({
                "clienteId": fixture.cliente_id,
                "enderecoId": fixture.endereco_id,
                "itens": [{"produtoId": fixture.produto_id, "quantidade": 1}]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let pedido_id = body_json(response).await["id"].as_i64().unwrap();

    // Non-terminal overwrite -> 200
    let uri = format!("/pedido/{pedido_id}/status");
    let response = app(state.clone())
        .oneshot(patch(&uri, json!({"status": "ABERTO"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ABERTO");

    // Terminal orders reject the PATCH -> 400 E0005
    let response = app(state.clone())
        .oneshot(patch(&uri, json!({"status": "CANCELADO"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app(state.clone())
        .oneshot(patch(&uri, json!({"status": "ABERTO"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0005");
}

#[tokio::test]
async fn cliente_create_hides_senha_and_rejects_duplicates() {
    let (state, _dir) = common::setup().await;

    let payload = json!({
        "nome": "João Souza",
        "email": "joao@example.com",
        "senha": "super-secreta",
        "telefone": "11988887777"
    });

    let response = app(state.clone())
        .oneshot(post("/cliente", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["nome"], "João Souza");
    assert!(body.get("senhaHash").is_none());
    assert!(body.get("senha").is_none());

    // Same email again -> 409 E0004
    let response = app(state.clone())
        .oneshot(post("/cliente", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn produto_filters_via_query_string() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 5).await;

    let response = app(state.clone())
        .oneshot(get("/produto?nome=Fone&minPreco=100.00"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], fixture.produto_id);

    let response = app(state.clone())
        .oneshot(get("/produto?maxPreco=10.00"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn carrinho_roundtrip_over_http() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 5).await;

    let uri = format!("/carrinho/{}", fixture.cliente_id);
    let response = app(state.clone()).oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["itens"].as_array().unwrap().is_empty());

    let response = app(state.clone())
        .oneshot(post(
            &format!("/carrinho/{}/item", fixture.cliente_id),
            json!({"produtoId": fixture.produto_id, "quantidade": 2}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["itens"][0]["quantidade"], 2);
    assert_eq!(body["itens"][0]["produto"]["nome"], "Fone de ouvido");
}
