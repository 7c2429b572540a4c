//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`clientes`] - 客户接口
//! - [`enderecos`] - 地址接口
//! - [`categorias`] - 分类接口
//! - [`produtos`] - 商品接口
//! - [`carrinho`] - 购物车接口
//! - [`pedidos`] - 订单接口
//! - [`pagamentos`] - 支付接口

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod health;

pub mod carrinho;
pub mod categorias;
pub mod clientes;
pub mod enderecos;
pub mod pagamentos;
pub mod pedidos;
pub mod produtos;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(clientes::router())
        .merge(enderecos::router())
        .merge(categorias::router())
        .merge(produtos::router())
        .merge(carrinho::router())
        .merge(pedidos::router())
        .merge(pagamentos::router())
}

/// Build a fully configured application with all middleware
pub fn build_app() -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - the web storefront runs on another origin
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
}
