//! Pedido API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /pedido | POST | 下单（预留库存，状态 AGUARDANDO_PAGAMENTO） |
//! | /pedido/{id} | GET | 订单详情（含条目、地址、商品） |
//! | /pedido/cliente/{clienteId} | GET | 客户订单，创建时间倒序 |
//! | /pedido/{id}/status | PATCH | 管理性状态覆写（终态不可变） |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/pedido", post(handler::create))
        .route("/pedido/{id}", get(handler::get_by_id))
        .route("/pedido/cliente/{cliente_id}", get(handler::list_by_cliente))
        .route("/pedido/{id}/status", patch(handler::update_status))
}
