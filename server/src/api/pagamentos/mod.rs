//! Pagamento API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /pagamento/processar | POST | 处理支付（PAGO 扣库存 / CANCELADO 释放预留） |
//! | /pagamento/pedido/{pedidoId} | GET | 订单的支付记录 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/pagamento/processar", post(handler::processar))
        .route("/pagamento/pedido/{pedido_id}", get(handler::list_by_pedido))
}
