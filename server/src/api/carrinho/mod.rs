//! Carrinho API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /carrinho/{clienteId} | GET | 查看购物车（惰性创建） |
//! | /carrinho/{clienteId} | DELETE | 清空购物车 |
//! | /carrinho/{clienteId}/item | POST | 加入商品（同商品合并数量） |
//! | /carrinho/{clienteId}/item/{itemId} | PATCH | 修改数量 |
//! | /carrinho/{clienteId}/item/{itemId} | DELETE | 移除条目 |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/carrinho/{cliente_id}",
            get(handler::get_cart).delete(handler::clear),
        )
        .route("/carrinho/{cliente_id}/item", post(handler::add_item))
        .route(
            "/carrinho/{cliente_id}/item/{item_id}",
            patch(handler::update_item).delete(handler::remove_item),
        )
}
