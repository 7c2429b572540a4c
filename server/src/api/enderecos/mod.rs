//! Endereco API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /endereco | POST | 创建地址 |
//! | /endereco/cliente/{clienteId} | GET | 客户的全部地址 |
//! | /endereco/{id} | PUT | 更新地址 |
//! | /endereco/{id} | DELETE | 删除地址 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/endereco", post(handler::create))
        .route("/endereco/cliente/{cliente_id}", get(handler::list_by_cliente))
        .route(
            "/endereco/{id}",
            put(handler::update).delete(handler::delete),
        )
}
