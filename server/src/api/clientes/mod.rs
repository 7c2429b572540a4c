//! Cliente API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /cliente | POST | 注册客户（senha 以 argon2 哈希存储） |
//! | /cliente/{id} | GET | 查询客户 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/cliente", post(handler::create))
        .route("/cliente/{id}", get(handler::get_by_id))
}
