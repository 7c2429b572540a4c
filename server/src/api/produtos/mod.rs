//! Produto API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /produto | POST | 创建商品 |
//! | /produto | GET | 商品列表（nome/categoriaId/minPreco/maxPreco 过滤） |
//! | /produto/{id} | GET | 查询商品 |
//! | /produto/{id} | PUT | 更新商品 |
//! | /produto/{id} | DELETE | 下架（软删除） |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/produto", get(handler::list).post(handler::create))
        .route(
            "/produto/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
