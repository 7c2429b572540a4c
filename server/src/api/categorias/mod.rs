//! Categoria API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /categoria | POST | 创建分类 |
//! | /categoria | GET | 全部分类 |
//! | /categoria/{id} | GET | 查询分类 |
//! | /categoria/{id} | PUT | 更新分类 |
//! | /categoria/{id} | DELETE | 删除分类 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/categoria", get(handler::list).post(handler::create))
        .route(
            "/categoria/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
