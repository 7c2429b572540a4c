//! Carrinho API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::carrinho;
use crate::utils::AppResult;
use crate::utils::validation::validate_quantidade;
use shared::models::{AddItemCarrinho, Carrinho, UpdateItemCarrinho};

/// GET /carrinho/:clienteId - 查看购物车
pub async fn get_cart(
    State(state): State<ServerState>,
    Path(cliente_id): Path<i64>,
) -> AppResult<Json<Carrinho>> {
    let carrinho = carrinho::find_or_create(&state.db, cliente_id).await?;
    Ok(Json(carrinho))
}

/// POST /carrinho/:clienteId/item - 加入商品
pub async fn add_item(
    State(state): State<ServerState>,
    Path(cliente_id): Path<i64>,
    Json(payload): Json<AddItemCarrinho>,
) -> AppResult<Json<Carrinho>> {
    validate_quantidade(payload.quantidade)?;
    let carrinho = carrinho::add_item(&state.db, cliente_id, payload).await?;
    Ok(Json(carrinho))
}

/// PATCH /carrinho/:clienteId/item/:itemId - 修改数量
pub async fn update_item(
    State(state): State<ServerState>,
    Path((cliente_id, item_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateItemCarrinho>,
) -> AppResult<Json<Carrinho>> {
    validate_quantidade(payload.quantidade)?;
    let carrinho = carrinho::update_item(&state.db, cliente_id, item_id, payload.quantidade).await?;
    Ok(Json(carrinho))
}

/// DELETE /carrinho/:clienteId/item/:itemId - 移除条目
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((cliente_id, item_id)): Path<(i64, i64)>,
) -> AppResult<Json<Carrinho>> {
    let carrinho = carrinho::remove_item(&state.db, cliente_id, item_id).await?;
    Ok(Json(carrinho))
}

/// DELETE /carrinho/:clienteId - 清空购物车
pub async fn clear(
    State(state): State<ServerState>,
    Path(cliente_id): Path<i64>,
) -> AppResult<StatusCode> {
    carrinho::clear(&state.db, cliente_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
