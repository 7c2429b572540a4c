//! Pedido API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::pedido;
use crate::pedidos::workflow;
use crate::utils::{AppError, AppResult};
use shared::models::{AtualizarStatusPedido, CreatePedido, Pedido, PedidoDetalhe};

/// POST /pedido - 下单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreatePedido>,
) -> AppResult<(StatusCode, Json<PedidoDetalhe>)> {
    let detalhe = workflow::criar_pedido(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(detalhe)))
}

/// GET /pedido/:id - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PedidoDetalhe>> {
    let detalhe = pedido::find_detalhe(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Pedido não encontrado"))?;
    Ok(Json(detalhe))
}

/// GET /pedido/cliente/:clienteId - 客户订单列表
pub async fn list_by_cliente(
    State(state): State<ServerState>,
    Path(cliente_id): Path<i64>,
) -> AppResult<Json<Vec<Pedido>>> {
    let pedidos = pedido::find_by_cliente(&state.db, cliente_id).await?;
    Ok(Json(pedidos))
}

/// PATCH /pedido/:id/status - 管理性状态覆写
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AtualizarStatusPedido>,
) -> AppResult<Json<Pedido>> {
    let pedido = workflow::atualizar_status(&state.db, id, payload.status).await?;
    Ok(Json(pedido))
}
