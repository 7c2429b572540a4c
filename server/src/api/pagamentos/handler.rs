//! Pagamento API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::pagamento;
use crate::pedidos::workflow;
use crate::utils::AppResult;
use shared::models::{Pagamento, ProcessarPagamento};

/// POST /pagamento/processar - 处理支付
pub async fn processar(
    State(state): State<ServerState>,
    Json(payload): Json<ProcessarPagamento>,
) -> AppResult<Json<Pagamento>> {
    let pagamento = workflow::processar_pagamento(&state.db, payload).await?;
    Ok(Json(pagamento))
}

/// GET /pagamento/pedido/:pedidoId - 订单的支付记录
pub async fn list_by_pedido(
    State(state): State<ServerState>,
    Path(pedido_id): Path<i64>,
) -> AppResult<Json<Vec<Pagamento>>> {
    let pagamentos = pagamento::find_by_pedido(&state.db, pedido_id).await?;
    Ok(Json(pagamentos))
}
