//! Produto API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::produto;
use crate::utils::validation::{
    MAX_DESCRICAO_LEN, MAX_IMAGEM_LEN, MAX_NOME_LEN, validate_estoque, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Produto, ProdutoCreate, ProdutoFiltro, ProdutoUpdate};

/// POST /produto - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProdutoCreate>,
) -> AppResult<(StatusCode, Json<Produto>)> {
    validate_required_text(&payload.nome, "nome", MAX_NOME_LEN)?;
    validate_optional_text(&payload.descricao, "descricao", MAX_DESCRICAO_LEN)?;
    validate_optional_text(&payload.imagem, "imagem", MAX_IMAGEM_LEN)?;
    if let Some(estoque) = payload.estoque {
        validate_estoque(estoque)?;
    }
    let produto = produto::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(produto)))
}

/// GET /produto - 商品列表，支持过滤
pub async fn list(
    State(state): State<ServerState>,
    Query(filtro): Query<ProdutoFiltro>,
) -> AppResult<Json<Vec<Produto>>> {
    let produtos = produto::find_all(&state.db, &filtro).await?;
    Ok(Json(produtos))
}

/// GET /produto/:id - 查询商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Produto>> {
    let produto = produto::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Produto não encontrado"))?;
    Ok(Json(produto))
}

/// PUT /produto/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ProdutoUpdate>,
) -> AppResult<Json<Produto>> {
    validate_optional_text(&payload.nome, "nome", MAX_NOME_LEN)?;
    validate_optional_text(&payload.descricao, "descricao", MAX_DESCRICAO_LEN)?;
    validate_optional_text(&payload.imagem, "imagem", MAX_IMAGEM_LEN)?;
    if let Some(estoque) = payload.estoque {
        validate_estoque(estoque)?;
    }
    let produto = produto::update(&state.db, id, payload).await?;
    Ok(Json(produto))
}

/// DELETE /produto/:id - 下架商品
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    produto::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
