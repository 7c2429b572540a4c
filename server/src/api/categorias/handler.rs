//! Categoria API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::categoria;
use crate::utils::validation::{
    MAX_DESCRICAO_LEN, MAX_NOME_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Categoria, CategoriaCreate, CategoriaUpdate};

/// POST /categoria - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoriaCreate>,
) -> AppResult<(StatusCode, Json<Categoria>)> {
    validate_required_text(&payload.nome, "nome", MAX_NOME_LEN)?;
    validate_optional_text(&payload.descricao, "descricao", MAX_DESCRICAO_LEN)?;
    let categoria = categoria::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

/// GET /categoria - 全部分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Categoria>>> {
    let categorias = categoria::find_all(&state.db).await?;
    Ok(Json(categorias))
}

/// GET /categoria/:id - 查询分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Categoria>> {
    let categoria = categoria::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Categoria não encontrada"))?;
    Ok(Json(categoria))
}

/// PUT /categoria/:id - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoriaUpdate>,
) -> AppResult<Json<Categoria>> {
    validate_optional_text(&payload.nome, "nome", MAX_NOME_LEN)?;
    validate_optional_text(&payload.descricao, "descricao", MAX_DESCRICAO_LEN)?;
    let categoria = categoria::update(&state.db, id, payload).await?;
    Ok(Json(categoria))
}

/// DELETE /categoria/:id - 删除分类
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    categoria::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
