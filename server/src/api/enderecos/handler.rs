//! Endereco API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::endereco;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_ENDERECO_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use shared::models::{Endereco, EnderecoCreate, EnderecoUpdate};

fn validate_create(payload: &EnderecoCreate) -> AppResult<()> {
    validate_required_text(&payload.rua, "rua", MAX_ENDERECO_LEN)?;
    validate_required_text(&payload.numero, "numero", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.complemento, "complemento", MAX_ENDERECO_LEN)?;
    validate_required_text(&payload.bairro, "bairro", MAX_ENDERECO_LEN)?;
    validate_required_text(&payload.cidade, "cidade", MAX_ENDERECO_LEN)?;
    validate_required_text(&payload.estado, "estado", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.cep, "cep", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// POST /endereco - 创建地址
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EnderecoCreate>,
) -> AppResult<(StatusCode, Json<Endereco>)> {
    validate_create(&payload)?;
    let endereco = endereco::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(endereco)))
}

/// GET /endereco/cliente/:clienteId - 客户的全部地址
pub async fn list_by_cliente(
    State(state): State<ServerState>,
    Path(cliente_id): Path<i64>,
) -> AppResult<Json<Vec<Endereco>>> {
    let enderecos = endereco::find_by_cliente(&state.db, cliente_id).await?;
    Ok(Json(enderecos))
}

/// PUT /endereco/:id - 更新地址
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EnderecoUpdate>,
) -> AppResult<Json<Endereco>> {
    validate_optional_text(&payload.rua, "rua", MAX_ENDERECO_LEN)?;
    validate_optional_text(&payload.cidade, "cidade", MAX_ENDERECO_LEN)?;
    validate_optional_text(&payload.cep, "cep", MAX_SHORT_TEXT_LEN)?;
    let endereco = endereco::update(&state.db, id, payload).await?;
    Ok(Json(endereco))
}

/// DELETE /endereco/:id - 删除地址
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    endereco::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
