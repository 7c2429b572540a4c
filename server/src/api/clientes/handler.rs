//! Cliente API Handlers

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::repository::cliente;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NOME_LEN, MAX_SENHA_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Cliente, ClienteCreate};

/// POST /cliente - 注册客户
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClienteCreate>,
) -> AppResult<(StatusCode, Json<Cliente>)> {
    validate_required_text(&payload.nome, "nome", MAX_NOME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.senha, "senha", MAX_SENHA_LEN)?;
    validate_optional_text(&payload.telefone, "telefone", MAX_SHORT_TEXT_LEN)?;
    if !payload.email.contains('@') {
        return Err(AppError::validation("email inválido"));
    }

    let salt = SaltString::generate(&mut OsRng);
    let senha_hash = Argon2::default()
        .hash_password(payload.senha.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?
        .to_string();

    let cliente = cliente::create(&state.db, payload, &senha_hash).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

/// GET /cliente/:id - 查询客户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Cliente>> {
    let cliente = cliente::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cliente não encontrado"))?;
    Ok(Json(cliente))
}
