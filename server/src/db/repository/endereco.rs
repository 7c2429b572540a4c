//! Endereco Repository

use super::{RepoError, RepoResult};
use shared::models::{Endereco, EnderecoCreate, EnderecoUpdate};
use sqlx::SqlitePool;

const ENDERECO_SELECT: &str = "SELECT id, cliente_id, rua, numero, complemento, bairro, cidade, estado, cep FROM endereco";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Endereco>> {
    let sql = format!("{ENDERECO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Endereco>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_cliente(pool: &SqlitePool, cliente_id: i64) -> RepoResult<Vec<Endereco>> {
    let sql = format!("{ENDERECO_SELECT} WHERE cliente_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, Endereco>(&sql)
        .bind(cliente_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: EnderecoCreate) -> RepoResult<Endereco> {
    if !super::cliente::exists(pool, data.cliente_id).await? {
        return Err(RepoError::NotFound("Cliente não encontrado".into()));
    }

    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO endereco (id, cliente_id, rua, numero, complemento, bairro, cidade, estado, cep) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(data.cliente_id)
    .bind(&data.rua)
    .bind(&data.numero)
    .bind(&data.complemento)
    .bind(&data.bairro)
    .bind(&data.cidade)
    .bind(&data.estado)
    .bind(&data.cep)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create endereco".into()))
}

/// Partial update. Absent fields keep their current values (COALESCE).
pub async fn update(pool: &SqlitePool, id: i64, data: EnderecoUpdate) -> RepoResult<Endereco> {
    let result = sqlx::query(
        "UPDATE endereco SET \
         rua = COALESCE(?1, rua), \
         numero = COALESCE(?2, numero), \
         complemento = COALESCE(?3, complemento), \
         bairro = COALESCE(?4, bairro), \
         cidade = COALESCE(?5, cidade), \
         estado = COALESCE(?6, estado), \
         cep = COALESCE(?7, cep) \
         WHERE id = ?8",
    )
    .bind(&data.rua)
    .bind(&data.numero)
    .bind(&data.complemento)
    .bind(&data.bairro)
    .bind(&data.cidade)
    .bind(&data.estado)
    .bind(&data.cep)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Endereço não encontrado".into()));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound("Endereço não encontrado".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM endereco WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Endereço não encontrado".into()));
    }
    Ok(())
}
