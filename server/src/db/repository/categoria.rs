//! Categoria Repository

use super::{RepoError, RepoResult};
use shared::models::{Categoria, CategoriaCreate, CategoriaUpdate};
use sqlx::SqlitePool;

const CATEGORIA_SELECT: &str = "SELECT id, nome, descricao FROM categoria";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Categoria>> {
    let sql = format!("{CATEGORIA_SELECT} ORDER BY nome");
    let rows = sqlx::query_as::<_, Categoria>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Categoria>> {
    let sql = format!("{CATEGORIA_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Categoria>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CategoriaCreate) -> RepoResult<Categoria> {
    let id = shared::util::snowflake_id();
    sqlx::query("INSERT INTO categoria (id, nome, descricao) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(&data.nome)
        .bind(&data.descricao)
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate("Já existe uma categoria com este nome.".into())
            }
            other => other,
        })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create categoria".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoriaUpdate) -> RepoResult<Categoria> {
    let result = sqlx::query(
        "UPDATE categoria SET nome = COALESCE(?1, nome), descricao = COALESCE(?2, descricao) WHERE id = ?3",
    )
    .bind(&data.nome)
    .bind(&data.descricao)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate("Já existe uma categoria com este nome.".into())
        }
        other => other,
    })?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Categoria não encontrada".into()));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound("Categoria não encontrada".into()))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM categoria WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Categoria não encontrada".into()));
    }
    Ok(())
}
