//! Cliente Repository

use super::{RepoError, RepoResult};
use shared::models::{Cliente, ClienteCreate};
use sqlx::SqlitePool;

const CLIENTE_SELECT: &str =
    "SELECT id, nome, email, senha_hash, telefone, data_cadastro FROM cliente";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Cliente>> {
    let sql = format!("{CLIENTE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Cliente>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Cliente>> {
    let sql = format!("{CLIENTE_SELECT} WHERE email = ?");
    let row = sqlx::query_as::<_, Cliente>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Create a cliente. `senha_hash` must already be argon2-hashed.
pub async fn create(
    pool: &SqlitePool,
    data: ClienteCreate,
    senha_hash: &str,
) -> RepoResult<Cliente> {
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate("Este email já está em uso.".into()));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO cliente (id, nome, email, senha_hash, telefone, data_cadastro) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.nome)
    .bind(&data.email)
    .bind(senha_hash)
    .bind(&data.telefone)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create cliente".into()))
}

/// Existence check used by workflows that only need the FK to be valid
pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM cliente WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn maria() -> ClienteCreate {
        ClienteCreate {
            nome: "Maria Silva".into(),
            email: "maria@example.com".into(),
            senha: "s3nh4-forte".into(),
            telefone: Some("11999990000".into()),
        }
    }

    #[tokio::test]
    async fn create_and_find() {
        let pool = test_pool().await;
        let cliente = create(&pool, maria(), "$argon2id$fake").await.unwrap();
        assert_eq!(cliente.nome, "Maria Silva");

        let found = find_by_id(&pool, cliente.id).await.unwrap().unwrap();
        assert_eq!(found.email, "maria@example.com");
        assert!(exists(&pool, cliente.id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let pool = test_pool().await;
        create(&pool, maria(), "$argon2id$fake").await.unwrap();
        let err = create(&pool, maria(), "$argon2id$fake").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
