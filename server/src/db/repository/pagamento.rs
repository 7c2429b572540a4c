//! Pagamento Repository

use super::{RepoError, RepoResult};
use shared::models::{MetodoPagamento, Pagamento, PagamentoRow, PagamentoStatus};
use sqlx::{Sqlite, SqlitePool};

const PAGAMENTO_SELECT: &str =
    "SELECT id, pedido_id, metodo, valor_centavos, status, data_criacao FROM pagamento";

/// Insert the immutable payment record inside the workflow's transaction.
pub async fn insert(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    pedido_id: i64,
    metodo: MetodoPagamento,
    valor_centavos: i64,
    status: PagamentoStatus,
) -> RepoResult<Pagamento> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO pagamento (id, pedido_id, metodo, valor_centavos, status, data_criacao) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(pedido_id)
    .bind(metodo.as_str())
    .bind(valor_centavos)
    .bind(status.as_str())
    .bind(now)
    .execute(&mut **tx)
    .await?;

    let sql = format!("{PAGAMENTO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PagamentoRow>(&sql)
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;
    row.into_pagamento()
        .ok_or_else(|| RepoError::Database("Invalid pagamento row".into()))
}

pub async fn find_by_pedido(pool: &SqlitePool, pedido_id: i64) -> RepoResult<Vec<Pagamento>> {
    let sql = format!("{PAGAMENTO_SELECT} WHERE pedido_id = ? ORDER BY data_criacao");
    let rows = sqlx::query_as::<_, PagamentoRow>(&sql)
        .bind(pedido_id)
        .fetch_all(pool)
        .await?;
    rows.into_iter()
        .map(|row| {
            row.into_pagamento()
                .ok_or_else(|| RepoError::Database("Invalid pagamento row".into()))
        })
        .collect()
}
