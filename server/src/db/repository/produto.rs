//! Produto Repository
//!
//! CRUD 之外还包含库存账本的三个事务内助手:
//!
//! | 操作 | 效果 | 条件 |
//! |------|------|------|
//! | [`reservar`] | `reservado += q` | `estoque - reservado >= q` 且商品激活 |
//! | [`liberar`] | `reservado -= q` (floor 0) | 无 |
//! | [`debitar`] | `estoque -= q, reservado -= q` (floor 0) | `estoque >= q` |
//!
//! 三者都是单条条件 UPDATE，0 行受影响即条件不满足，杜绝读后写竞态。

use super::{RepoError, RepoResult};
use shared::models::{Produto, ProdutoCreate, ProdutoFiltro, ProdutoRow, ProdutoUpdate};
use shared::money;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const PRODUTO_SELECT: &str = "SELECT id, nome, descricao, preco_centavos, estoque, reservado, imagem, status_ativo, categoria_id FROM produto";

// ========== CRUD ==========

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Produto>> {
    let sql = format!("{PRODUTO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ProdutoRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Produto::from))
}

/// List active products, applying the optional catalog filters.
pub async fn find_all(pool: &SqlitePool, filtro: &ProdutoFiltro) -> RepoResult<Vec<Produto>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(PRODUTO_SELECT);
    qb.push(" WHERE status_ativo = 1");

    if let Some(nome) = &filtro.nome
        && !nome.trim().is_empty()
    {
        qb.push(" AND nome LIKE ");
        qb.push_bind(format!("%{}%", nome.trim()));
    }
    if let Some(categoria_id) = filtro.categoria_id {
        qb.push(" AND categoria_id = ");
        qb.push_bind(categoria_id);
    }
    if let Some(min_preco) = filtro.min_preco {
        let centavos =
            money::decimal_para_centavos(min_preco).map_err(|e| RepoError::Validation(e.to_string()))?;
        qb.push(" AND preco_centavos >= ");
        qb.push_bind(centavos);
    }
    if let Some(max_preco) = filtro.max_preco {
        let centavos =
            money::decimal_para_centavos(max_preco).map_err(|e| RepoError::Validation(e.to_string()))?;
        qb.push(" AND preco_centavos <= ");
        qb.push_bind(centavos);
    }
    qb.push(" ORDER BY nome");

    let rows: Vec<ProdutoRow> = qb.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().map(Produto::from).collect())
}

pub async fn create(pool: &SqlitePool, data: ProdutoCreate) -> RepoResult<Produto> {
    if super::categoria::find_by_id(pool, data.categoria_id)
        .await?
        .is_none()
    {
        return Err(RepoError::Validation("Categoria não encontrada".into()));
    }

    let preco_centavos =
        money::decimal_para_centavos(data.preco).map_err(|e| RepoError::Validation(e.to_string()))?;
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO produto (id, nome, descricao, preco_centavos, estoque, imagem, categoria_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, 'placeholder.png'), ?7)",
    )
    .bind(id)
    .bind(&data.nome)
    .bind(&data.descricao)
    .bind(preco_centavos)
    .bind(data.estoque.unwrap_or(0))
    .bind(&data.imagem)
    .bind(data.categoria_id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create produto".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProdutoUpdate) -> RepoResult<Produto> {
    if let Some(categoria_id) = data.categoria_id
        && super::categoria::find_by_id(pool, categoria_id).await?.is_none()
    {
        return Err(RepoError::Validation("Categoria não encontrada".into()));
    }

    let preco_centavos = match data.preco {
        Some(p) => {
            Some(money::decimal_para_centavos(p).map_err(|e| RepoError::Validation(e.to_string()))?)
        }
        None => None,
    };

    let result = sqlx::query(
        "UPDATE produto SET \
         nome = COALESCE(?1, nome), \
         descricao = COALESCE(?2, descricao), \
         preco_centavos = COALESCE(?3, preco_centavos), \
         estoque = COALESCE(?4, estoque), \
         imagem = COALESCE(?5, imagem), \
         status_ativo = COALESCE(?6, status_ativo), \
         categoria_id = COALESCE(?7, categoria_id) \
         WHERE id = ?8",
    )
    .bind(&data.nome)
    .bind(&data.descricao)
    .bind(preco_centavos)
    .bind(data.estoque)
    .bind(&data.imagem)
    .bind(data.status_ativo)
    .bind(data.categoria_id)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Produto não encontrado".into()));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound("Produto não encontrado".into()))
}

/// Soft delete: the produto stays referenced by old pedidos/carrinhos.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("UPDATE produto SET status_ativo = 0 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Produto não encontrado".into()));
    }
    Ok(())
}

// ========== Stock ledger (transaction helpers) ==========

/// Current unit price in centavos, read inside the caller's transaction
/// (order creation captures it together with the reservation).
pub async fn preco_tx(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    produto_id: i64,
) -> RepoResult<i64> {
    let preco: Option<i64> = sqlx::query_scalar("SELECT preco_centavos FROM produto WHERE id = ?")
        .bind(produto_id)
        .fetch_optional(&mut **tx)
        .await?;
    preco.ok_or_else(|| RepoError::NotFound("Produto não encontrado".into()))
}

/// Reserve `quantidade` units for an unpaid pedido.
///
/// Fails with [`RepoError::OutOfStock`] when the available amount
/// (`estoque - reservado`) is insufficient, and [`RepoError::NotFound`]
/// when the produto does not exist or is inactive.
pub async fn reservar(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    produto_id: i64,
    quantidade: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE produto SET reservado = reservado + ?1 \
         WHERE id = ?2 AND status_ativo = 1 AND estoque - reservado >= ?1",
    )
    .bind(quantidade)
    .bind(produto_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    // The conditional UPDATE matched nothing: decide which failure it was
    let row: Option<(i64, i64, bool)> = sqlx::query_as(
        "SELECT estoque, reservado, status_ativo FROM produto WHERE id = ?",
    )
    .bind(produto_id)
    .fetch_optional(&mut **tx)
    .await?;

    match row {
        Some((estoque, reservado, true)) => Err(RepoError::OutOfStock(format!(
            "Estoque insuficiente. Disponível: {}",
            estoque - reservado
        ))),
        _ => Err(RepoError::NotFound("Produto não encontrado".into())),
    }
}

/// Release a reservation (cancel or expiration). Floors at zero.
pub async fn liberar(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    produto_id: i64,
    quantidade: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE produto SET reservado = MAX(reservado - ?1, 0) WHERE id = ?2")
        .bind(quantidade)
        .bind(produto_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Debit paid units: decrements both `estoque` and the matching reservation.
pub async fn debitar(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    produto_id: i64,
    quantidade: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        "UPDATE produto SET estoque = estoque - ?1, reservado = MAX(reservado - ?1, 0) \
         WHERE id = ?2 AND estoque >= ?1",
    )
    .bind(quantidade)
    .bind(produto_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 1 {
        return Ok(());
    }

    let estoque: Option<i64> = sqlx::query_scalar("SELECT estoque FROM produto WHERE id = ?")
        .bind(produto_id)
        .fetch_optional(&mut **tx)
        .await?;

    match estoque {
        Some(estoque) => Err(RepoError::OutOfStock(format!(
            "Estoque insuficiente. Disponível: {estoque}"
        ))),
        None => Err(RepoError::NotFound("Produto não encontrado".into())),
    }
}
