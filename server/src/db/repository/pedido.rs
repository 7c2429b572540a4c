//! Pedido Repository
//!
//! 订单的写路径都在调用方的事务里进行（预留库存和写入订单必须原子），
//! 读路径直接用连接池。

use super::{RepoError, RepoResult};
use shared::models::{
    Endereco, ItemPedidoDetalhe, ItemPedidoRow, Pedido, PedidoDetalhe, PedidoRow, PedidoStatus,
    Produto, ProdutoRow,
};
use shared::money;
use sqlx::{Sqlite, SqlitePool};

const PEDIDO_SELECT: &str = "SELECT id, cliente_id, endereco_id, subtotal_centavos, total_centavos, quantidade_total, data_criacao, status FROM pedido";

const ITEM_SELECT: &str = "SELECT id, pedido_id, produto_id, quantidade, preco_venda_centavos, subtotal_centavos FROM item_pedido";

// ========== Write path (inside the caller's transaction) ==========

/// Insert the pedido shell in AGUARDANDO_PAGAMENTO; totals come later.
pub async fn insert_shell(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    cliente_id: i64,
    endereco_id: i64,
) -> RepoResult<i64> {
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO pedido (id, cliente_id, endereco_id, data_criacao, status) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(id)
    .bind(cliente_id)
    .bind(endereco_id)
    .bind(shared::util::now_millis())
    .bind(PedidoStatus::AguardandoPagamento.as_str())
    .execute(&mut **tx)
    .await?;
    Ok(id)
}

pub async fn insert_item(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    pedido_id: i64,
    produto_id: i64,
    quantidade: i64,
    preco_venda_centavos: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO item_pedido (id, pedido_id, produto_id, quantidade, preco_venda_centavos, subtotal_centavos) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(shared::util::snowflake_id())
    .bind(pedido_id)
    .bind(produto_id)
    .bind(quantidade)
    .bind(preco_venda_centavos)
    .bind(preco_venda_centavos * quantidade)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn update_totais(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    pedido_id: i64,
    subtotal_centavos: i64,
    total_centavos: i64,
    quantidade_total: i64,
) -> RepoResult<()> {
    sqlx::query(
        "UPDATE pedido SET subtotal_centavos = ?1, total_centavos = ?2, quantidade_total = ?3 WHERE id = ?4",
    )
    .bind(subtotal_centavos)
    .bind(total_centavos)
    .bind(quantidade_total)
    .bind(pedido_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Conditional status transition inside a transaction.
///
/// Returns `false` when the pedido is no longer in `de` (someone else won
/// the race); the caller decides whether that is an error.
pub async fn transition_status(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    pedido_id: i64,
    de: PedidoStatus,
    para: PedidoStatus,
) -> RepoResult<bool> {
    let result = sqlx::query("UPDATE pedido SET status = ?1 WHERE id = ?2 AND status = ?3")
        .bind(para.as_str())
        .bind(pedido_id)
        .bind(de.as_str())
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Administrative status write. Conditional on the pedido not being
/// terminal, so a payment or sweep committing concurrently can never be
/// overwritten. Returns `false` when no non-terminal row matched.
pub async fn update_status(
    pool: &SqlitePool,
    pedido_id: i64,
    status: PedidoStatus,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE pedido SET status = ?1 WHERE id = ?2 AND status NOT IN (?3, ?4)",
    )
    .bind(status.as_str())
    .bind(pedido_id)
    .bind(PedidoStatus::Pago.as_str())
    .bind(PedidoStatus::Cancelado.as_str())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn itens_do_pedido(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    pedido_id: i64,
) -> RepoResult<Vec<ItemPedidoRow>> {
    let sql = format!("{ITEM_SELECT} WHERE pedido_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, ItemPedidoRow>(&sql)
        .bind(pedido_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows)
}

/// Row fetch inside a transaction (status re-check before a transition).
pub async fn find_row_tx(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    pedido_id: i64,
) -> RepoResult<Option<PedidoRow>> {
    let sql = format!("{PEDIDO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PedidoRow>(&sql)
        .bind(pedido_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

// ========== Read path ==========

pub async fn find_row(pool: &SqlitePool, pedido_id: i64) -> RepoResult<Option<PedidoRow>> {
    let sql = format!("{PEDIDO_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, PedidoRow>(&sql)
        .bind(pedido_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_cliente(pool: &SqlitePool, cliente_id: i64) -> RepoResult<Vec<Pedido>> {
    let sql = format!("{PEDIDO_SELECT} WHERE cliente_id = ? ORDER BY data_criacao DESC");
    let rows = sqlx::query_as::<_, PedidoRow>(&sql)
        .bind(cliente_id)
        .fetch_all(pool)
        .await?;
    rows.into_iter()
        .map(|row| {
            row.into_pedido()
                .ok_or_else(|| RepoError::Database("Invalid pedido status in database".into()))
        })
        .collect()
}

/// Full detail view: pedido + endereco + itens with produtos.
pub async fn find_detalhe(pool: &SqlitePool, pedido_id: i64) -> RepoResult<Option<PedidoDetalhe>> {
    let Some(row) = find_row(pool, pedido_id).await? else {
        return Ok(None);
    };
    let pedido = row
        .into_pedido()
        .ok_or_else(|| RepoError::Database("Invalid pedido status in database".into()))?;

    let endereco: Endereco = sqlx::query_as(
        "SELECT id, cliente_id, rua, numero, complemento, bairro, cidade, estado, cep FROM endereco WHERE id = ?",
    )
    .bind(pedido.endereco_id)
    .fetch_one(pool)
    .await?;

    let item_sql = format!("{ITEM_SELECT} WHERE pedido_id = ? ORDER BY id");
    let item_rows = sqlx::query_as::<_, ItemPedidoRow>(&item_sql)
        .bind(pedido_id)
        .fetch_all(pool)
        .await?;

    let mut itens = Vec::with_capacity(item_rows.len());
    for item in item_rows {
        let produto: ProdutoRow = sqlx::query_as(
            "SELECT id, nome, descricao, preco_centavos, estoque, reservado, imagem, status_ativo, categoria_id \
             FROM produto WHERE id = ?",
        )
        .bind(item.produto_id)
        .fetch_one(pool)
        .await?;
        itens.push(ItemPedidoDetalhe {
            id: item.id,
            produto: Produto::from(produto),
            quantidade: item.quantidade,
            preco_venda: money::centavos_para_decimal(item.preco_venda_centavos),
            subtotal: money::centavos_para_decimal(item.subtotal_centavos),
        });
    }

    Ok(Some(PedidoDetalhe {
        id: pedido.id,
        cliente_id: pedido.cliente_id,
        endereco,
        subtotal: pedido.subtotal,
        total: pedido.total,
        quantidade_total: pedido.quantidade_total,
        data_criacao: pedido.data_criacao,
        status: pedido.status,
        itens,
    }))
}

/// Ids of AGUARDANDO_PAGAMENTO pedidos created before `cutoff_millis`.
pub async fn expirados(pool: &SqlitePool, cutoff_millis: i64) -> RepoResult<Vec<i64>> {
    let ids: Vec<i64> = sqlx::query_scalar(
        "SELECT id FROM pedido WHERE status = ?1 AND data_criacao < ?2 ORDER BY data_criacao",
    )
    .bind(PedidoStatus::AguardandoPagamento.as_str())
    .bind(cutoff_millis)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}
