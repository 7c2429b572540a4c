//! 订单工作流
//!
//! 三个入口，各自一个事务，失败即整体回滚：
//!
//! | 操作 | 事务内容 |
//! |------|----------|
//! | [`criar_pedido`] | 预留每个商品的库存 + 写入订单和条目 |
//! | [`processar_pagamento`] | 扣减/释放库存 + 状态转移 + 写支付记录 |
//! | [`atualizar_status`] | 非终态订单的管理性状态覆写（不碰库存） |

use crate::db::repository;
use crate::utils::{AppError, AppResult, validation};
use shared::models::{
    CreatePedido, Pagamento, Pedido, PedidoDetalhe, PedidoStatus, ProcessarPagamento,
};
use shared::money;
use sqlx::SqlitePool;

/// Create a pedido in AGUARDANDO_PAGAMENTO, reserving stock for every item.
pub async fn criar_pedido(pool: &SqlitePool, data: CreatePedido) -> AppResult<PedidoDetalhe> {
    if data.itens.is_empty() {
        return Err(AppError::validation("O pedido deve conter ao menos um item"));
    }
    for item in &data.itens {
        validation::validate_quantidade(item.quantidade)?;
    }

    if !repository::cliente::exists(pool, data.cliente_id).await? {
        return Err(AppError::not_found("Cliente não encontrado"));
    }
    let endereco = repository::endereco::find_by_id(pool, data.endereco_id)
        .await?
        .filter(|e| e.cliente_id == data.cliente_id)
        .ok_or_else(|| AppError::not_found("Endereço não encontrado"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let pedido_id = repository::pedido::insert_shell(&mut tx, data.cliente_id, endereco.id).await?;

    let mut subtotal_centavos: i64 = 0;
    let mut quantidade_total: i64 = 0;
    for item in &data.itens {
        repository::produto::reservar(&mut tx, item.produto_id, item.quantidade).await?;

        // Price captured at order time; reservar guarantees the produto exists
        let preco_centavos = repository::produto::preco_tx(&mut tx, item.produto_id).await?;

        repository::pedido::insert_item(
            &mut tx,
            pedido_id,
            item.produto_id,
            item.quantidade,
            preco_centavos,
        )
        .await?;

        subtotal_centavos += preco_centavos * item.quantidade;
        quantidade_total += item.quantidade;
    }

    // No freight or discounts: total equals the item subtotal
    repository::pedido::update_totais(
        &mut tx,
        pedido_id,
        subtotal_centavos,
        subtotal_centavos,
        quantidade_total,
    )
    .await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        pedido_id,
        cliente_id = data.cliente_id,
        total = %money::centavos_para_decimal(subtotal_centavos),
        "Pedido criado"
    );

    repository::pedido::find_detalhe(pool, pedido_id)
        .await?
        .ok_or_else(|| AppError::internal("Pedido desapareceu após a criação"))
}

/// Resolve an AGUARDANDO_PAGAMENTO pedido into PAGO or CANCELADO.
///
/// PAGO debits stock for every item; CANCELADO only releases the
/// reservations. Either way the reservation is gone afterwards. The
/// recorded valor is always the pedido total, whatever the caller sent.
pub async fn processar_pagamento(
    pool: &SqlitePool,
    data: ProcessarPagamento,
) -> AppResult<Pagamento> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let row = repository::pedido::find_row_tx(&mut tx, data.pedido_id)
        .await?
        .ok_or_else(|| AppError::not_found("Pedido não encontrado"))?;

    let status = PedidoStatus::parse(&row.status)
        .ok_or_else(|| AppError::internal("Status de pedido inválido no banco"))?;
    if status != PedidoStatus::AguardandoPagamento {
        return Err(AppError::invalid_state(format!(
            "Pedido não está aguardando pagamento (status atual: {status})"
        )));
    }

    let itens = repository::pedido::itens_do_pedido(&mut tx, data.pedido_id).await?;

    let novo_status = match data.novo_status {
        shared::models::PagamentoStatus::Pago => {
            for item in &itens {
                repository::produto::debitar(&mut tx, item.produto_id, item.quantidade).await?;
            }
            PedidoStatus::Pago
        }
        shared::models::PagamentoStatus::Cancelado => {
            for item in &itens {
                repository::produto::liberar(&mut tx, item.produto_id, item.quantidade).await?;
            }
            PedidoStatus::Cancelado
        }
    };

    let transicionou = repository::pedido::transition_status(
        &mut tx,
        data.pedido_id,
        PedidoStatus::AguardandoPagamento,
        novo_status,
    )
    .await?;
    if !transicionou {
        // Lost a race with another payment or the sweeper
        return Err(AppError::invalid_state(
            "Pedido não está aguardando pagamento",
        ));
    }

    let pagamento = repository::pagamento::insert(
        &mut tx,
        data.pedido_id,
        data.metodo,
        row.total_centavos,
        data.novo_status,
    )
    .await?;

    tx.commit()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        pedido_id = data.pedido_id,
        metodo = data.metodo.as_str(),
        status = novo_status.as_str(),
        "Pagamento processado"
    );

    Ok(pagamento)
}

/// Administrative status overwrite. Terminal pedidos are immutable; this
/// route never touches the stock ledger.
pub async fn atualizar_status(
    pool: &SqlitePool,
    pedido_id: i64,
    novo_status: PedidoStatus,
) -> AppResult<Pedido> {
    let row = repository::pedido::find_row(pool, pedido_id)
        .await?
        .ok_or_else(|| AppError::not_found("Pedido não encontrado"))?;
    let atual = PedidoStatus::parse(&row.status)
        .ok_or_else(|| AppError::internal("Status de pedido inválido no banco"))?;

    if atual.is_terminal() {
        return Err(AppError::invalid_state(
            "Não é possível alterar o status de um pedido pago ou cancelado",
        ));
    }

    // The write is conditional on the pedido still being non-terminal;
    // a payment or sweep committing after the read above wins the race
    let atualizou = repository::pedido::update_status(pool, pedido_id, novo_status).await?;
    if !atualizou {
        return Err(AppError::invalid_state(
            "Não é possível alterar o status de um pedido pago ou cancelado",
        ));
    }

    let row = repository::pedido::find_row(pool, pedido_id)
        .await?
        .ok_or_else(|| AppError::not_found("Pedido não encontrado"))?;
    row.into_pedido()
        .ok_or_else(|| AppError::internal("Status de pedido inválido no banco"))
}
