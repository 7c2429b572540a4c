//! 订单工作流集成测试
//!
//! 覆盖库存账本边界、支付终态、下单原子性和过期清理的幂等性。

mod common;

use loja_server::AppError;
use loja_server::pedidos::ExpirationSweeper;
use loja_server::pedidos::workflow;
use rust_decimal::Decimal;
use shared::models::{
    CreatePedido, ItemPedidoInput, MetodoPagamento, PagamentoStatus, PedidoStatus,
    ProcessarPagamento,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn pedido_de(fixture: &common::Fixture, quantidade: i64) -> CreatePedido {
    CreatePedido {
        cliente_id: fixture.cliente_id,
        endereco_id: fixture.endereco_id,
        itens: vec![ItemPedidoInput {
            produto_id: fixture.produto_id,
            quantidade,
        }],
    }
}

fn pagamento_de(pedido_id: i64, novo_status: PagamentoStatus) -> ProcessarPagamento {
    ProcessarPagamento {
        pedido_id,
        metodo: MetodoPagamento::Pix,
        valor: Decimal::new(1, 2), // ignored; the pedido total wins
        novo_status,
    }
}

#[tokio::test]
async fn reservation_never_exceeds_stock() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    workflow::criar_pedido(&state.db, pedido_de(&fixture, 7))
        .await
        .unwrap();

    let err = workflow::criar_pedido(&state.db, pedido_de(&fixture, 4))
        .await
        .unwrap_err();
    match err {
        AppError::OutOfStock(msg) => assert!(msg.contains("Disponível: 3"), "got: {msg}"),
        other => panic!("expected OutOfStock, got {other}"),
    }

    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 7));
}

#[tokio::test]
async fn order_creation_is_all_or_nothing() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    // Second line exceeds what the first line leaves available
    let err = workflow::criar_pedido(
        &state.db,
        CreatePedido {
            cliente_id: fixture.cliente_id,
            endereco_id: fixture.endereco_id,
            itens: vec![
                ItemPedidoInput {
                    produto_id: fixture.produto_id,
                    quantidade: 6,
                },
                ItemPedidoInput {
                    produto_id: fixture.produto_id,
                    quantidade: 5,
                },
            ],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::OutOfStock(_)));

    // Nothing was persisted, not even the first line's reservation
    let pedidos = loja_server::db::repository::pedido::find_by_cliente(&state.db, fixture.cliente_id)
        .await
        .unwrap();
    assert!(pedidos.is_empty());
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 0));
}

#[tokio::test]
async fn paid_order_debits_stock_and_releases_reservation() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 4))
        .await
        .unwrap();
    assert_eq!(pedido.status, PedidoStatus::AguardandoPagamento);
    assert_eq!(pedido.total, Decimal::new(79960, 2)); // 4 x 199.90
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 4));

    let pagamento =
        workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Pago))
            .await
            .unwrap();
    // The recorded valor is the pedido total, not what the caller sent
    assert_eq!(pagamento.valor, pedido.total);
    assert_eq!(pagamento.status, PagamentoStatus::Pago);

    assert_eq!(common::ledger(&state, fixture.produto_id).await, (6, 0));

    let detalhe = loja_server::db::repository::pedido::find_detalhe(&state.db, pedido.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detalhe.status, PedidoStatus::Pago);
}

#[tokio::test]
async fn cancelled_payment_releases_without_debiting() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 4))
        .await
        .unwrap();
    workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Cancelado))
        .await
        .unwrap();

    // Stock untouched, reservation fully released
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 0));

    let detalhe = loja_server::db::repository::pedido::find_detalhe(&state.db, pedido.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detalhe.status, PedidoStatus::Cancelado);
}

#[tokio::test]
async fn second_payment_is_rejected() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 2))
        .await
        .unwrap();
    workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Pago))
        .await
        .unwrap();

    let err =
        workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Pago))
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // No double debit
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (8, 0));
}

#[tokio::test]
async fn terminal_pedidos_reject_status_updates() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 1))
        .await
        .unwrap();
    workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Cancelado))
        .await
        .unwrap();

    let err = workflow::atualizar_status(&state.db, pedido.id, PedidoStatus::Aberto)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let err = workflow::atualizar_status(&state.db, 404, PedidoStatus::Aberto)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn admin_write_cannot_resurrect_a_paid_order() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 4))
        .await
        .unwrap();
    workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Pago))
        .await
        .unwrap();
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (6, 0));

    // Direct repository write, as if a payment committed between an admin
    // handler's read and its write: the conditional UPDATE must not match
    let atualizou = loja_server::db::repository::pedido::update_status(
        &state.db,
        pedido.id,
        PedidoStatus::AguardandoPagamento,
    )
    .await
    .unwrap();
    assert!(!atualizou);

    let detalhe = loja_server::db::repository::pedido::find_detalhe(&state.db, pedido.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detalhe.status, PedidoStatus::Pago);

    // With the order still terminal, a second payment stays rejected
    let err =
        workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Pago))
            .await
            .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (6, 0));
}

#[tokio::test]
async fn admin_overwrites_non_terminal_status() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 2))
        .await
        .unwrap();

    let atualizado = workflow::atualizar_status(&state.db, pedido.id, PedidoStatus::Aberto)
        .await
        .unwrap();
    assert_eq!(atualizado.status, PedidoStatus::Aberto);

    // Stock ledger untouched by the administrative path
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 2));
}

#[tokio::test]
async fn sweeper_cancels_expired_orders_exactly_once() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let expirado = workflow::criar_pedido(&state.db, pedido_de(&fixture, 3))
        .await
        .unwrap();
    let recente = workflow::criar_pedido(&state.db, pedido_de(&fixture, 2))
        .await
        .unwrap();

    // 31 minutes old, past the default 30 minute timeout
    common::backdate_pedido(&state, expirado.id, 31 * 60 * 1000).await;

    let sweeper = ExpirationSweeper::new(
        state.db.clone(),
        Duration::from_secs(300),
        30 * 60 * 1000,
        CancellationToken::new(),
    );

    assert_eq!(sweeper.sweep().await.unwrap(), 1);
    // Only the expired order's reservation was released
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 2));

    let detalhe = loja_server::db::repository::pedido::find_detalhe(&state.db, expirado.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detalhe.status, PedidoStatus::Cancelado);

    let detalhe = loja_server::db::repository::pedido::find_detalhe(&state.db, recente.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detalhe.status, PedidoStatus::AguardandoPagamento);

    // Rerun is a no-op: nothing is released twice
    assert_eq!(sweeper.sweep().await.unwrap(), 0);
    assert_eq!(common::ledger(&state, fixture.produto_id).await, (10, 2));
}

#[tokio::test]
async fn paid_order_wins_over_late_sweep() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let pedido = workflow::criar_pedido(&state.db, pedido_de(&fixture, 4))
        .await
        .unwrap();
    common::backdate_pedido(&state, pedido.id, 31 * 60 * 1000).await;

    // Payment lands before the sweep runs
    workflow::processar_pagamento(&state.db, pagamento_de(pedido.id, PagamentoStatus::Pago))
        .await
        .unwrap();

    let sweeper = ExpirationSweeper::new(
        state.db.clone(),
        Duration::from_secs(300),
        30 * 60 * 1000,
        CancellationToken::new(),
    );
    assert_eq!(sweeper.sweep().await.unwrap(), 0);

    assert_eq!(common::ledger(&state, fixture.produto_id).await, (6, 0));
}

#[tokio::test]
async fn create_pedido_validates_cliente_and_endereco() {
    let (state, _dir) = common::setup().await;
    let fixture = common::seed(&state, 10).await;

    let err = workflow::criar_pedido(
        &state.db,
        CreatePedido {
            cliente_id: 404,
            endereco_id: fixture.endereco_id,
            itens: vec![ItemPedidoInput {
                produto_id: fixture.produto_id,
                quantidade: 1,
            }],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Endereco of another cliente is invisible
    let outro = common::seed(&state, 1).await;
    let err = workflow::criar_pedido(
        &state.db,
        CreatePedido {
            cliente_id: fixture.cliente_id,
            endereco_id: outro.endereco_id,
            itens: vec![ItemPedidoInput {
                produto_id: fixture.produto_id,
                quantidade: 1,
            }],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = workflow::criar_pedido(
        &state.db,
        CreatePedido {
            cliente_id: fixture.cliente_id,
            endereco_id: fixture.endereco_id,
            itens: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
