//! 过期订单清理任务
//!
//! 周期性扫描超时未支付的订单（AGUARDANDO_PAGAMENTO 且创建时间早于
//! 截止点），逐单取消并释放库存预留。
//!
//! # 关键约束
//!
//! - 每个订单独立事务，事务内重新核对状态，失败只影响该订单
//! - 单个订单失败记日志后继续，不中断本轮扫描
//! - 循环 await 每轮扫描，两轮永不重叠

use sqlx::SqlitePool;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::db::repository::{self, RepoResult};
use shared::models::PedidoStatus;

/// Periodic task that cancels stale unpaid pedidos.
pub struct ExpirationSweeper {
    pool: SqlitePool,
    interval: Duration,
    expiration_millis: i64,
    shutdown: CancellationToken,
}

impl ExpirationSweeper {
    pub fn new(
        pool: SqlitePool,
        interval: Duration,
        expiration_millis: i64,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            pool,
            interval,
            expiration_millis,
            shutdown,
        }
    }

    /// Tick loop. Each sweep is awaited before the next tick fires.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so startup is quiet
        interval.tick().await;

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            expiration_millis = self.expiration_millis,
            "Expiration sweeper started"
        );

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Expiration sweeper stopping");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep().await {
                        tracing::error!(error = %e, "Expiration sweep failed");
                    }
                }
            }
        }
    }

    /// One full sweep. Public so tests can drive it without the timer.
    pub async fn sweep(&self) -> RepoResult<usize> {
        let cutoff = shared::util::now_millis() - self.expiration_millis;
        let ids = repository::pedido::expirados(&self.pool, cutoff).await?;
        if ids.is_empty() {
            return Ok(0);
        }

        tracing::info!(count = ids.len(), "Cancelling expired pedidos");

        let mut cancelled = 0;
        for pedido_id in ids {
            match self.cancel_expired(pedido_id).await {
                Ok(true) => cancelled += 1,
                Ok(false) => {} // resolved by a payment between the scan and our transaction
                Err(e) => {
                    tracing::error!(pedido_id, error = %e, "Failed to cancel expired pedido");
                }
            }
        }

        tracing::info!(cancelled, "Expiration sweep finished");
        Ok(cancelled)
    }

    /// Cancel one expired pedido in its own transaction.
    ///
    /// The status is re-checked inside the transaction, so a pedido paid
    /// after the scan (or already swept) is left alone and reservations
    /// are released exactly once.
    async fn cancel_expired(&self, pedido_id: i64) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await?;

        let Some(row) = repository::pedido::find_row_tx(&mut tx, pedido_id).await? else {
            return Ok(false);
        };
        if PedidoStatus::parse(&row.status) != Some(PedidoStatus::AguardandoPagamento) {
            return Ok(false);
        }

        let itens = repository::pedido::itens_do_pedido(&mut tx, pedido_id).await?;
        for item in &itens {
            repository::produto::liberar(&mut tx, item.produto_id, item.quantidade).await?;
        }

        let transicionou = repository::pedido::transition_status(
            &mut tx,
            pedido_id,
            PedidoStatus::AguardandoPagamento,
            PedidoStatus::Cancelado,
        )
        .await?;
        if !transicionou {
            return Ok(false); // rollback via drop
        }

        tx.commit().await?;
        tracing::info!(pedido_id, "Pedido expirado cancelado");
        Ok(true)
    }
}
