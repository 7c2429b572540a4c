//! Pedido Model
//!
//! 订单状态机：
//!
//! ```text
//! ABERTO -> AGUARDANDO_PAGAMENTO -> { PAGO, CANCELADO }
//! ```
//!
//! `PAGO` 和 `CANCELADO` 是终态，任何后续转换都被拒绝。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Endereco, Produto};
use crate::money;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PedidoStatus {
    Aberto,
    AguardandoPagamento,
    Pago,
    Cancelado,
}

impl PedidoStatus {
    /// Database/text representation (same tokens as the JSON wire format)
    pub fn as_str(&self) -> &'static str {
        match self {
            PedidoStatus::Aberto => "ABERTO",
            PedidoStatus::AguardandoPagamento => "AGUARDANDO_PAGAMENTO",
            PedidoStatus::Pago => "PAGO",
            PedidoStatus::Cancelado => "CANCELADO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ABERTO" => Some(PedidoStatus::Aberto),
            "AGUARDANDO_PAGAMENTO" => Some(PedidoStatus::AguardandoPagamento),
            "PAGO" => Some(PedidoStatus::Pago),
            "CANCELADO" => Some(PedidoStatus::Cancelado),
            _ => None,
        }
    }

    /// PAGO / CANCELADO are absorbing states
    pub fn is_terminal(&self) -> bool {
        matches!(self, PedidoStatus::Pago | PedidoStatus::Cancelado)
    }
}

impl std::fmt::Display for PedidoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pedido entity (订单), JSON view without relations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: i64,
    pub cliente_id: i64,
    pub endereco_id: i64,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub quantidade_total: i64,
    pub data_criacao: i64,
    pub status: PedidoStatus,
}

/// Database row for pedido
#[cfg(feature = "db")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PedidoRow {
    pub id: i64,
    pub cliente_id: i64,
    pub endereco_id: i64,
    pub subtotal_centavos: i64,
    pub total_centavos: i64,
    pub quantidade_total: i64,
    pub data_criacao: i64,
    pub status: String,
}

#[cfg(feature = "db")]
impl PedidoRow {
    /// Convert to the JSON view; `None` if the stored status token is unknown.
    pub fn into_pedido(self) -> Option<Pedido> {
        let status = PedidoStatus::parse(&self.status)?;
        Some(Pedido {
            id: self.id,
            cliente_id: self.cliente_id,
            endereco_id: self.endereco_id,
            subtotal: money::centavos_para_decimal(self.subtotal_centavos),
            total: money::centavos_para_decimal(self.total_centavos),
            quantidade_total: self.quantidade_total,
            data_criacao: self.data_criacao,
            status,
        })
    }
}

/// Order item: quantity and unit price captured at order time, immutable.
#[cfg(feature = "db")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemPedidoRow {
    pub id: i64,
    pub pedido_id: i64,
    pub produto_id: i64,
    pub quantidade: i64,
    pub preco_venda_centavos: i64,
    pub subtotal_centavos: i64,
}

/// Order item with its produto loaded (detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedidoDetalhe {
    pub id: i64,
    pub produto: Produto,
    pub quantidade: i64,
    pub preco_venda: Decimal,
    pub subtotal: Decimal,
}

/// Pedido with endereco + itens + produtos loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoDetalhe {
    pub id: i64,
    pub cliente_id: i64,
    pub endereco: Endereco,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub quantidade_total: i64,
    pub data_criacao: i64,
    pub status: PedidoStatus,
    pub itens: Vec<ItemPedidoDetalhe>,
}

/// One requested item of POST /pedido
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPedidoInput {
    pub produto_id: i64,
    pub quantidade: i64,
}

/// Create pedido payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePedido {
    pub cliente_id: i64,
    pub endereco_id: i64,
    pub itens: Vec<ItemPedidoInput>,
}

/// PATCH /pedido/:id/status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizarStatusPedido {
    pub status: PedidoStatus,
}
