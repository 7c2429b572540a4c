//! Pagamento Model
//!
//! 一个订单最多一条支付记录（只有 AGUARDANDO_PAGAMENTO 的订单可以发起支付，
//! 支付后订单进入终态），记录创建后不可变。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// Payment method (fixed enumeration, tokens match the web frontend)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetodoPagamento {
    #[serde(rename = "Cartão")]
    Cartao,
    Boleto,
    #[serde(rename = "PIX")]
    Pix,
}

impl MetodoPagamento {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetodoPagamento::Cartao => "Cartão",
            MetodoPagamento::Boleto => "Boleto",
            MetodoPagamento::Pix => "PIX",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cartão" => Some(MetodoPagamento::Cartao),
            "Boleto" => Some(MetodoPagamento::Boleto),
            "PIX" => Some(MetodoPagamento::Pix),
            _ => None,
        }
    }
}

/// Resulting status of a processed payment (mirrors the order's terminal state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PagamentoStatus {
    Pago,
    Cancelado,
}

impl PagamentoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PagamentoStatus::Pago => "PAGO",
            PagamentoStatus::Cancelado => "CANCELADO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PAGO" => Some(PagamentoStatus::Pago),
            "CANCELADO" => Some(PagamentoStatus::Cancelado),
            _ => None,
        }
    }
}

/// Pagamento entity (支付记录), JSON view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagamento {
    pub id: i64,
    pub pedido_id: i64,
    pub metodo: MetodoPagamento,
    pub valor: Decimal,
    pub status: PagamentoStatus,
    pub data_criacao: i64,
}

/// Database row for pagamento
#[cfg(feature = "db")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PagamentoRow {
    pub id: i64,
    pub pedido_id: i64,
    pub metodo: String,
    pub valor_centavos: i64,
    pub status: String,
    pub data_criacao: i64,
}

#[cfg(feature = "db")]
impl PagamentoRow {
    pub fn into_pagamento(self) -> Option<Pagamento> {
        Some(Pagamento {
            id: self.id,
            pedido_id: self.pedido_id,
            metodo: MetodoPagamento::parse(&self.metodo)?,
            valor: money::centavos_para_decimal(self.valor_centavos),
            status: PagamentoStatus::parse(&self.status)?,
            data_criacao: self.data_criacao,
        })
    }
}

/// POST /pagamento/processar payload
///
/// `valor` is informational only; the persisted amount is always the order
/// total. `novo_status` simulates the gateway outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessarPagamento {
    pub pedido_id: i64,
    pub metodo: MetodoPagamento,
    pub valor: Decimal,
    pub novo_status: PagamentoStatus,
}
