//! Produto Model
//!
//! `estoque`/`reservado` 是库存账本的两个计数器：
//! `reservado` 表示未支付订单占用的数量，不变式 `0 <= reservado <= estoque`。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// Produto entity (商品), JSON view
///
/// `preco` is the unit price in reais (two fixed decimal places).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Decimal,
    pub estoque: i64,
    pub reservado: i64,
    pub imagem: String,
    pub status_ativo: bool,
    pub categoria_id: i64,
}

/// Database row for produto (`preco_centavos` as integer minor units)
#[cfg(feature = "db")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProdutoRow {
    pub id: i64,
    pub nome: String,
    pub descricao: Option<String>,
    pub preco_centavos: i64,
    pub estoque: i64,
    pub reservado: i64,
    pub imagem: String,
    pub status_ativo: bool,
    pub categoria_id: i64,
}

#[cfg(feature = "db")]
impl From<ProdutoRow> for Produto {
    fn from(row: ProdutoRow) -> Self {
        Self {
            id: row.id,
            nome: row.nome,
            descricao: row.descricao,
            preco: money::centavos_para_decimal(row.preco_centavos),
            estoque: row.estoque,
            reservado: row.reservado,
            imagem: row.imagem,
            status_ativo: row.status_ativo,
            categoria_id: row.categoria_id,
        }
    }
}

/// Create produto payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoCreate {
    pub nome: String,
    pub descricao: Option<String>,
    pub preco: Decimal,
    pub estoque: Option<i64>,
    pub imagem: Option<String>,
    pub categoria_id: i64,
}

/// Update produto payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoUpdate {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub preco: Option<Decimal>,
    pub estoque: Option<i64>,
    pub imagem: Option<String>,
    pub status_ativo: Option<bool>,
    pub categoria_id: Option<i64>,
}

/// Catalog list filters (query string of GET /produto)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoFiltro {
    pub nome: Option<String>,
    pub categoria_id: Option<i64>,
    pub min_preco: Option<Decimal>,
    pub max_preco: Option<Decimal>,
}
