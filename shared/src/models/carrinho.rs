//! Carrinho Model
//!
//! 购物车只是下单前的草稿，不占用库存；库存预留发生在创建订单时。

use serde::{Deserialize, Serialize};

use crate::models::Produto;

/// Cart item with its produto loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCarrinhoDetalhe {
    pub id: i64,
    pub produto: Produto,
    pub quantidade: i64,
}

/// Cart of one cliente (one cart per cliente, created lazily)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrinho {
    pub id: i64,
    pub cliente_id: i64,
    pub itens: Vec<ItemCarrinhoDetalhe>,
}

/// Database row for item_carrinho
#[cfg(feature = "db")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemCarrinhoRow {
    pub id: i64,
    pub carrinho_id: i64,
    pub produto_id: i64,
    pub quantidade: i64,
}

/// POST /carrinho/:clienteId/item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemCarrinho {
    pub produto_id: i64,
    pub quantidade: i64,
}

/// PATCH /carrinho/:clienteId/item/:itemId payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemCarrinho {
    pub quantidade: i64,
}
