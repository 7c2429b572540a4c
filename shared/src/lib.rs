//! Loja 共享类型 - 数据模型和工具函数
//!
//! # 模块结构
//!
//! - [`models`] - 数据模型 (cliente, produto, pedido, pagamento...)
//! - [`money`] - 金额工具 (centavos <-> Decimal)
//! - [`util`] - ID 生成和时间戳

pub mod models;
pub mod money;
pub mod util;

pub use money::MoneyError;
