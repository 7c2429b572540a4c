//! 订单业务模块
//!
//! - [`workflow`] - 下单 / 支付 / 状态修改（每个操作单事务）
//! - [`sweeper`] - 过期未支付订单的后台清理

pub mod sweeper;
pub mod workflow;

pub use sweeper::ExpirationSweeper;
