//! Loja Server - 小型电商后端
//!
//! # 架构
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`api`] | HTTP 路由和 handler（axum） |
//! | [`core`] | 配置、服务器状态、后台任务 |
//! | [`db`] | SQLite 连接池、迁移、仓储层 |
//! | [`pedidos`] | 订单工作流和过期订单清理 |
//! | [`utils`] | 错误类型、日志、输入校验 |
//!
//! # 核心约束
//!
//! - 库存账本：`0 <= reservado <= estoque`，全部通过单条条件 UPDATE 变更
//! - 订单状态机：`ABERTO -> AGUARDANDO_PAGAMENTO -> { PAGO, CANCELADO }`，终态不可变
//! - 金额：数据库存整数分（centavos），JSON 边界用两位小数

pub mod api;
pub mod core;
pub mod db;
pub mod pedidos;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

/// 加载 .env 并初始化日志
///
/// 必须在 [`Config::from_env`] 之前调用。
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
