use sqlx::SqlitePool;

use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::db::DbService;
use crate::pedidos::ExpirationSweeper;

/// 服务器状态 - 持有配置和数据库连接池
///
/// ServerState 是整个服务的核心数据结构，被所有 HTTP handler 和后台任务共享。
/// `SqlitePool` 内部是 Arc，Clone 成本极低。
///
/// # 使用示例
///
/// ```ignore
/// let state = ServerState::initialize(&config).await;
/// let tasks = state.start_background_tasks();
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub db: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, db: SqlitePool) -> Self {
        Self { config, db }
    }

    /// 初始化服务器状态
    ///
    /// 打开数据库（WAL 模式）并应用迁移。
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db_service = DbService::new(&config.database_path)
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.pool)
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用。返回的 [`BackgroundTasks`]
    /// 由调用方持有，用于 graceful shutdown。
    ///
    /// 启动的任务：
    /// - 过期订单 sweeper (Periodic)
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        let sweeper = ExpirationSweeper::new(
            self.db.clone(),
            std::time::Duration::from_secs(self.config.sweep_interval_secs),
            self.config.order_expiration_millis(),
            tasks.shutdown_token(),
        );
        tasks.spawn("expiration_sweeper", TaskKind::Periodic, sweeper.run());

        tasks
    }

    /// 获取数据库连接池
    pub fn get_db(&self) -> SqlitePool {
        self.db.clone()
    }
}
