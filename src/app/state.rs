// ==========================================
// 后厨计时系统 - 应用状态
// ==========================================
// 职责: 组装仓储/配置/状态容器/事件广播/API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::KitchenApi;
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigManager, KitchenConfig};
use crate::engine::events::{BroadcastPublisher, KitchenEventPublisher};
use crate::remote::{KitchenQueueSource, RetryPolicy};
use crate::repository::SettingsRepository;
use crate::store::KitchenStore;

/// 事件广播缓冲区大小
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// 应用状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生效配置 (默认值 + 覆写)
    pub config: KitchenConfig,

    /// 后厨API
    pub kitchen_api: Arc<KitchenApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 事件广播 (订阅后重新渲染)
    pub events: Arc<BroadcastPublisher>,
}

impl AppState {
    /// 创建新的AppState实例 (系统时钟)
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String, source: Arc<dyn KitchenQueueSource>) -> Result<Self, String> {
        Self::with_clock(db_path, source, Arc::new(SystemClock))
    }

    /// 使用指定时钟创建 (测试中注入 ManualClock)
    pub fn with_clock(
        db_path: String,
        source: Arc<dyn KitchenQueueSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let settings = Arc::new(
            SettingsRepository::open(&db_path)
                .map_err(|e| format!("无法打开数据库: {}", e))?,
        );

        let config_manager = Arc::new(ConfigManager::new(settings.clone()));
        let config = config_manager
            .load()
            .map_err(|e| format!("无法加载配置: {}", e))?;
        tracing::info!(?config, "配置加载完成");

        let events = Arc::new(BroadcastPublisher::new(EVENT_CHANNEL_CAPACITY));
        let publisher: Arc<dyn KitchenEventPublisher> = events.clone();

        let retry = RetryPolicy::with_attempts(config.queue_fetch_max_attempts);
        let store = Arc::new(Mutex::new(KitchenStore::new(
            config.clone(),
            clock,
            publisher.clone(),
        )));

        let kitchen_api = Arc::new(KitchenApi::new(store, settings, source, publisher, retry));

        // 偏好快照损坏不阻塞启动, 使用默认偏好
        match kitchen_api.restore_preferences() {
            Ok(true) => {}
            Ok(false) => tracing::info!("未找到偏好快照, 使用默认偏好"),
            Err(e) => tracing::warn!("偏好快照恢复失败(将使用默认偏好): {}", e),
        }

        Ok(Self {
            db_path,
            config,
            kitchen_api,
            config_manager,
            events,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先使用环境变量 KITCHEN_TIMER_DB_PATH, 其次用户数据目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("KITCHEN_TIMER_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./kitchen_timer.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("kitchen-timer");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("kitchen_timer.db");
        }
    }

    path.to_string_lossy().to_string()
}
