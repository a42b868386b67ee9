// ==========================================
// 后厨计时系统 - 核心库
// ==========================================
// 职责: 出餐计时器 / 出餐队列 / 工位 / 告警的内存状态模型
// 技术栈: Rust + tokio + SQLite (仅偏好设置落盘)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 纯计算规则与事件
pub mod engine;

// 状态容器 - 计时器/队列/工位/告警
pub mod store;

// 数据仓储层 - 偏好/配置键值
pub mod repository;

// 配置层 - 运行参数
pub mod config;

// 远端数据源 - 队列/工位拉取
pub mod remote;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 时钟抽象
pub mod clock;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装与计时轮询
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertSeverity, AlertType, ColorCode, CookingStage, DuplicateStartPolicy, StationStatus,
    StationType, TimerStatus,
};

// 领域实体
pub use domain::{
    AudioSettings, CookingOrder, CookingTimer, KitchenAlert, KitchenPreferences, OrderItem,
    Station,
};

// 状态容器
pub use store::{KitchenError, KitchenResult, KitchenStore, SharedStore};

// 引擎
pub use engine::{BroadcastPublisher, KitchenEvent, KitchenEventPublisher, KitchenStats};

// API / 应用
pub use api::{ApiError, ApiResult, KitchenApi};
pub use app::{AppState, TimerPoller};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "后厨计时系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
