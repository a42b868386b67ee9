// ==========================================
// 后厨计时系统 - 数据仓储层
// ==========================================
// 职责: 偏好快照与配置覆写的持久化
// 红线: 计时器/队列/告警不落盘
// ==========================================

pub mod error;
pub mod settings_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use settings_repo::SettingsRepository;
