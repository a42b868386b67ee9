// ==========================================
// 后厨计时系统 - 领域模型层
// ==========================================
// 职责: 定义计时器、工位、队列、告警、偏好设置
// 红线: 不含存储逻辑, 不含引擎逻辑
// ==========================================

pub mod alert;
pub mod order;
pub mod preferences;
pub mod station;
pub mod timer;
pub mod types;

// 重导出核心类型
pub use alert::KitchenAlert;
pub use order::{CookingOrder, OrderItem};
pub use preferences::{
    AudioSettings, KitchenPreferences, QueueFilter, QueueSort, QueueSortField, SortDirection,
    ViewMode, KITCHEN_STORAGE_KEY,
};
pub use station::{Station, MAX_STATION_CAPACITY};
pub use timer::{AlertLatch, CookingTimer};
pub use types::{
    AlertSeverity, AlertType, ColorCode, CookingStage, DuplicateStartPolicy, StationStatus,
    StationType, TimerStatus,
};
