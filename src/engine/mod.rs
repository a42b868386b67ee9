// ==========================================
// 后厨计时系统 - 引擎层
// ==========================================
// 职责: 纯计算规则 (进度/告警/分配/视图/统计) 与事件发布接口
// 红线: 不持有状态, 不访问存储
// ==========================================

pub mod alerts;
pub mod assignment;
pub mod events;
pub mod progress;
pub mod queue_view;
pub mod stats;

pub use alerts::AlertPolicy;
pub use events::{
    BroadcastPublisher, KitchenEvent, KitchenEventPublisher, NoOpEventPublisher,
};
pub use progress::ProgressSnapshot;
pub use stats::KitchenStats;
