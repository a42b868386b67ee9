// ==========================================
// 后厨计时系统 - 后厨状态容器
// ==========================================
// 持有计时器/队列/工位/告警的权威内存副本
// 红线: 计时器/队列/告警不落盘
// ==========================================

mod alerts;
mod core;
mod preferences;
mod queue;
mod stations;
mod timers;

pub mod error;

#[cfg(test)]
mod tests;

pub use self::core::{CleanupSummary, DataDomain, DomainErrors, KitchenStore, LoadingFlags, TickSummary};
pub use error::{KitchenError, KitchenResult};

use std::sync::{Arc, Mutex};

/// 共享状态容器: 所有变更持锁同步完成, 锁内不 await
pub type SharedStore = Arc<Mutex<KitchenStore>>;
