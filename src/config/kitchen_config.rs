// ==========================================
// 后厨计时系统 - 引擎配置项
// ==========================================
// 阈值/保留期等运行参数, 默认值即业务约定值
// ==========================================

use crate::domain::types::DuplicateStartPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenConfig {
    // ===== 计时告警阈值 (百分比) =====
    pub warning_threshold_pct: f64,
    pub critical_threshold_pct: f64,

    // ===== 工位负载告警 (严格大于) =====
    pub station_capacity_alert_pct: u8,

    // ===== 高峰模式: 队列长度严格大于该值 =====
    pub rush_queue_threshold: usize,

    // ===== 保留期 (秒) =====
    pub completed_retention_secs: u64, // 已完成计时器
    pub alert_retention_secs: u64,     // auto_resolve 告警

    // ===== 轮询 =====
    pub default_timer_update_interval_ms: u64,
    pub min_timer_update_interval_ms: u64,

    // ===== 行为策略 =====
    pub duplicate_start_policy: DuplicateStartPolicy,
    pub queue_fetch_max_attempts: u32,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            warning_threshold_pct: 50.0,
            critical_threshold_pct: 80.0,
            station_capacity_alert_pct: 90,
            rush_queue_threshold: 10,
            completed_retention_secs: 5 * 60,
            alert_retention_secs: 60 * 60,
            default_timer_update_interval_ms: 1000,
            min_timer_update_interval_ms: 100,
            duplicate_start_policy: DuplicateStartPolicy::Reject,
            queue_fetch_max_attempts: 1,
        }
    }
}

impl KitchenConfig {
    /// 轮询间隔下限保护
    pub fn clamp_interval_ms(&self, interval_ms: u64) -> u64 {
        interval_ms.max(self.min_timer_update_interval_ms)
    }
}
