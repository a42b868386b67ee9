// ==========================================
// 后厨计时系统 - 烹饪计时器领域模型
// ==========================================
// 一个订单对应一个计时器 (按 order_id 唯一)
// 暂停时长单独累计, 有效耗时 = 墙钟差 - 累计暂停
// ==========================================

use crate::domain::types::{ColorCode, CookingStage, TimerStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// AlertLatch - 阈值告警闩锁
// ==========================================
// 每个阈值只告警一次, reset 时清空
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertLatch {
    pub warning_sent: bool,
    pub critical_sent: bool,
    pub overdue_sent: bool,
}

// ==========================================
// CookingTimer - 烹饪计时器
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingTimer {
    // ===== 标识 =====
    pub id: String,
    pub order_id: String,

    // ===== 时长 (秒) =====
    pub estimated_duration: u64,    // 预估时长
    pub elapsed: f64,               // 已耗时 (不含暂停)
    pub remaining_time: f64,        // 剩余时长 (>= 0)
    pub overdue_time: f64,          // 超时时长 (>= 0)
    pub actual_duration: Option<f64>, // 完成时的墙钟耗时

    // ===== 状态 =====
    pub status: TimerStatus,
    pub stage: CookingStage,
    pub is_overdue: bool,
    pub progress: f64,              // 0 ~ 100
    pub color_code: ColorCode,
    pub priority: u8,               // 1 ~ 5

    // ===== 时间戳 =====
    pub start_time: Option<DateTime<Utc>>,
    pub paused_time: Option<DateTime<Utc>>,
    pub completed_time: Option<DateTime<Utc>>,
    pub total_paused_ms: i64,

    #[serde(default)]
    pub latch: AlertLatch,
}

impl CookingTimer {
    /// 创建一个已开始计时的计时器
    pub fn start(order_id: &str, estimated_duration: u64, priority: u8, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            estimated_duration,
            elapsed: 0.0,
            remaining_time: estimated_duration as f64,
            overdue_time: 0.0,
            actual_duration: None,
            status: TimerStatus::Running,
            stage: CookingStage::Prep,
            is_overdue: false,
            progress: 0.0,
            color_code: ColorCode::Blue,
            priority,
            start_time: Some(now),
            paused_time: None,
            completed_time: None,
            total_paused_ms: 0,
            latch: AlertLatch::default(),
        }
    }

    /// 根据时钟计算有效耗时 (秒)
    ///
    /// 有效耗时 = (now - start_time) - 累计暂停 - 当前暂停段
    /// 未开始的计时器返回 0
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };

        let mut active_ms = (now - start).num_milliseconds() - self.total_paused_ms;
        if let Some(paused_at) = self.paused_time {
            active_ms -= (now - paused_at).num_milliseconds().max(0);
        }

        (active_ms.max(0) as f64) / 1000.0
    }

    /// 回到 IDLE 并清空所有运行时字段
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.remaining_time = self.estimated_duration as f64;
        self.overdue_time = 0.0;
        self.actual_duration = None;
        self.status = TimerStatus::Idle;
        self.stage = CookingStage::Prep;
        self.is_overdue = false;
        self.progress = 0.0;
        self.color_code = ColorCode::Blue;
        self.start_time = None;
        self.paused_time = None;
        self.completed_time = None;
        self.total_paused_ms = 0;
        self.latch = AlertLatch::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_elapsed_excludes_pauses() {
        let mut timer = CookingTimer::start("o-1", 600, 3, t0());
        timer.total_paused_ms = 30_000;

        let elapsed = timer.elapsed_at(t0() + Duration::seconds(120));
        assert_eq!(elapsed, 90.0);
    }

    #[test]
    fn test_elapsed_freezes_while_paused() {
        let mut timer = CookingTimer::start("o-1", 600, 3, t0());
        timer.paused_time = Some(t0() + Duration::seconds(60));

        assert_eq!(timer.elapsed_at(t0() + Duration::seconds(60)), 60.0);
        assert_eq!(timer.elapsed_at(t0() + Duration::seconds(500)), 60.0);
    }

    #[test]
    fn test_reset_clears_runtime_fields() {
        let mut timer = CookingTimer::start("o-1", 600, 3, t0());
        timer.is_overdue = true;
        timer.latch.overdue_sent = true;
        timer.reset();

        assert_eq!(timer.status, TimerStatus::Idle);
        assert!(!timer.is_overdue);
        assert!(timer.start_time.is_none());
        assert_eq!(timer.latch, AlertLatch::default());
        assert_eq!(timer.remaining_time, 600.0);
    }
}
