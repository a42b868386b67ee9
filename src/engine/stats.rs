// ==========================================
// 后厨计时系统 - 统计指标
// ==========================================
// 从当前内存状态即时汇总, 不保留历史
// ==========================================

use crate::domain::alert::KitchenAlert;
use crate::domain::order::CookingOrder;
use crate::domain::station::Station;
use crate::domain::timer::CookingTimer;
use crate::domain::types::TimerStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenStats {
    pub active_timers: usize,
    pub paused_timers: usize,
    pub overdue_timers: usize,
    pub completed_timers: usize,
    pub average_cook_secs: Option<f64>, // 已完成计时器的平均实际时长
    pub on_time_rate: Option<f64>,      // 已完成中未超时占比 (0 ~ 1)
    pub queue_length: usize,
    pub average_wait_secs: Option<f64>,
    pub rush_mode: bool,
    pub unacknowledged_alerts: usize,
    pub average_station_capacity: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn compute<'a>(
    timers: impl Iterator<Item = &'a CookingTimer> + Clone,
    queue: &[CookingOrder],
    stations: &[Station],
    alerts: &[KitchenAlert],
    rush_mode: bool,
) -> KitchenStats {
    let completed: Vec<&CookingTimer> = timers
        .clone()
        .filter(|t| t.status == TimerStatus::Completed)
        .collect();

    let on_time_rate = if completed.is_empty() {
        None
    } else {
        let on_time = completed.iter().filter(|t| !t.is_overdue).count();
        Some(on_time as f64 / completed.len() as f64)
    };

    KitchenStats {
        active_timers: timers.clone().filter(|t| t.status.is_active()).count(),
        paused_timers: timers.clone().filter(|t| t.status == TimerStatus::Paused).count(),
        overdue_timers: timers
            .filter(|t| t.is_overdue && t.status != TimerStatus::Completed)
            .count(),
        completed_timers: completed.len(),
        average_cook_secs: mean(completed.iter().filter_map(|t| t.actual_duration)),
        on_time_rate,
        queue_length: queue.len(),
        average_wait_secs: mean(queue.iter().map(|o| o.wait_time as f64)),
        rush_mode,
        unacknowledged_alerts: alerts.iter().filter(|a| !a.acknowledged).count(),
        average_station_capacity: mean(stations.iter().map(|s| s.capacity as f64)),
    }
}
