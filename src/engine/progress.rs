// ==========================================
// 后厨计时系统 - 进度计算
// ==========================================
// progress = min(100, elapsed / estimated * 100)
// 颜色: < 50 BLUE, [50, 80) ORANGE, >= 80 RED (边界含在较高一档)
// ==========================================

use crate::domain::types::ColorCode;

/// 进度快照 (纯计算结果)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub elapsed: f64,
    pub remaining_time: f64,
    pub progress: f64,
    pub exceeded: bool, // elapsed 严格大于预估
    pub overdue_time: f64,
}

/// 计算进度百分比, 结果限制在 [0, 100]
///
/// 预估为 0 时: 已有耗时视为 100, 否则为 0
pub fn progress_pct(elapsed: f64, estimated_duration: u64) -> f64 {
    if estimated_duration == 0 {
        return if elapsed > 0.0 { 100.0 } else { 0.0 };
    }
    (elapsed / estimated_duration as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn color_for(progress: f64, warning_pct: f64, critical_pct: f64) -> ColorCode {
    if progress >= critical_pct {
        ColorCode::Red
    } else if progress >= warning_pct {
        ColorCode::Orange
    } else {
        ColorCode::Blue
    }
}

pub fn snapshot(elapsed: f64, estimated_duration: u64) -> ProgressSnapshot {
    let elapsed = elapsed.max(0.0);
    let estimated = estimated_duration as f64;
    ProgressSnapshot {
        elapsed,
        remaining_time: (estimated - elapsed).max(0.0),
        progress: progress_pct(elapsed, estimated_duration),
        exceeded: elapsed > estimated,
        overdue_time: (elapsed - estimated).max(0.0),
    }
}
