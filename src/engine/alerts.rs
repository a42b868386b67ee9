// ==========================================
// 后厨计时系统 - 告警判定
// ==========================================
// 计时阈值: >= warning% 预警, >= critical% 严重, elapsed > 预估 超时
// 每个阈值由 AlertLatch 保证一次跨越只告警一次
// 工位负载: capacity > 阈值 告警, 回落到阈值及以下后复位
// ==========================================

use crate::config::KitchenConfig;
use crate::domain::alert::KitchenAlert;
use crate::domain::station::Station;
use crate::domain::timer::{AlertLatch, CookingTimer};
use crate::domain::types::{AlertSeverity, AlertType};
use chrono::{DateTime, Utc};

pub struct AlertPolicy {
    warning_pct: f64,
    critical_pct: f64,
    station_capacity_pct: u8,
    rush_threshold: usize,
}

impl AlertPolicy {
    pub fn from_config(cfg: &KitchenConfig) -> Self {
        Self {
            warning_pct: cfg.warning_threshold_pct,
            critical_pct: cfg.critical_threshold_pct,
            station_capacity_pct: cfg.station_capacity_alert_pct,
            rush_threshold: cfg.rush_queue_threshold,
        }
    }

    pub fn warning_pct(&self) -> f64 {
        self.warning_pct
    }

    pub fn critical_pct(&self) -> f64 {
        self.critical_pct
    }

    /// 计时器阈值检查
    ///
    /// 调用前 timer 的 progress / is_overdue 已更新;
    /// 返回需要新增的告警, 并就地更新闩锁
    pub fn check_timer(&self, timer: &mut CookingTimer, now: DateTime<Utc>) -> Vec<KitchenAlert> {
        let mut raised = Vec::new();
        let latch: &mut AlertLatch = &mut timer.latch;

        if timer.progress >= self.warning_pct && !latch.warning_sent {
            latch.warning_sent = true;
            raised.push(
                KitchenAlert::new(
                    AlertType::TimerWarning,
                    AlertSeverity::Warning,
                    format!("订单 {} 已用时过半 ({:.0}%)", timer.order_id, timer.progress),
                    now,
                )
                .for_timer(&timer.id, &timer.order_id),
            );
        }

        if timer.progress >= self.critical_pct && !latch.critical_sent {
            latch.critical_sent = true;
            raised.push(
                KitchenAlert::new(
                    AlertType::TimerCritical,
                    AlertSeverity::Critical,
                    format!("订单 {} 即将超时 ({:.0}%)", timer.order_id, timer.progress),
                    now,
                )
                .for_timer(&timer.id, &timer.order_id),
            );
        }

        if timer.is_overdue && !latch.overdue_sent {
            latch.overdue_sent = true;
            raised.push(
                KitchenAlert::new(
                    AlertType::TimerOverdue,
                    AlertSeverity::Critical,
                    format!(
                        "订单 {} 已超时 {:.0} 秒",
                        timer.order_id, timer.overdue_time
                    ),
                    now,
                )
                .for_timer(&timer.id, &timer.order_id)
                .sticky(),
            );
        }

        raised
    }

    /// 工位负载检查
    pub fn check_station(&self, station: &mut Station, now: DateTime<Utc>) -> Option<KitchenAlert> {
        if station.capacity > self.station_capacity_pct {
            if station.capacity_alerted {
                return None;
            }
            station.capacity_alerted = true;
            return Some(
                KitchenAlert::new(
                    AlertType::StationCapacity,
                    AlertSeverity::Warning,
                    format!("工位 {} 负载过高 ({}%)", station.name, station.capacity),
                    now,
                )
                .for_station(&station.id),
            );
        }

        station.capacity_alerted = false;
        None
    }

    /// 高峰模式判定: 队列长度严格大于阈值
    pub fn is_rush(&self, queue_len: usize) -> bool {
        queue_len > self.rush_threshold
    }

    pub fn rush_alert(&self, queue_len: usize, now: DateTime<Utc>) -> KitchenAlert {
        KitchenAlert::new(
            AlertType::RushMode,
            AlertSeverity::Info,
            format!("进入高峰模式: 当前队列 {} 单", queue_len),
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::StationType;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 18, 0, 0).unwrap()
    }

    fn policy() -> AlertPolicy {
        AlertPolicy::from_config(&KitchenConfig::default())
    }

    #[test]
    fn test_warning_fires_once() {
        let policy = policy();
        let mut timer = CookingTimer::start("o-7", 600, 2, now());
        timer.progress = 55.0;

        let first = policy.check_timer(&mut timer, now());
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].alert_type, AlertType::TimerWarning);

        timer.progress = 60.0;
        assert!(policy.check_timer(&mut timer, now()).is_empty());
    }

    #[test]
    fn test_jump_past_all_thresholds_raises_each_once() {
        let policy = policy();
        let mut timer = CookingTimer::start("o-7", 600, 2, now());
        timer.progress = 100.0;
        timer.is_overdue = true;
        timer.overdue_time = 12.0;

        let raised = policy.check_timer(&mut timer, now());
        let types: Vec<AlertType> = raised.iter().map(|a| a.alert_type).collect();
        assert_eq!(
            types,
            vec![AlertType::TimerWarning, AlertType::TimerCritical, AlertType::TimerOverdue]
        );
        assert!(!raised[2].auto_resolve);
    }

    #[test]
    fn test_station_capacity_rearms_after_drop() {
        let policy = policy();
        let mut station = Station::new("s-1", "烤炉", StationType::Grill);

        station.capacity = 90;
        assert!(policy.check_station(&mut station, now()).is_none());

        station.capacity = 95;
        assert!(policy.check_station(&mut station, now()).is_some());
        assert!(policy.check_station(&mut station, now()).is_none());

        station.capacity = 40;
        assert!(policy.check_station(&mut station, now()).is_none());
        station.capacity = 91;
        assert!(policy.check_station(&mut station, now()).is_some());
    }

    #[test]
    fn test_rush_is_strictly_greater() {
        let policy = policy();
        assert!(!policy.is_rush(10));
        assert!(policy.is_rush(11));
    }
}
