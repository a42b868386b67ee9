// ==========================================
// 后厨计时系统 - 状态容器核心
// ==========================================
// 单写者: 外部通过 Arc<Mutex<KitchenStore>> 串行访问
// 所有变更同步完成, 锁内不 await
// ==========================================

use crate::clock::Clock;
use crate::config::KitchenConfig;
use crate::domain::alert::KitchenAlert;
use crate::domain::order::CookingOrder;
use crate::domain::preferences::KitchenPreferences;
use crate::domain::station::Station;
use crate::domain::timer::CookingTimer;
use crate::engine::alerts::AlertPolicy;
use crate::engine::events::{publish_best_effort, KitchenEvent, KitchenEventPublisher};
use crate::engine::stats::{self, KitchenStats};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// ==========================================
// 数据域: 每个域独立的加载标志与错误信息
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDomain {
    Queue,
    Timers,
    Stations,
    Alerts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainErrors {
    pub queue: Option<String>,
    pub timers: Option<String>,
    pub stations: Option<String>,
    pub alerts: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadingFlags {
    pub queue: bool,
    pub timers: bool,
    pub stations: bool,
    pub alerts: bool,
}

/// 单次轮询结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    pub active: usize,
    pub alerts_raised: usize,
    pub timers_removed: usize,
    pub alerts_removed: usize,
    pub pending_retention: usize, // 仍在等待保留期清理的计时器与告警
}

/// 保留期清理结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupSummary {
    pub timers_removed: usize,
    pub alerts_removed: usize,
}

// ==========================================
// KitchenStore - 后厨状态容器
// ==========================================
pub struct KitchenStore {
    pub(super) config: KitchenConfig,
    pub(super) policy: AlertPolicy,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) publisher: Arc<dyn KitchenEventPublisher>,

    pub(super) timers: HashMap<String, CookingTimer>, // timer_id → timer
    pub(super) order_index: HashMap<String, String>,  // order_id → timer_id
    pub(super) queue: Vec<CookingOrder>,
    pub(super) stations: Vec<Station>,
    pub(super) alerts: Vec<KitchenAlert>,
    pub(super) rush_mode: bool,
    pub(super) preferences: KitchenPreferences,

    pub(super) errors: DomainErrors,
    pub(super) loading: LoadingFlags,
}

impl KitchenStore {
    pub fn new(
        config: KitchenConfig,
        clock: Arc<dyn Clock>,
        publisher: Arc<dyn KitchenEventPublisher>,
    ) -> Self {
        let mut preferences = KitchenPreferences::default();
        preferences.timer_update_interval_ms = config.default_timer_update_interval_ms;

        Self {
            policy: AlertPolicy::from_config(&config),
            config,
            clock,
            publisher,
            timers: HashMap::new(),
            order_index: HashMap::new(),
            queue: Vec::new(),
            stations: Vec::new(),
            alerts: Vec::new(),
            rush_mode: false,
            preferences,
            errors: DomainErrors::default(),
            loading: LoadingFlags::default(),
        }
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(super) fn emit(&self, event: KitchenEvent) {
        publish_best_effort(&self.publisher, event);
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn is_rush_mode(&self) -> bool {
        self.rush_mode
    }

    pub fn errors(&self) -> &DomainErrors {
        &self.errors
    }

    pub fn loading(&self) -> &LoadingFlags {
        &self.loading
    }

    pub fn stats(&self) -> KitchenStats {
        stats::compute(
            self.timers.values(),
            &self.queue,
            &self.stations,
            &self.alerts,
            self.rush_mode,
        )
    }

    /// 等待保留期清理的条目数: 已完成计时器 + auto_resolve 告警
    pub fn pending_retention(&self) -> usize {
        let timers = self
            .timers
            .values()
            .filter(|t| t.completed_time.is_some())
            .count();
        let alerts = self.alerts.iter().filter(|a| a.auto_resolve).count();
        timers + alerts
    }

    /// 有活动计时器或待清理条目时轮询必须保持运行
    pub fn needs_polling(&self) -> bool {
        self.active_timer_count() > 0 || self.pending_retention() > 0
    }

    // ==========================================
    // 加载标志 / 错误信息
    // ==========================================

    pub fn set_loading(&mut self, domain: DataDomain, loading: bool) {
        let flag = match domain {
            DataDomain::Queue => &mut self.loading.queue,
            DataDomain::Timers => &mut self.loading.timers,
            DataDomain::Stations => &mut self.loading.stations,
            DataDomain::Alerts => &mut self.loading.alerts,
        };
        *flag = loading;
    }

    pub fn set_error(&mut self, domain: DataDomain, message: Option<String>) {
        let slot = match domain {
            DataDomain::Queue => &mut self.errors.queue,
            DataDomain::Timers => &mut self.errors.timers,
            DataDomain::Stations => &mut self.errors.stations,
            DataDomain::Alerts => &mut self.errors.alerts,
        };
        *slot = message;
    }

    // ==========================================
    // 轮询刷新
    // ==========================================

    /// 一次轮询: 按时钟重算所有活动计时器, 刷新等待时长, 执行保留期清理
    pub fn tick(&mut self) -> TickSummary {
        let now = self.now();
        let active_ids: Vec<String> = self
            .timers
            .values()
            .filter(|t| t.status.is_active())
            .map(|t| t.id.clone())
            .collect();

        let mut alerts_raised = 0;
        for timer_id in &active_ids {
            let elapsed = match self.timers.get(timer_id) {
                Some(timer) => timer.elapsed_at(now),
                None => continue,
            };
            match self.on_timer_update(timer_id, elapsed) {
                Ok(raised) => alerts_raised += raised.len(),
                Err(e) => tracing::warn!(timer_id = %timer_id, error = %e, "计时刷新失败"),
            }
        }

        for order in self.queue.iter_mut() {
            order.wait_time = (now - order.created_at).num_seconds().max(0) as u64;
        }

        let cleanup = self.cleanup(now);
        let active = self.active_timer_count();
        self.emit(KitchenEvent::TimersTicked { active });

        TickSummary {
            active,
            alerts_raised,
            timers_removed: cleanup.timers_removed,
            alerts_removed: cleanup.alerts_removed,
            pending_retention: self.pending_retention(),
        }
    }

    /// 保留期清理
    ///
    /// - 已完成计时器: completed_time 距今超过 completed_retention
    /// - auto_resolve 告警: created_at 距今超过 alert_retention
    pub fn cleanup(&mut self, now: DateTime<Utc>) -> CleanupSummary {
        let timer_retention = Duration::seconds(self.config.completed_retention_secs as i64);
        let alert_retention = Duration::seconds(self.config.alert_retention_secs as i64);

        let expired: Vec<String> = self
            .timers
            .values()
            .filter(|t| matches!(t.completed_time, Some(done) if now - done > timer_retention))
            .map(|t| t.id.clone())
            .collect();
        for timer_id in &expired {
            self.drop_timer(timer_id);
        }

        let before = self.alerts.len();
        self.alerts
            .retain(|a| !(a.auto_resolve && now - a.created_at > alert_retention));
        let alerts_removed = before - self.alerts.len();

        if !expired.is_empty() || alerts_removed > 0 {
            tracing::debug!(
                timers_removed = expired.len(),
                alerts_removed,
                "保留期清理完成"
            );
        }
        if alerts_removed > 0 {
            self.emit(KitchenEvent::AlertsChanged {
                remaining: self.alerts.len(),
            });
        }

        CleanupSummary {
            timers_removed: expired.len(),
            alerts_removed,
        }
    }

    /// 从两张表中移除计时器
    pub(super) fn drop_timer(&mut self, timer_id: &str) -> Option<CookingTimer> {
        let timer = self.timers.remove(timer_id)?;
        if self.order_index.get(&timer.order_id).map(String::as_str) == Some(timer_id) {
            self.order_index.remove(&timer.order_id);
        }
        Some(timer)
    }
}
