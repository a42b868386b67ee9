// ==========================================
// 后厨计时系统 - 配置管理器
// ==========================================
// 职责: 从 kitchen_kv 读取 config/* 覆写项, 合并到默认配置
// 格式错误的值: 记录告警并保持默认
// ==========================================

use crate::config::kitchen_config::KitchenConfig;
use crate::domain::types::DuplicateStartPolicy;
use crate::repository::{RepositoryResult, SettingsRepository};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

pub mod config_keys {
    pub const PREFIX: &str = "config/";

    pub const WARNING_THRESHOLD_PCT: &str = "config/warning_threshold_pct";
    pub const CRITICAL_THRESHOLD_PCT: &str = "config/critical_threshold_pct";
    pub const STATION_CAPACITY_ALERT_PCT: &str = "config/station_capacity_alert_pct";
    pub const RUSH_QUEUE_THRESHOLD: &str = "config/rush_queue_threshold";
    pub const COMPLETED_RETENTION_SECS: &str = "config/completed_retention_secs";
    pub const ALERT_RETENTION_SECS: &str = "config/alert_retention_secs";
    pub const DEFAULT_TIMER_UPDATE_INTERVAL_MS: &str = "config/default_timer_update_interval_ms";
    pub const DUPLICATE_START_POLICY: &str = "config/duplicate_start_policy";
    pub const QUEUE_FETCH_MAX_ATTEMPTS: &str = "config/queue_fetch_max_attempts";
}

pub struct ConfigManager {
    repo: Arc<SettingsRepository>,
}

impl ConfigManager {
    pub fn new(repo: Arc<SettingsRepository>) -> Self {
        Self { repo }
    }

    /// 加载配置: 默认值 + kitchen_kv 覆写
    pub fn load(&self) -> RepositoryResult<KitchenConfig> {
        let overrides = self.repo.list_prefixed(config_keys::PREFIX)?;
        Ok(apply_overrides(KitchenConfig::default(), &overrides))
    }

    /// 写入单个覆写项
    pub fn set_override(&self, key: &str, value: &str) -> RepositoryResult<()> {
        tracing::info!(config_key = key, value, "更新配置覆写");
        self.repo.put_value(key, value)
    }
}

fn parse_or_keep<T: FromStr + Copy>(overrides: &HashMap<String, String>, key: &str, current: T) -> T {
    match overrides.get(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(config_key = key, raw_value = %raw, "配置格式错误，使用默认值");
                current
            }
        },
        None => current,
    }
}

/// 百分比配置: 必须为 0~100 的有限值
fn parse_pct_or_keep<T: FromStr + Copy + Into<f64>>(
    overrides: &HashMap<String, String>,
    key: &str,
    current: T,
) -> T {
    let parsed = parse_or_keep(overrides, key, current);
    let pct: f64 = parsed.into();
    if pct.is_finite() && (0.0..=100.0).contains(&pct) {
        parsed
    } else {
        tracing::warn!(config_key = key, value = pct, "百分比配置超出 0~100，使用默认值");
        current
    }
}

/// 将覆写项合并到配置
pub fn apply_overrides(mut cfg: KitchenConfig, overrides: &HashMap<String, String>) -> KitchenConfig {
    use config_keys::*;

    cfg.warning_threshold_pct =
        parse_pct_or_keep(overrides, WARNING_THRESHOLD_PCT, cfg.warning_threshold_pct);
    cfg.critical_threshold_pct =
        parse_pct_or_keep(overrides, CRITICAL_THRESHOLD_PCT, cfg.critical_threshold_pct);
    cfg.station_capacity_alert_pct =
        parse_pct_or_keep(overrides, STATION_CAPACITY_ALERT_PCT, cfg.station_capacity_alert_pct);
    cfg.rush_queue_threshold = parse_or_keep(overrides, RUSH_QUEUE_THRESHOLD, cfg.rush_queue_threshold);
    cfg.completed_retention_secs =
        parse_or_keep(overrides, COMPLETED_RETENTION_SECS, cfg.completed_retention_secs);
    cfg.alert_retention_secs = parse_or_keep(overrides, ALERT_RETENTION_SECS, cfg.alert_retention_secs);
    cfg.default_timer_update_interval_ms = parse_or_keep(
        overrides,
        DEFAULT_TIMER_UPDATE_INTERVAL_MS,
        cfg.default_timer_update_interval_ms,
    );
    cfg.queue_fetch_max_attempts =
        parse_or_keep(overrides, QUEUE_FETCH_MAX_ATTEMPTS, cfg.queue_fetch_max_attempts).max(1);

    if let Some(raw) = overrides.get(DUPLICATE_START_POLICY) {
        match DuplicateStartPolicy::from_str(raw) {
            Some(policy) => cfg.duplicate_start_policy = policy,
            None => tracing::warn!(
                config_key = DUPLICATE_START_POLICY,
                raw_value = %raw,
                "未知的重复计时策略，使用默认值"
            ),
        }
    }

    // 阈值顺序保护: critical 不得低于 warning
    if cfg.critical_threshold_pct < cfg.warning_threshold_pct {
        tracing::warn!(
            warning = cfg.warning_threshold_pct,
            critical = cfg.critical_threshold_pct,
            "critical 阈值低于 warning 阈值，恢复默认阈值"
        );
        let defaults = KitchenConfig::default();
        cfg.warning_threshold_pct = defaults.warning_threshold_pct;
        cfg.critical_threshold_pct = defaults.critical_threshold_pct;
    }

    cfg
}
