// ==========================================
// 后厨计时系统 - 持久化偏好设置
// ==========================================
// 存储键: kitchen-storage
// 只持久化偏好, 计时器/队列/告警每次会话重新获取或创建
// ==========================================

use crate::domain::types::{CookingStage, StationType};
use serde::{Deserialize, Serialize};

/// 持久化快照的存储键
pub const KITCHEN_STORAGE_KEY: &str = "kitchen-storage";

/// 快照格式版本
pub const PREFERENCES_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioSettings {
    pub enabled: bool,
    pub volume: u8, // 0 ~ 100
    pub alert_sound: String,
    pub critical_only: bool, // 仅严重告警播放提示音
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 70,
            alert_sound: "chime".to_string(),
            critical_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Station,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueSortField {
    #[default]
    Manual, // 保持人工排序
    Priority,
    WaitTime,
    EstimatedTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSort {
    pub field: QueueSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueFilter {
    #[serde(default)]
    pub stage: Option<CookingStage>,
    #[serde(default)]
    pub station_id: Option<String>,
    #[serde(default)]
    pub station_type: Option<StationType>,
    #[serde(default)]
    pub min_priority: Option<u8>,
}

// ==========================================
// KitchenPreferences - 持久化快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KitchenPreferences {
    pub version: u32,
    pub audio: AudioSettings,
    pub timer_update_interval_ms: u64,
    pub auto_assign: bool,
    pub view_mode: ViewMode,
    pub queue_filter: QueueFilter,
    pub queue_sort: QueueSort,
}

impl Default for KitchenPreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            audio: AudioSettings::default(),
            timer_update_interval_ms: 1000,
            auto_assign: false,
            view_mode: ViewMode::default(),
            queue_filter: QueueFilter::default(),
            queue_sort: QueueSort::default(),
        }
    }
}
