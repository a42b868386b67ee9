// ==========================================
// 后厨计时系统 - 领域类型定义
// ==========================================
// 职责: 计时状态、出餐阶段、工位状态、告警分级等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与前端/持久化一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 计时器状态 (Timer Status)
// ==========================================
// 流转: IDLE → RUNNING → {PAUSED ↔ RUNNING} → COMPLETED
//       任意状态可 RESET 回 IDLE
// OVERDUE 仍属于"运行中"，只是已超出预估时长
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimerStatus {
    Idle,      // 未开始
    Running,   // 计时中
    Paused,    // 已暂停
    Completed, // 已完成
    Overdue,   // 超时(仍在计时)
}

impl TimerStatus {
    /// 是否需要轮询刷新
    pub fn is_active(&self) -> bool {
        matches!(self, TimerStatus::Running | TimerStatus::Overdue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "IDLE",
            TimerStatus::Running => "RUNNING",
            TimerStatus::Paused => "PAUSED",
            TimerStatus::Completed => "COMPLETED",
            TimerStatus::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 出餐阶段 (Cooking Stage)
// ==========================================
// 顺序: Prep < Cooking < Plating < Ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingStage {
    Prep,    // 备料
    Cooking, // 烹饪
    Plating, // 装盘
    Ready,   // 待出餐
}

impl fmt::Display for CookingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CookingStage::Prep => write!(f, "PREP"),
            CookingStage::Cooking => write!(f, "COOKING"),
            CookingStage::Plating => write!(f, "PLATING"),
            CookingStage::Ready => write!(f, "READY"),
        }
    }
}

// ==========================================
// 进度颜色 (Color Code)
// ==========================================
// BLUE: < 50%, ORANGE: 50% ~ 80%, RED: >= 80%
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorCode {
    Blue,
    Orange,
    Red,
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorCode::Blue => write!(f, "BLUE"),
            ColorCode::Orange => write!(f, "ORANGE"),
            ColorCode::Red => write!(f, "RED"),
        }
    }
}

// ==========================================
// 工位类型 (Station Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationType {
    Grill,    // 烤炉
    Fryer,    // 油炸
    Saute,    // 炒锅
    Prep,     // 备料台
    Cold,     // 冷菜
    Dessert,  // 甜品
    Beverage, // 饮品
    Expo,     // 出餐口
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StationType::Grill => "GRILL",
            StationType::Fryer => "FRYER",
            StationType::Saute => "SAUTE",
            StationType::Prep => "PREP",
            StationType::Cold => "COLD",
            StationType::Dessert => "DESSERT",
            StationType::Beverage => "BEVERAGE",
            StationType::Expo => "EXPO",
        };
        f.write_str(s)
    }
}

// ==========================================
// 工位状态 (Station Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StationStatus {
    Available,   // 空闲
    Busy,        // 忙碌
    Maintenance, // 维护中
    Offline,     // 离线
}

impl StationStatus {
    /// 是否可以接单
    pub fn accepts_orders(&self) -> bool {
        matches!(self, StationStatus::Available | StationStatus::Busy)
    }
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationStatus::Available => write!(f, "AVAILABLE"),
            StationStatus::Busy => write!(f, "BUSY"),
            StationStatus::Maintenance => write!(f, "MAINTENANCE"),
            StationStatus::Offline => write!(f, "OFFLINE"),
        }
    }
}

// ==========================================
// 告警类型 / 告警级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    TimerWarning,    // 进度 >= 50%
    TimerCritical,   // 进度 >= 80%
    TimerOverdue,    // 超出预估时长
    StationCapacity, // 工位负载 > 90
    RushMode,        // 进入高峰模式
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::TimerWarning => write!(f, "TIMER_WARNING"),
            AlertType::TimerCritical => write!(f, "TIMER_CRITICAL"),
            AlertType::TimerOverdue => write!(f, "TIMER_OVERDUE"),
            AlertType::StationCapacity => write!(f, "STATION_CAPACITY"),
            AlertType::RushMode => write!(f, "RUSH_MODE"),
        }
    }
}

// 顺序: Info < Warning < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "INFO"),
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 重复开始计时策略
// ==========================================
// 同一订单已有未完成计时器时再次 start 的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplicateStartPolicy {
    #[default]
    Reject,  // 拒绝并返回 DuplicateTimer 错误
    Restart, // 重置已有计时器并重新开始
}

impl DuplicateStartPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "REJECT" => Some(DuplicateStartPolicy::Reject),
            "RESTART" => Some(DuplicateStartPolicy::Restart),
            _ => None,
        }
    }
}
