// ==========================================
// 后厨计时系统 - 出餐队列条目
// ==========================================

use crate::domain::types::{CookingStage, StationType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub station_type: Option<StationType>, // 建议工位类型
}

// ==========================================
// CookingOrder - 待出餐订单
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookingOrder {
    pub id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub table_number: Option<String>,
    pub items: Vec<OrderItem>,
    pub priority: u8,            // 1 ~ 5
    pub estimated_time: u64,     // 预估出餐时长 (秒)
    #[serde(default)]
    pub wait_time: u64,          // 已等待 (秒)
    pub stage: CookingStage,
    #[serde(default)]
    pub assigned_station: Option<String>,
    #[serde(default)]
    pub assigned_staff: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CookingOrder {
    /// 首个指定了工位类型的菜品, 用于自动分配
    pub fn preferred_station_type(&self) -> Option<StationType> {
        self.items.iter().find_map(|item| item.station_type)
    }
}
