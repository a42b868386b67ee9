// ==========================================
// 后厨计时系统 - 工位领域模型
// ==========================================
// 负载 (capacity) 由人工直接设置, 不从订单数推导
// ==========================================

use crate::domain::types::{StationStatus, StationType};
use serde::{Deserialize, Serialize};

/// 工位负载上限
pub const MAX_STATION_CAPACITY: u8 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub station_type: StationType,
    pub capacity: u8,                // 0 ~ 100
    pub status: StationStatus,
    #[serde(default)]
    pub active_orders: Vec<String>,  // 订单ID
    #[serde(default)]
    pub assigned_staff: Vec<String>, // 员工ID
    #[serde(default)]
    pub equipment: Vec<String>,

    // 负载告警闩锁: 降回阈值以下才允许再次告警
    #[serde(skip)]
    pub capacity_alerted: bool,
}

impl Station {
    pub fn new(id: &str, name: &str, station_type: StationType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            station_type,
            capacity: 0,
            status: StationStatus::Available,
            active_orders: Vec::new(),
            assigned_staff: Vec::new(),
            equipment: Vec::new(),
            capacity_alerted: false,
        }
    }

    /// 从工位上摘除订单, 返回是否存在
    pub fn detach_order(&mut self, order_id: &str) -> bool {
        let before = self.active_orders.len();
        self.active_orders.retain(|id| id != order_id);
        before != self.active_orders.len()
    }
}
