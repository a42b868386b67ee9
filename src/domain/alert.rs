// ==========================================
// 后厨计时系统 - 告警领域模型
// ==========================================

use crate::domain::types::{AlertSeverity, AlertType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub timer_id: Option<String>,
    pub station_id: Option<String>,
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
    pub auto_resolve: bool, // 超过保留期后自动清理
}

impl KitchenAlert {
    pub fn new(
        alert_type: AlertType,
        severity: AlertSeverity,
        message: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            alert_type,
            severity,
            message,
            timer_id: None,
            station_id: None,
            order_id: None,
            created_at: now,
            acknowledged: false,
            auto_resolve: true,
        }
    }

    pub fn for_timer(mut self, timer_id: &str, order_id: &str) -> Self {
        self.timer_id = Some(timer_id.to_string());
        self.order_id = Some(order_id.to_string());
        self
    }

    pub fn for_station(mut self, station_id: &str) -> Self {
        self.station_id = Some(station_id.to_string());
        self
    }

    pub fn sticky(mut self) -> Self {
        self.auto_resolve = false;
        self
    }
}
