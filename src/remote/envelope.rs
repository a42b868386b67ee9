// ==========================================
// 后厨计时系统 - 响应信封
// ==========================================
// 格式: { success, data, message, error }
// ==========================================

use super::error::{RemoteError, RemoteResult};
use crate::domain::order::CookingOrder;
use crate::domain::station::Station;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }

    /// 拆信封: success=false 优先取 error, 其次 message
    pub fn into_result(self) -> RemoteResult<T> {
        if !self.success {
            let reason = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "未知错误".to_string());
            return Err(RemoteError::Rejected(reason));
        }
        self.data
            .ok_or_else(|| RemoteError::Decode("响应缺少 data 字段".to_string()))
    }
}

/// 后厨数据快照 (队列 + 工位)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenFeed {
    #[serde(default)]
    pub orders: Vec<CookingOrder>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_envelope_prefers_error() {
        let raw = r#"{"success":false,"message":"请稍后","error":"门店已打烊"}"#;
        let resp: ApiResponse<KitchenFeed> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            resp.into_result().unwrap_err(),
            RemoteError::Rejected("门店已打烊".to_string())
        );
    }

    #[test]
    fn test_success_without_data_is_decode_error() {
        let resp: ApiResponse<KitchenFeed> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(resp.into_result(), Err(RemoteError::Decode(_))));
    }

    #[test]
    fn test_feed_parses_wire_names() {
        let raw = r#"{
            "success": true,
            "data": {
                "orders": [{
                    "id": "o-1",
                    "orderNumber": "A012",
                    "items": [{"id": "i-1", "name": "牛排", "quantity": 2, "stationType": "GRILL"}],
                    "priority": 4,
                    "estimatedTime": 720,
                    "stage": "PREP",
                    "createdAt": "2026-04-10T11:30:00Z"
                }],
                "stations": [{
                    "id": "grill-1", "name": "烤炉", "type": "GRILL",
                    "capacity": 40, "status": "AVAILABLE"
                }]
            }
        }"#;
        let feed = serde_json::from_str::<ApiResponse<KitchenFeed>>(raw)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(feed.orders[0].order_number, "A012");
        assert_eq!(feed.orders[0].estimated_time, 720);
        assert_eq!(feed.stations[0].capacity, 40);
    }
}
