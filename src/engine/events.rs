// ==========================================
// 后厨计时系统 - 状态变更事件发布
// ==========================================
// 职责: 定义事件发布 trait, 前端/宿主订阅后重新渲染
// 说明: Store 只依赖 trait, 广播实现放在本模块
// ==========================================

use crate::domain::alert::KitchenAlert;
use crate::domain::types::{CookingStage, TimerStatus};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::broadcast;

// ==========================================
// 事件类型
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KitchenEvent {
    /// 计时器状态变化 (开始/暂停/恢复/完成/重置/删除)
    TimerChanged {
        timer_id: String,
        order_id: String,
        status: Option<TimerStatus>, // None 表示已删除
    },
    /// 计时器阶段推进
    StageChanged {
        timer_id: String,
        stage: CookingStage,
    },
    /// 轮询刷新完成
    TimersTicked { active: usize },
    /// 队列变化
    QueueChanged { length: usize },
    /// 工位变化
    StationChanged { station_id: String },
    /// 新告警
    AlertRaised {
        alert: KitchenAlert,
        play_sound: bool,
    },
    /// 告警被确认/移除
    AlertsChanged { remaining: usize },
    /// 高峰模式切换
    RushModeChanged { active: bool },
    /// 登录态失效 (远端 401)
    SessionExpired,
    /// 偏好设置变化
    PreferencesChanged,
}

impl KitchenEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            KitchenEvent::TimerChanged { .. } => "TimerChanged",
            KitchenEvent::StageChanged { .. } => "StageChanged",
            KitchenEvent::TimersTicked { .. } => "TimersTicked",
            KitchenEvent::QueueChanged { .. } => "QueueChanged",
            KitchenEvent::StationChanged { .. } => "StationChanged",
            KitchenEvent::AlertRaised { .. } => "AlertRaised",
            KitchenEvent::AlertsChanged { .. } => "AlertsChanged",
            KitchenEvent::RushModeChanged { .. } => "RushModeChanged",
            KitchenEvent::SessionExpired => "SessionExpired",
            KitchenEvent::PreferencesChanged => "PreferencesChanged",
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

pub trait KitchenEventPublisher: Send + Sync {
    /// 发布事件; 没有订阅者不算失败
    fn publish(&self, event: KitchenEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作发布者 (单元测试)
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl KitchenEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: KitchenEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::trace!(event = event.as_str(), "NoOpEventPublisher: 跳过事件发布");
        Ok(())
    }
}

// ==========================================
// BroadcastPublisher - tokio 广播
// ==========================================
// 慢订阅者会收到 Lagged, 由订阅方自行全量刷新
pub struct BroadcastPublisher {
    sender: broadcast::Sender<KitchenEvent>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl KitchenEventPublisher for BroadcastPublisher {
    fn publish(&self, event: KitchenEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|e| format!("事件广播失败: {}", e).into())
    }
}

/// 发布并吞掉错误 (发布失败不影响状态变更)
pub fn publish_best_effort(publisher: &Arc<dyn KitchenEventPublisher>, event: KitchenEvent) {
    let name = event.as_str();
    if let Err(e) = publisher.publish(event) {
        tracing::warn!(event = name, error = %e, "事件发布失败");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_publisher() {
        let publisher = NoOpEventPublisher;
        assert!(publisher.publish(KitchenEvent::SessionExpired).is_ok());
    }

    #[test]
    fn test_broadcast_without_subscribers_is_ok() {
        let publisher = BroadcastPublisher::new(8);
        assert_eq!(publisher.subscriber_count(), 0);
        assert!(publisher
            .publish(KitchenEvent::QueueChanged { length: 3 })
            .is_ok());
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_subscriber() {
        let publisher = BroadcastPublisher::new(8);
        let mut rx = publisher.subscribe();

        publisher
            .publish(KitchenEvent::RushModeChanged { active: true })
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event, KitchenEvent::RushModeChanged { active: true });
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let json = serde_json::to_value(KitchenEvent::TimersTicked { active: 2 }).unwrap();
        assert_eq!(json["kind"], "TIMERS_TICKED");
        assert_eq!(json["active"], 2);
    }
}
