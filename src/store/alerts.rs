// ==========================================
// 后厨计时系统 - 告警操作
// ==========================================
// acknowledge: 保留告警, 标记已确认
// dismiss: 移除指定告警
// ==========================================

use super::core::KitchenStore;
use super::error::{KitchenError, KitchenResult};
use crate::domain::alert::KitchenAlert;
use crate::domain::types::AlertSeverity;
use crate::engine::events::KitchenEvent;

impl KitchenStore {
    pub fn alerts(&self) -> &[KitchenAlert] {
        &self.alerts
    }

    pub fn unacknowledged_alerts(&self) -> Vec<&KitchenAlert> {
        self.alerts.iter().filter(|a| !a.acknowledged).collect()
    }

    /// 新增告警并按音频偏好决定是否播放提示音
    pub(super) fn push_alert(&mut self, alert: KitchenAlert) {
        let audio = &self.preferences.audio;
        let play_sound = audio.enabled
            && audio.volume > 0
            && (!audio.critical_only || alert.severity == AlertSeverity::Critical);

        tracing::info!(
            alert_type = %alert.alert_type,
            severity = %alert.severity,
            message = %alert.message,
            "新告警"
        );
        self.alerts.push(alert.clone());
        self.emit(KitchenEvent::AlertRaised { alert, play_sound });
    }

    pub fn acknowledge_alert(&mut self, alert_id: &str) -> KitchenResult<()> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| KitchenError::AlertNotFound(alert_id.to_string()))?;
        alert.acknowledged = true;

        self.emit(KitchenEvent::AlertsChanged {
            remaining: self.alerts.len(),
        });
        Ok(())
    }

    pub fn dismiss_alert(&mut self, alert_id: &str) -> KitchenResult<KitchenAlert> {
        let idx = self
            .alerts
            .iter()
            .position(|a| a.id == alert_id)
            .ok_or_else(|| KitchenError::AlertNotFound(alert_id.to_string()))?;
        let alert = self.alerts.remove(idx);

        self.emit(KitchenEvent::AlertsChanged {
            remaining: self.alerts.len(),
        });
        Ok(alert)
    }

    /// 清除所有已确认告警, 返回清除数量
    pub fn clear_acknowledged_alerts(&mut self) -> usize {
        let before = self.alerts.len();
        self.alerts.retain(|a| !a.acknowledged);
        let removed = before - self.alerts.len();

        if removed > 0 {
            self.emit(KitchenEvent::AlertsChanged {
                remaining: self.alerts.len(),
            });
        }
        removed
    }
}
