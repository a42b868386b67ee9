// ==========================================
// 后厨计时系统 - 偏好设置操作
// ==========================================
// 只修改内存中的偏好; 落盘由 KitchenApi 负责
// ==========================================

use super::core::KitchenStore;
use super::error::{KitchenError, KitchenResult};
use crate::domain::preferences::{AudioSettings, KitchenPreferences, QueueFilter, QueueSort, ViewMode};
use crate::engine::events::KitchenEvent;

impl KitchenStore {
    pub fn preferences(&self) -> &KitchenPreferences {
        &self.preferences
    }

    /// 整体替换偏好 (启动时从快照恢复)
    pub fn set_preferences(&mut self, mut prefs: KitchenPreferences) {
        prefs.timer_update_interval_ms = self.config.clamp_interval_ms(prefs.timer_update_interval_ms);
        prefs.audio.volume = prefs.audio.volume.min(100);
        self.preferences = prefs;
        self.emit(KitchenEvent::PreferencesChanged);
    }

    pub fn update_audio_settings(&mut self, audio: AudioSettings) -> KitchenResult<()> {
        if audio.volume > 100 {
            return Err(KitchenError::InvalidInput(format!(
                "volume 必须在 0~100 之间, 实际为 {}",
                audio.volume
            )));
        }
        self.preferences.audio = audio;
        self.emit(KitchenEvent::PreferencesChanged);
        Ok(())
    }

    /// 设置轮询间隔, 返回实际生效值 (有下限保护)
    pub fn set_timer_update_interval(&mut self, interval_ms: u64) -> u64 {
        let effective = self.config.clamp_interval_ms(interval_ms);
        self.preferences.timer_update_interval_ms = effective;
        self.emit(KitchenEvent::PreferencesChanged);
        effective
    }

    pub fn set_auto_assign(&mut self, enabled: bool) {
        self.preferences.auto_assign = enabled;
        self.emit(KitchenEvent::PreferencesChanged);
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.preferences.view_mode = mode;
        self.emit(KitchenEvent::PreferencesChanged);
    }

    pub fn set_queue_filter(&mut self, filter: QueueFilter) -> KitchenResult<()> {
        if let Some(min) = filter.min_priority {
            super::error::validate_priority(min)?;
        }
        self.preferences.queue_filter = filter;
        self.emit(KitchenEvent::PreferencesChanged);
        Ok(())
    }

    pub fn set_queue_sort(&mut self, sort: QueueSort) {
        self.preferences.queue_sort = sort;
        self.emit(KitchenEvent::PreferencesChanged);
    }
}
