// ==========================================
// 后厨计时系统 - 后厨 API
// ==========================================
// 职责: 宿主调用入口
// - 串行化对状态容器的访问 (持锁同步修改, 锁内不 await)
// - 偏好变更后落盘 (kitchen-storage)
// - 拉取队列/工位, 失败写入对应数据域错误, 401 发布登出事件
// - 计时或产生待清理条目的变更后拉起计时轮询
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::app::poller::TimerPoller;
use crate::domain::alert::KitchenAlert;
use crate::domain::order::CookingOrder;
use crate::domain::preferences::{AudioSettings, KitchenPreferences, QueueFilter, QueueSort, ViewMode};
use crate::domain::station::Station;
use crate::domain::timer::CookingTimer;
use crate::domain::types::{CookingStage, StationStatus};
use crate::engine::events::{publish_best_effort, KitchenEvent, KitchenEventPublisher};
use crate::engine::stats::KitchenStats;
use crate::remote::error::RemoteError;
use crate::remote::retry::RetryPolicy;
use crate::remote::KitchenQueueSource;
use crate::repository::settings_repo::SettingsRepository;
use crate::store::{DataDomain, DomainErrors, KitchenStore, LoadingFlags, SharedStore};
use std::sync::{Arc, MutexGuard};

pub struct KitchenApi {
    store: SharedStore,
    settings: Arc<SettingsRepository>,
    source: Arc<dyn KitchenQueueSource>,
    publisher: Arc<dyn KitchenEventPublisher>,
    retry: RetryPolicy,
    poller: TimerPoller,
}

impl KitchenApi {
    pub fn new(
        store: SharedStore,
        settings: Arc<SettingsRepository>,
        source: Arc<dyn KitchenQueueSource>,
        publisher: Arc<dyn KitchenEventPublisher>,
        retry: RetryPolicy,
    ) -> Self {
        let poller = TimerPoller::new(Arc::clone(&store));
        Self {
            store,
            settings,
            source,
            publisher,
            retry,
            poller,
        }
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    pub fn poller(&self) -> &TimerPoller {
        &self.poller
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, KitchenStore>> {
        self.store
            .lock()
            .map_err(|e| ApiError::InternalError(format!("状态容器锁获取失败: {}", e)))
    }

    /// 有活动计时器或待清理条目时确保轮询在运行
    ///
    /// 先释放状态锁再拉起, 轮询退出判定与此处的判定都在锁内完成
    fn kick_poller(&self) -> ApiResult<()> {
        let needed = self.lock()?.needs_polling();
        if needed {
            self.poller.ensure_running();
        }
        Ok(())
    }

    /// 停止轮询 (进程退出前调用)
    pub fn shutdown(&self) {
        self.poller.stop();
    }

    // ==========================================
    // 偏好设置
    // ==========================================

    /// 从 kitchen-storage 恢复偏好; 返回是否存在快照
    pub fn restore_preferences(&self) -> ApiResult<bool> {
        match self.settings.load_preferences()? {
            Some(prefs) => {
                self.lock()?.set_preferences(prefs);
                tracing::info!("已恢复偏好设置");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn preferences(&self) -> ApiResult<KitchenPreferences> {
        Ok(self.lock()?.preferences().clone())
    }

    /// 修改偏好并落盘; 落盘失败时内存中的修改保留
    fn update_preferences<T>(
        &self,
        apply: impl FnOnce(&mut KitchenStore) -> Result<T, ApiError>,
    ) -> ApiResult<T> {
        let (value, snapshot) = {
            let mut store = self.lock()?;
            let value = apply(&mut *store)?;
            (value, store.preferences().clone())
        };
        self.settings.save_preferences(&snapshot)?;
        Ok(value)
    }

    pub fn update_audio_settings(&self, audio: AudioSettings) -> ApiResult<()> {
        self.update_preferences(|s| Ok(s.update_audio_settings(audio)?))
    }

    /// 返回实际生效的间隔
    pub fn set_timer_update_interval(&self, interval_ms: u64) -> ApiResult<u64> {
        self.update_preferences(|s| Ok(s.set_timer_update_interval(interval_ms)))
    }

    pub fn set_auto_assign(&self, enabled: bool) -> ApiResult<()> {
        self.update_preferences(|s| {
            s.set_auto_assign(enabled);
            Ok(())
        })
    }

    pub fn set_view_mode(&self, mode: ViewMode) -> ApiResult<()> {
        self.update_preferences(|s| {
            s.set_view_mode(mode);
            Ok(())
        })
    }

    pub fn set_queue_filter(&self, filter: QueueFilter) -> ApiResult<()> {
        self.update_preferences(|s| Ok(s.set_queue_filter(filter)?))
    }

    pub fn set_queue_sort(&self, sort: QueueSort) -> ApiResult<()> {
        self.update_preferences(|s| {
            s.set_queue_sort(sort);
            Ok(())
        })
    }

    // ==========================================
    // 计时器
    // ==========================================

    pub fn start_timer(&self, order_id: &str, estimated_duration: u64, priority: u8) -> ApiResult<CookingTimer> {
        let timer = self.lock()?.start_timer(order_id, estimated_duration, priority)?;
        self.kick_poller()?;
        Ok(timer)
    }

    pub fn pause_timer(&self, timer_id: &str) -> ApiResult<()> {
        Ok(self.lock()?.pause_timer(timer_id)?)
    }

    pub fn resume_timer(&self, timer_id: &str) -> ApiResult<()> {
        self.lock()?.resume_timer(timer_id)?;
        self.kick_poller()?;
        Ok(())
    }

    pub fn complete_timer(&self, timer_id: &str) -> ApiResult<CookingTimer> {
        let timer = self.lock()?.complete_timer(timer_id)?;
        self.kick_poller()?;
        Ok(timer)
    }

    pub fn reset_timer(&self, timer_id: &str) -> ApiResult<()> {
        Ok(self.lock()?.reset_timer(timer_id)?)
    }

    pub fn remove_timer(&self, timer_id: &str) -> ApiResult<CookingTimer> {
        Ok(self.lock()?.remove_timer(timer_id)?)
    }

    pub fn advance_stage(&self, timer_id: &str, stage: CookingStage) -> ApiResult<()> {
        Ok(self.lock()?.advance_stage(timer_id, stage)?)
    }

    pub fn timer(&self, timer_id: &str) -> ApiResult<CookingTimer> {
        self.lock()?
            .timer(timer_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("计时器(id={})不存在", timer_id)))
    }

    pub fn timers(&self) -> ApiResult<Vec<CookingTimer>> {
        Ok(self.lock()?.timers().into_iter().cloned().collect())
    }

    // ==========================================
    // 队列
    // ==========================================

    /// 拉取出餐队列; 返回订单数
    pub async fn refresh_queue(&self) -> ApiResult<usize> {
        self.lock()?.set_loading(DataDomain::Queue, true);
        let result = self
            .retry
            .run("fetch_queue", || self.source.fetch_queue())
            .await;

        let mut store = self.lock()?;
        store.set_loading(DataDomain::Queue, false);
        match result {
            Ok(orders) => {
                let count = orders.len();
                store.set_queue(orders);
                store.set_error(DataDomain::Queue, None);
                drop(store);
                tracing::info!(count, "出餐队列已刷新");
                self.kick_poller()?;
                Ok(count)
            }
            Err(e) => {
                store.set_error(DataDomain::Queue, Some(e.to_string()));
                drop(store);
                Err(self.remote_failure("fetch_queue", e))
            }
        }
    }

    pub fn queue(&self) -> ApiResult<Vec<CookingOrder>> {
        Ok(self.lock()?.queue().to_vec())
    }

    /// 按偏好中的过滤/排序生成队列视图
    pub fn queue_view(&self) -> ApiResult<Vec<CookingOrder>> {
        Ok(self.lock()?.queue_view().into_iter().cloned().collect())
    }

    pub fn on_new_order(&self, order: CookingOrder) -> ApiResult<()> {
        self.lock()?.on_new_order(order)?;
        self.kick_poller()
    }

    pub fn on_order_complete(&self, order_id: &str) -> ApiResult<CookingOrder> {
        let order = self.lock()?.on_order_complete(order_id)?;
        self.kick_poller()?;
        Ok(order)
    }

    pub fn reorder_queue(&self, order_id: &str, new_index: usize) -> ApiResult<()> {
        Ok(self.lock()?.reorder_queue(order_id, new_index)?)
    }

    pub fn update_order_priority(&self, order_id: &str, priority: u8) -> ApiResult<()> {
        Ok(self.lock()?.update_order_priority(order_id, priority)?)
    }

    pub fn assign_order_to_station(&self, order_id: &str, station_id: &str) -> ApiResult<()> {
        Ok(self.lock()?.assign_order_to_station(order_id, station_id)?)
    }

    pub fn assign_order_to_staff(&self, order_id: &str, staff_id: &str) -> ApiResult<()> {
        Ok(self.lock()?.assign_order_to_staff(order_id, staff_id)?)
    }

    // ==========================================
    // 工位
    // ==========================================

    /// 拉取工位列表; 返回工位数
    pub async fn refresh_stations(&self) -> ApiResult<usize> {
        self.lock()?.set_loading(DataDomain::Stations, true);
        let result = self
            .retry
            .run("fetch_stations", || self.source.fetch_stations())
            .await;

        let mut store = self.lock()?;
        store.set_loading(DataDomain::Stations, false);
        let stations = match result {
            Ok(stations) => stations,
            Err(e) => {
                store.set_error(DataDomain::Stations, Some(e.to_string()));
                drop(store);
                return Err(self.remote_failure("fetch_stations", e));
            }
        };

        let count = stations.len();
        if let Err(e) = store.set_stations(stations) {
            store.set_error(DataDomain::Stations, Some(e.to_string()));
            return Err(e.into());
        }
        store.set_error(DataDomain::Stations, None);
        drop(store);
        tracing::info!(count, "工位列表已刷新");
        self.kick_poller()?;
        Ok(count)
    }

    pub fn stations(&self) -> ApiResult<Vec<Station>> {
        Ok(self.lock()?.stations().to_vec())
    }

    pub fn upsert_station(&self, station: Station) -> ApiResult<()> {
        self.lock()?.upsert_station(station)?;
        self.kick_poller()
    }

    pub fn update_station_capacity(&self, station_id: &str, capacity: u8) -> ApiResult<()> {
        self.lock()?.update_station_capacity(station_id, capacity)?;
        self.kick_poller()
    }

    pub fn update_station_status(&self, station_id: &str, status: StationStatus) -> ApiResult<()> {
        Ok(self.lock()?.update_station_status(station_id, status)?)
    }

    pub fn assign_staff_to_station(&self, station_id: &str, staff_id: &str) -> ApiResult<()> {
        Ok(self.lock()?.assign_staff_to_station(station_id, staff_id)?)
    }

    pub fn remove_staff_from_station(&self, station_id: &str, staff_id: &str) -> ApiResult<bool> {
        Ok(self.lock()?.remove_staff_from_station(station_id, staff_id)?)
    }

    // ==========================================
    // 告警
    // ==========================================

    pub fn alerts(&self) -> ApiResult<Vec<KitchenAlert>> {
        Ok(self.lock()?.alerts().to_vec())
    }

    pub fn acknowledge_alert(&self, alert_id: &str) -> ApiResult<()> {
        Ok(self.lock()?.acknowledge_alert(alert_id)?)
    }

    pub fn dismiss_alert(&self, alert_id: &str) -> ApiResult<KitchenAlert> {
        Ok(self.lock()?.dismiss_alert(alert_id)?)
    }

    pub fn clear_acknowledged_alerts(&self) -> ApiResult<usize> {
        Ok(self.lock()?.clear_acknowledged_alerts())
    }

    // ==========================================
    // 状态概览
    // ==========================================

    pub fn stats(&self) -> ApiResult<KitchenStats> {
        Ok(self.lock()?.stats())
    }

    pub fn errors(&self) -> ApiResult<DomainErrors> {
        Ok(self.lock()?.errors().clone())
    }

    pub fn loading(&self) -> ApiResult<LoadingFlags> {
        Ok(self.lock()?.loading().clone())
    }

    /// 远端失败: 401 发布登出事件
    fn remote_failure(&self, op: &str, err: RemoteError) -> ApiError {
        if matches!(err, RemoteError::Unauthorized) {
            tracing::warn!(op, "会话已失效, 发布登出事件");
            publish_best_effort(&self.publisher, KitchenEvent::SessionExpired);
        } else {
            tracing::warn!(op, error = %err, "远端拉取失败");
        }
        err.into()
    }
}
