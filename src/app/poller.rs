// ==========================================
// 后厨计时系统 - 计时轮询
// ==========================================
// 每 timer_update_interval_ms 按时钟重算活动计时器
// 无活动计时器且无待清理条目时自行退出; 状态变更后由 API 重新拉起
// 耗时始终由时钟推算, 进程挂起后下一次轮询即可校正
// ==========================================

use crate::perf::PerfGuard;
use crate::store::SharedStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// 两次轮询间隔超过 N 倍设定值时告警
const GAP_WARN_FACTOR: u32 = 3;

pub struct TimerPoller {
    store: SharedStore,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TimerPoller {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 确保轮询任务在运行; 返回本次是否新启动
    ///
    /// 必须在 tokio 运行时内调用, 否则只记录告警
    pub fn ensure_running(&self) -> bool {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("当前不在 tokio 运行时内, 计时轮询未启动");
                return false;
            }
        };
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let task = runtime.spawn(run_loop(Arc::clone(&self.store), Arc::clone(&self.running)));
        let mut slot = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }

        tracing::debug!("计时轮询已启动");
        true
    }

    pub fn stop(&self) {
        let mut slot = self.handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = slot.take() {
            task.abort();
            tracing::debug!("计时轮询已停止");
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

impl Drop for TimerPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn make_ticker(interval_ms: u64, start: Instant) -> Interval {
    let mut ticker = tokio::time::interval_at(start, Duration::from_millis(interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

async fn run_loop(store: SharedStore, running: Arc<AtomicBool>) {
    let mut interval_ms = match store.lock() {
        Ok(guard) => guard.preferences().timer_update_interval_ms,
        Err(e) => {
            tracing::error!(error = %e, "状态容器锁已损坏, 计时轮询退出");
            running.store(false, Ordering::SeqCst);
            return;
        }
    };
    let mut ticker = make_ticker(interval_ms, Instant::now());
    let mut last_tick: Option<Instant> = None;

    loop {
        ticker.tick().await;

        let now = Instant::now();
        if let Some(prev) = last_tick {
            let gap = now - prev;
            if gap > Duration::from_millis(interval_ms) * GAP_WARN_FACTOR {
                tracing::warn!(
                    gap_ms = gap.as_millis() as u64,
                    interval_ms,
                    "轮询间隔异常, 已按时钟重新同步"
                );
            }
        }
        last_tick = Some(now);

        let configured = {
            let mut guard = match store.lock() {
                Ok(guard) => guard,
                Err(e) => {
                    tracing::error!(error = %e, "状态容器锁已损坏, 计时轮询退出");
                    running.store(false, Ordering::SeqCst);
                    return;
                }
            };

            let summary = {
                let _perf = PerfGuard::new("timer_tick");
                guard.tick()
            };
            if summary.active == 0 && summary.pending_retention == 0 {
                // 持锁期间复位标志, 后续变更在锁释放后才能看到
                running.store(false, Ordering::SeqCst);
                tracing::debug!("无活动计时器且无待清理条目, 计时轮询退出");
                return;
            }
            guard.preferences().timer_update_interval_ms
        };

        if configured != interval_ms {
            tracing::info!(from = interval_ms, to = configured, "轮询间隔调整");
            interval_ms = configured;
            ticker = make_ticker(interval_ms, Instant::now() + Duration::from_millis(interval_ms));
        }
    }
}
