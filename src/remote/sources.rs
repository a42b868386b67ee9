// ==========================================
// 后厨计时系统 - 数据源实现
// ==========================================
// StaticQueueSource: 内存数据, 可注入失败 (演示/测试)
// JsonFileQueueSource: 从磁盘读取信封 JSON
// ==========================================

use super::envelope::{ApiResponse, KitchenFeed};
use super::error::{RemoteError, RemoteResult};
use super::KitchenQueueSource;
use crate::domain::order::CookingOrder;
use crate::domain::station::Station;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ==========================================
// StaticQueueSource
// ==========================================
#[derive(Debug, Default)]
pub struct StaticQueueSource {
    feed: Mutex<KitchenFeed>,
    failure: Mutex<Option<RemoteError>>,
    calls: AtomicUsize,
}

impl StaticQueueSource {
    pub fn new(orders: Vec<CookingOrder>, stations: Vec<Station>) -> Self {
        Self {
            feed: Mutex::new(KitchenFeed { orders, stations }),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn set_orders(&self, orders: Vec<CookingOrder>) {
        let mut feed = self.feed.lock().unwrap_or_else(|e| e.into_inner());
        feed.orders = orders;
    }

    /// 之后的每次拉取都返回该错误; None 恢复正常
    pub fn fail_with(&self, failure: Option<RemoteError>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = failure;
    }

    /// 累计拉取次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> RemoteResult<KitchenFeed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .failure
            .lock()
            .map_err(|e| RemoteError::Io(format!("锁获取失败: {}", e)))?
            .clone();
        if let Some(err) = failure {
            return Err(err);
        }
        let feed = self
            .feed
            .lock()
            .map_err(|e| RemoteError::Io(format!("锁获取失败: {}", e)))?;
        Ok(feed.clone())
    }
}

#[async_trait]
impl KitchenQueueSource for StaticQueueSource {
    async fn fetch_queue(&self) -> RemoteResult<Vec<CookingOrder>> {
        Ok(self.snapshot()?.orders)
    }

    async fn fetch_stations(&self) -> RemoteResult<Vec<Station>> {
        Ok(self.snapshot()?.stations)
    }
}

// ==========================================
// JsonFileQueueSource
// ==========================================
#[derive(Debug, Clone)]
pub struct JsonFileQueueSource {
    path: PathBuf,
}

impl JsonFileQueueSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_feed(&self) -> RemoteResult<KitchenFeed> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RemoteError::Io(format!("{}: {}", self.path.display(), e))
        })?;
        let envelope: ApiResponse<KitchenFeed> =
            serde_json::from_str(&raw).map_err(|e| RemoteError::Decode(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), success = envelope.success, "读取队列文件");
        envelope.into_result()
    }
}

#[async_trait]
impl KitchenQueueSource for JsonFileQueueSource {
    async fn fetch_queue(&self) -> RemoteResult<Vec<CookingOrder>> {
        Ok(self.read_feed().await?.orders)
    }

    async fn fetch_stations(&self) -> RemoteResult<Vec<Station>> {
        Ok(self.read_feed().await?.stations)
    }
}
