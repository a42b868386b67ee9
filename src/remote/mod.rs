// ==========================================
// 后厨计时系统 - 远端数据源
// ==========================================
// 职责: 拉取出餐队列与工位列表
// 失败只写入对应数据域的错误信息, 401 触发全局登出
// ==========================================

pub mod envelope;
pub mod error;
pub mod http;
pub mod retry;
mod sources;

use crate::domain::order::CookingOrder;
use crate::domain::station::Station;
use async_trait::async_trait;

pub use envelope::{ApiResponse, KitchenFeed};
pub use error::{RemoteError, RemoteResult};
pub use http::HttpQueueSource;
pub use retry::RetryPolicy;
pub use sources::{JsonFileQueueSource, StaticQueueSource};

// ==========================================
// KitchenQueueSource Trait
// ==========================================
#[async_trait]
pub trait KitchenQueueSource: Send + Sync {
    async fn fetch_queue(&self) -> RemoteResult<Vec<CookingOrder>>;

    async fn fetch_stations(&self) -> RemoteResult<Vec<Station>>;
}
