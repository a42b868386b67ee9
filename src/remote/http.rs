// ==========================================
// 后厨计时系统 - HTTP 数据源
// ==========================================
// GET {base}/api/kitchen/queue    → ApiResponse<Vec<CookingOrder>>
// GET {base}/api/kitchen/stations → ApiResponse<Vec<Station>>
// 有令牌时附带 Authorization: Bearer <token>
// 状态码映射: 401 → Unauthorized, 其余非 2xx → Http
// ==========================================

use super::envelope::ApiResponse;
use super::error::{RemoteError, RemoteResult};
use super::KitchenQueueSource;
use crate::domain::order::CookingOrder;
use crate::domain::station::Station;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const QUEUE_PATH: &str = "api/kitchen/queue";
pub const STATIONS_PATH: &str = "api/kitchen/stations";

/// 单次请求超时
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpQueueSource {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpQueueSource {
    pub fn new(base_url: &str) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RemoteError::InvalidConfig(format!("HTTP 客户端创建失败: {}", e)))?;
        Self::with_client(base_url, client)
    }

    /// 使用外部构造的客户端 (共享连接池/自定义代理)
    pub fn with_client(base_url: &str, client: reqwest::Client) -> RemoteResult<Self> {
        // 保证以 / 结尾, join 时保留已有路径前缀
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| RemoteError::InvalidConfig(format!("服务地址无效 {}: {}", normalized, e)))?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn headers(&self) -> RemoteResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RemoteError::InvalidConfig(format!("令牌格式无效: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> RemoteResult<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RemoteError::InvalidConfig(format!("请求路径无效 {}: {}", path, e)))?;

        let response = self
            .client
            .get(url.clone())
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| RemoteError::Io(format!("{}: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Io(format!("{}: {}", url, e)))?;
        tracing::debug!(url = %url, status = status.as_u16(), bytes = body.len(), "HTTP 拉取完成");

        if status == StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Unauthorized);
        }
        if !status.is_success() {
            return Err(RemoteError::Http {
                status: status.as_u16(),
                message: failure_message(status, &body),
            });
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| RemoteError::Decode(e.to_string()))?;
        envelope.into_result()
    }
}

/// 错误响应: 能解析出信封时取 error/message, 否则用状态码说明
fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.error.or(env.message))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("未知错误")
                .to_string()
        })
}

#[async_trait]
impl KitchenQueueSource for HttpQueueSource {
    async fn fetch_queue(&self) -> RemoteResult<Vec<CookingOrder>> {
        self.get_envelope(QUEUE_PATH).await
    }

    async fn fetch_stations(&self) -> RemoteResult<Vec<Station>> {
        self.get_envelope(STATIONS_PATH).await
    }
}
