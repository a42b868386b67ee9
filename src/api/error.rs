// ==========================================
// 后厨计时系统 - API层错误类型
// ==========================================
// 职责: 汇总状态容器/仓储/远端错误, 转换为宿主可展示的错误响应
// ==========================================

use crate::remote::error::RemoteError;
use crate::repository::error::RepositoryError;
use crate::store::error::KitchenError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("订单已有进行中的计时器: order_id={order_id}, timer_id={timer_id}")]
    DuplicateTimer { order_id: String, timer_id: String },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 远端错误
    // ==========================================
    #[error("会话已失效, 请重新登录")]
    Unauthorized,

    #[error("远端请求失败: {0}")]
    RemoteError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<KitchenError> for ApiError {
    fn from(err: KitchenError) -> Self {
        match err {
            KitchenError::TimerNotFound(id) => ApiError::NotFound(format!("计时器(id={})不存在", id)),
            KitchenError::OrderNotFound(id) => ApiError::NotFound(format!("订单(id={})不存在", id)),
            KitchenError::StationNotFound(id) => ApiError::NotFound(format!("工位(id={})不存在", id)),
            KitchenError::AlertNotFound(id) => ApiError::NotFound(format!("告警(id={})不存在", id)),
            KitchenError::DuplicateTimer { order_id, timer_id } => {
                ApiError::DuplicateTimer { order_id, timer_id }
            }
            KitchenError::InvalidStateTransition { from, to } => {
                ApiError::InvalidStateTransition { from, to }
            }
            KitchenError::InvalidInput(msg) => ApiError::InvalidInput(msg),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(key) => ApiError::NotFound(format!("配置项(key={})不存在", key)),
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::SerializationError(msg) => {
                ApiError::DatabaseError(format!("偏好快照损坏: {}", msg))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Unauthorized => ApiError::Unauthorized,
            other => ApiError::RemoteError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应 (返回给宿主)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息 (可选)
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::DuplicateTimer { .. } => "DUPLICATE_TIMER",
            ApiError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::RemoteError(_) => "REMOTE_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::DatabaseConnectionError(_) => "DATABASE_CONNECTION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details: match self {
                ApiError::DuplicateTimer { order_id, timer_id } => Some(serde_json::json!({
                    "order_id": order_id,
                    "timer_id": timer_id,
                })),
                ApiError::InvalidStateTransition { from, to } => Some(serde_json::json!({
                    "from": from,
                    "to": to,
                })),
                _ => None,
            },
        }
    }
}

/// 将ApiError转换为JSON字符串
pub fn map_api_error(err: ApiError) -> String {
    serde_json::to_string(&err.to_response()).unwrap_or_else(|_| err.to_string())
}
