// ==========================================
// 后厨计时系统 - 远端数据源错误
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// 会话失效, 触发全局登出
    #[error("会话已失效 (401)")]
    Unauthorized,

    #[error("请求失败: status={status}, {message}")]
    Http { status: u16, message: String },

    /// 信封 success=false
    #[error("服务端拒绝: {0}")]
    Rejected(String),

    #[error("读取失败: {0}")]
    Io(String),

    #[error("响应解析失败: {0}")]
    Decode(String),

    /// 地址/令牌等本地配置错误
    #[error("数据源配置无效: {0}")]
    InvalidConfig(String),
}

impl RemoteError {
    /// HTTP 状态码 (如有)
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Unauthorized => Some(401),
            RemoteError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 4xx 与业务拒绝不重试
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Unauthorized
            | RemoteError::Rejected(_)
            | RemoteError::Decode(_)
            | RemoteError::InvalidConfig(_) => false,
            RemoteError::Http { status, .. } => !(400..500).contains(status),
            RemoteError::Io(_) => true,
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
