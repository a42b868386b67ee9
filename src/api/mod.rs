// ==========================================
// 后厨计时系统 - API 层
// ==========================================
// 职责: 提供后厨业务接口, 供宿主 (UI/命令行) 调用
// ==========================================

pub mod error;
pub mod kitchen_api;

// 重导出核心类型
pub use error::{map_api_error, ApiError, ApiResult, ErrorResponse};
pub use kitchen_api::KitchenApi;
