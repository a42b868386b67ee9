// ==========================================
// 后厨计时系统 - 状态容器错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KitchenError {
    #[error("计时器未找到: timer_id={0}")]
    TimerNotFound(String),

    #[error("订单未找到: order_id={0}")]
    OrderNotFound(String),

    #[error("工位未找到: station_id={0}")]
    StationNotFound(String),

    #[error("告警未找到: alert_id={0}")]
    AlertNotFound(String),

    #[error("订单已有进行中的计时器: order_id={order_id}, timer_id={timer_id}")]
    DuplicateTimer { order_id: String, timer_id: String },

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

pub type KitchenResult<T> = Result<T, KitchenError>;

/// 优先级取值范围校验 (1 ~ 5)
pub(crate) fn validate_priority(priority: u8) -> KitchenResult<()> {
    if (1..=5).contains(&priority) {
        Ok(())
    } else {
        Err(KitchenError::InvalidInput(format!(
            "priority 必须在 1~5 之间, 实际为 {}",
            priority
        )))
    }
}
