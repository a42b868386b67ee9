// ==========================================
// 后厨计时系统 - 应用层
// ==========================================
// 职责: 组装应用状态, 驱动计时轮询
// ==========================================

pub mod poller;
pub mod state;

// 重导出
pub use poller::TimerPoller;
pub use state::{get_default_db_path, AppState};
