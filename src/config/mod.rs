// ==========================================
// 后厨计时系统 - 配置层
// ==========================================
// 职责: 运行参数默认值 + kitchen_kv 覆写
// ==========================================

pub mod config_manager;
pub mod kitchen_config;

pub use config_manager::{config_keys, ConfigManager};
pub use kitchen_config::KitchenConfig;
