// ==========================================
// 工位分配排程 - 配置层
// ==========================================
// 职责: 系统配置管理,支持默认值 / 配置文件 / 环境变量多级覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager};
