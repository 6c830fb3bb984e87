// ==========================================
// 工位分配排程 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存 key-value（默认值 → JSON 配置文件 → 覆写，后者覆盖前者）
// 说明: 环境变量/命令行覆写由 cli::Cli 解析后经 apply_overrides 注入
// ==========================================

use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 严格校验（存在任何违规即失败）
    pub const STRICT_VALIDATION: &str = "strict_validation";
    /// 批量加载时识别的实例文件扩展名
    pub const INSTANCE_EXTENSION: &str = "instance_extension";
    /// 宽表缺席单元格标记
    pub const ABSENCE_MARKER: &str = "absence_marker";
    /// 求解器输出中“未分配”哨兵
    pub const UNASSIGNED_SENTINEL: &str = "unassigned_sentinel";
    /// 结果导出目录
    pub const OUTPUT_DIR: &str = "output_dir";

    pub const ALL: [&str; 5] = [
        STRICT_VALIDATION,
        INSTANCE_EXTENSION,
        ABSENCE_MARKER,
        UNASSIGNED_SENTINEL,
        OUTPUT_DIR,
    ];
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    FormatError(String),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::FormatError(err.to_string())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// 创建仅含默认值的配置
    pub fn new() -> Self {
        let values = [
            (config_keys::STRICT_VALIDATION, "true"),
            (config_keys::INSTANCE_EXTENSION, "json"),
            (config_keys::ABSENCE_MARKER, crate::domain::ABSENT_MARKER),
            (config_keys::UNASSIGNED_SENTINEL, crate::domain::UNASSIGNED_DESK),
            (config_keys::OUTPUT_DIR, "output"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { values }
    }

    /// 从 JSON 配置文件加载（对象: key -> 标量值），未出现的键保持默认
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::FormatError("配置根节点必须是对象".to_string()))?;

        let mut manager = Self::new();
        for (key, v) in obj {
            let text = match v {
                Value::String(s) => s.clone(),
                Value::Bool(_) | Value::Number(_) => v.to_string(),
                _ => {
                    return Err(ConfigError::ConfigValueError {
                        key: key.clone(),
                        value: v.to_string(),
                        message: "仅支持字符串/布尔/数值".to_string(),
                    })
                }
            };
            manager.set(key, text);
        }
        Ok(manager)
    }

    /// 应用覆写（key, value）
    pub fn apply_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in overrides {
            tracing::debug!(key = %key, value = %value, "配置覆写");
            self.values.insert(key, value);
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    // ===== 类型化读取 =====

    pub fn strict_validation(&self) -> Result<bool, ConfigError> {
        let raw = self.get_config_or_default(config_keys::STRICT_VALIDATION, "true");
        parse_bool(&raw).ok_or_else(|| ConfigError::ConfigValueError {
            key: config_keys::STRICT_VALIDATION.to_string(),
            value: raw.clone(),
            message: "期望布尔值".to_string(),
        })
    }

    pub fn instance_extension(&self) -> String {
        self.get_config_or_default(config_keys::INSTANCE_EXTENSION, "json")
            .trim_start_matches('.')
            .to_string()
    }

    pub fn absence_marker(&self) -> String {
        self.get_config_or_default(config_keys::ABSENCE_MARKER, crate::domain::ABSENT_MARKER)
    }

    pub fn unassigned_sentinel(&self) -> String {
        self.get_config_or_default(
            config_keys::UNASSIGNED_SENTINEL,
            crate::domain::UNASSIGNED_DESK,
        )
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.get_config_or_default(config_keys::OUTPUT_DIR, "output"))
    }

    /// 获取所有配置的快照（JSON，按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let sorted: BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&json!(sorted))?)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
