// ==========================================
// 工位分配排程 - 命令行参数
// ==========================================
// 优先级: 默认值 → 配置文件 → 环境变量 → 命令行参数（后者覆盖前者）
// 环境变量与参数一一对应: DESK_PLANNER_<KEY>
// ==========================================

use crate::config::{config_keys, ConfigError, ConfigManager};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(name = "desk-planner")]
#[command(about = "工位分配排程: 实例校验、预计算索引与结果汇总导出")]
#[command(version)]
pub struct Cli {
    /// 实例文件（*.json）或实例目录
    pub input: PathBuf,

    /// 已记录的求解结果（JSON），仅单实例模式可用
    pub solution: Option<PathBuf>,

    /// 配置文件（JSON 对象: key -> 标量值）
    #[arg(short, long, env = "DESK_PLANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// 严格校验（true/false, yes/no, on/off, 1/0）
    #[arg(long, env = "DESK_PLANNER_STRICT_VALIDATION", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub strict_validation: Option<bool>,

    /// 批量加载时识别的实例文件扩展名
    #[arg(long, env = "DESK_PLANNER_INSTANCE_EXTENSION")]
    pub instance_extension: Option<String>,

    /// 宽表缺席单元格标记
    #[arg(long, env = "DESK_PLANNER_ABSENCE_MARKER")]
    pub absence_marker: Option<String>,

    /// 求解结果中“未分配”哨兵
    #[arg(long, env = "DESK_PLANNER_UNASSIGNED_SENTINEL")]
    pub unassigned_sentinel: Option<String>,

    /// 结果导出目录
    #[arg(short, long, env = "DESK_PLANNER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// 命令行/环境变量给出的配置覆写
    pub fn overrides(&self) -> Vec<(String, String)> {
        [
            (
                config_keys::STRICT_VALIDATION,
                self.strict_validation.map(|b| b.to_string()),
            ),
            (config_keys::INSTANCE_EXTENSION, self.instance_extension.clone()),
            (config_keys::ABSENCE_MARKER, self.absence_marker.clone()),
            (config_keys::UNASSIGNED_SENTINEL, self.unassigned_sentinel.clone()),
            (
                config_keys::OUTPUT_DIR,
                self.output_dir.as_ref().map(|p| p.display().to_string()),
            ),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
    }

    /// 组装最终配置
    pub fn load_config(&self) -> Result<ConfigManager, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ConfigManager::from_json_file(path)?,
            None => ConfigManager::new(),
        };
        config.apply_overrides(self.overrides());
        Ok(config)
    }
}
