// ==========================================
// 工位分配排程 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::instance_validator::Violation;
use thiserror::Error;

/// 实例校验失败（携带完整、有序的违规列表，不截断）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("实例校验失败:\n{}", render_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// 全部违规消息（按发现顺序）
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("- {}", v.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("不是目录: {0}")]
    NotADirectory(String),

    // ===== 数据校验错误 =====
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ===== 批量导入错误 =====
    #[error("实例文件加载失败 {file}: {source}")]
    BatchFileFailed {
        file: String,
        #[source]
        source: Box<ImportError>,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// 导入结果类型
pub type ImportResult<T> = Result<T, ImportError>;
