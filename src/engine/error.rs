// ==========================================
// 工位分配排程 - 引擎层错误类型
// ==========================================
// 说明: 分析/汇总计算失败即终止，不返回部分结果
// ==========================================

use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("输入关系缺少列: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(#[from] csv::Error),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// 外部求解器失败
    #[error(transparent)]
    Solver(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
