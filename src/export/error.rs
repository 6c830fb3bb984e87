// ==========================================
// 工位分配排程 - 导出模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 读写失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("工作表缺少列: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("工位 '{desk}' 与缺席标记相同，无法写入 ({employee}, {day})")]
    AbsenceMarkerCollision {
        employee: String,
        day: String,
        desk: String,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;
