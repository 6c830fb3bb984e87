// ==========================================
// 工位分配排程 - 导出层
// ==========================================
// 职责: 将三个输出关系写为工作簿（每个工作表一个 CSV 文件）
// 工作表: EmployeeAssignment / Groups Meeting day / Summary
// ==========================================

pub mod error;
pub mod workbook;

pub use error::{ExportError, ExportResult};
pub use workbook::{
    read_assignment_sheet, sheet_path, write_workbook, WorkbookPaths, ASSIGNMENT_EMPLOYEE_COLUMN,
    GROUP_COLUMNS, SHEET_EMPLOYEE_ASSIGNMENT, SHEET_GROUPS_MEETING_DAY, SHEET_SUMMARY,
    SUMMARY_COLUMNS,
};
