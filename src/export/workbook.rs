// ==========================================
// 工位分配排程 - 工作簿读写
// ==========================================
// 格式: 目录下每个工作表一个 CSV 文件，文件名 = 工作表名 + ".csv"
// ==========================================

use crate::domain::{AssignmentRow, AssignmentTable};
use crate::engine::report::ExportResults;
use crate::export::error::{ExportError, ExportResult};
use csv::{ReaderBuilder, Writer};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// 工作表名称（精确）
pub const SHEET_EMPLOYEE_ASSIGNMENT: &str = "EmployeeAssignment";
pub const SHEET_GROUPS_MEETING_DAY: &str = "Groups Meeting day";
pub const SHEET_SUMMARY: &str = "Summary";

// 列名
pub const ASSIGNMENT_EMPLOYEE_COLUMN: &str = "Employee";
pub const GROUP_COLUMNS: [&str; 2] = ["Group", "Day"];
pub const SUMMARY_COLUMNS: [&str; 3] = [
    "Valid assignments",
    "Employee preferences",
    "Isolated employees",
];

/// 已写出的工作表文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookPaths {
    pub employee_assignment: PathBuf,
    pub groups_meeting_day: PathBuf,
    pub summary: PathBuf,
}

pub fn sheet_path(dir: &Path, sheet: &str) -> PathBuf {
    dir.join(format!("{}.csv", sheet))
}

/// 写出工作簿（目录不存在时自动创建）
///
/// 工位 id 与缺席标记冲突时报错，不写出任何文件
///
/// # 参数
/// - dir: 输出目录
/// - results: 三个输出关系
/// - absence_marker: 宽表缺席单元格标记
pub fn write_workbook(
    dir: &Path,
    results: &ExportResults,
    absence_marker: &str,
) -> ExportResult<WorkbookPaths> {
    check_absence_marker(&results.assignment, absence_marker)?;
    fs::create_dir_all(dir)?;

    let paths = WorkbookPaths {
        employee_assignment: sheet_path(dir, SHEET_EMPLOYEE_ASSIGNMENT),
        groups_meeting_day: sheet_path(dir, SHEET_GROUPS_MEETING_DAY),
        summary: sheet_path(dir, SHEET_SUMMARY),
    };

    // ---- EmployeeAssignment
    let mut w = Writer::from_writer(File::create(&paths.employee_assignment)?);
    let mut header = vec![ASSIGNMENT_EMPLOYEE_COLUMN];
    header.extend(results.assignment.days.iter().map(String::as_str));
    w.write_record(&header)?;
    for row in &results.assignment.rows {
        let mut record = vec![row.employee.as_str()];
        record.extend(row.desks.iter().map(|d| d.as_deref().unwrap_or(absence_marker)));
        w.write_record(&record)?;
    }
    w.flush()?;

    // ---- Groups Meeting day
    let mut w = Writer::from_writer(File::create(&paths.groups_meeting_day)?);
    w.write_record(GROUP_COLUMNS)?;
    for g in &results.groups {
        w.write_record([g.group.as_str(), g.day.as_str()])?;
    }
    w.flush()?;

    // ---- Summary
    let mut w = Writer::from_writer(File::create(&paths.summary)?);
    w.write_record(SUMMARY_COLUMNS)?;
    let s = &results.summary;
    w.write_record([
        s.valid_assignments.to_string(),
        s.employee_preferences.to_string(),
        s.isolated_employees.to_string(),
    ])?;
    w.flush()?;

    info!(dir = %dir.display(), "工作簿导出完成");
    Ok(paths)
}

/// 工位值不得与缺席标记（或空串）相同，否则读回时会被当作缺席
fn check_absence_marker(table: &AssignmentTable, absence_marker: &str) -> ExportResult<()> {
    for row in &table.rows {
        for (day, desk) in table.days.iter().zip(row.desks.iter()) {
            if let Some(desk) = desk {
                if desk == absence_marker || desk.trim().is_empty() {
                    warn!(employee = %row.employee, day = %day, desk = %desk, "工位与缺席标记冲突");
                    return Err(ExportError::AbsenceMarkerCollision {
                        employee: row.employee.clone(),
                        day: day.clone(),
                        desk: desk.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// 读取 EmployeeAssignment 工作表为宽表
///
/// # 参数
/// - days: 期望的日列（按实例日序）；缺少任一列或 Employee 列即报错
/// - absence_marker: 缺席标记（空单元格同样视为缺席）
pub fn read_assignment_sheet<R: Read>(
    reader: R,
    days: &[String],
    absence_marker: &str,
) -> ExportResult<AssignmentTable> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);

    let mut missing = Vec::new();
    let employee_col = position(ASSIGNMENT_EMPLOYEE_COLUMN);
    if employee_col.is_none() {
        missing.push(ASSIGNMENT_EMPLOYEE_COLUMN.to_string());
    }
    let mut day_cols = Vec::with_capacity(days.len());
    for day in days {
        match position(day) {
            Some(i) => day_cols.push(i),
            None => missing.push(day.clone()),
        }
    }
    let employee_col = match employee_col {
        Some(i) if missing.is_empty() => i,
        _ => return Err(ExportError::MissingColumns(missing)),
    };

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |i: usize| record.get(i).map(str::trim).unwrap_or("");
        rows.push(AssignmentRow {
            employee: cell(employee_col).to_string(),
            desks: day_cols
                .iter()
                .map(|&i| {
                    let v = cell(i);
                    (!v.is_empty() && v != absence_marker).then(|| v.to_string())
                })
                .collect(),
        });
    }

    Ok(AssignmentTable {
        days: days.to_vec(),
        rows,
    })
}
