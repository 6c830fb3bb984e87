// ==========================================
// 工位分配排程 - 分配结果领域模型
// ==========================================
// 职责: 求解器边界的输入/输出类型 + 宽表/长表表示
// 说明: 求解器输出 (employee, day, desk) 三元组，desk 为哨兵值 "none" 表示当日未分配
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// 求解器用于“当日未分配”的文本哨兵
pub const UNASSIGNED_DESK: &str = "none";

/// 宽表中“缺席”单元格的默认标记
pub const ABSENT_MARKER: &str = "None";

// ==========================================
// Assignment - 单条分配三元组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Assignment {
    pub employee: String,
    pub day: String,
    pub desk: Option<String>, // None = 未分配（哨兵）
}

impl Assignment {
    pub fn new(employee: impl Into<String>, day: impl Into<String>, desk: Option<String>) -> Self {
        Self {
            employee: employee.into(),
            day: day.into(),
            desk,
        }
    }

    /// 从求解器原始文本构造，哨兵值映射为 None
    pub fn from_raw(
        employee: impl Into<String>,
        day: impl Into<String>,
        desk: &str,
        sentinel: &str,
    ) -> Self {
        let desk = if desk == sentinel {
            None
        } else {
            Some(desk.to_string())
        };
        Self::new(employee, day, desk)
    }

    pub fn is_assigned(&self) -> bool {
        self.desk.is_some()
    }
}

// ==========================================
// SolverOutput - 外部求解器返回内容
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOutput {
    pub assignments: Vec<Assignment>,
    pub group_meeting_day: HashMap<String, String>, // group -> 指定会面日
    pub schedule_by_employee: HashMap<String, HashSet<String>>, // employee -> 排班日
}

// ==========================================
// AssignmentTable - 员工 × 日 宽表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    pub employee: String,
    pub desks: Vec<Option<String>>, // 与 AssignmentTable::days 一一对应
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentTable {
    pub days: Vec<String>,
    pub rows: Vec<AssignmentRow>,
}

impl AssignmentTable {
    /// 由三元组构造宽表
    ///
    /// 规则:
    /// - 每个员工一行（按 id 排序），每个日一列（按给定顺序）
    /// - 存在非哨兵三元组的单元格填工位，否则缺席
    /// - 同一 (employee, day) 重复出现时后写覆盖
    pub fn from_assignments(
        employees: &[String],
        days: &[String],
        assignments: &[Assignment],
    ) -> Self {
        let mut cell_desk: HashMap<(&str, &str), Option<&str>> = HashMap::new();
        for a in assignments {
            cell_desk.insert((a.employee.as_str(), a.day.as_str()), a.desk.as_deref());
        }

        let sorted: BTreeSet<&String> = employees.iter().collect();
        let rows = sorted
            .into_iter()
            .map(|e| AssignmentRow {
                employee: e.clone(),
                desks: days
                    .iter()
                    .map(|d| {
                        cell_desk
                            .get(&(e.as_str(), d.as_str()))
                            .copied()
                            .flatten()
                            .map(str::to_string)
                    })
                    .collect(),
            })
            .collect();

        Self {
            days: days.to_vec(),
            rows,
        }
    }

    pub fn cell(&self, employee: &str, day: &str) -> Option<&str> {
        let col = self.days.iter().position(|d| d == day)?;
        self.rows
            .iter()
            .find(|r| r.employee == employee)
            .and_then(|r| r.desks.get(col))
            .and_then(|d| d.as_deref())
    }

    /// 还原为已分配三元组（缺席单元格不输出）
    pub fn to_assignments(&self) -> Vec<Assignment> {
        self.rows
            .iter()
            .flat_map(|row| {
                self.days
                    .iter()
                    .zip(row.desks.iter())
                    .filter_map(move |(day, desk)| {
                        desk.as_ref()
                            .map(|d| Assignment::new(row.employee.clone(), day.clone(), Some(d.clone())))
                    })
            })
            .collect()
    }
}

// ==========================================
// OccupancyRow - (Group, Day, Zone, Employee) 长表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyRow {
    pub group: String,
    pub day: String,
    pub zone: Option<String>, // None = 工位未声明区域
    pub employee: String,
}

impl OccupancyRow {
    pub fn new(
        group: impl Into<String>,
        day: impl Into<String>,
        zone: Option<&str>,
        employee: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            day: day.into(),
            zone: zone.map(str::to_string),
            employee: employee.into(),
        }
    }
}
