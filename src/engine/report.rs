// ==========================================
// 工位分配排程 - 结果汇总引擎
// ==========================================
// 输入: 实例 + 求解器输出（三元组 / 组会面日 / 员工排班日）
// 输出: 三个关系
//   1) EmployeeAssignment: 员工 × 日 宽表
//   2) Groups Meeting day: (Group, Day)，按组排序
//   3) Summary: 单行三个计数
// ==========================================

use crate::domain::{Assignment, AssignmentTable, ProblemInstance, SolverOutput};
use crate::engine::isolation::{IsolationAnalyzer, IsolationReport};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMeetingDay {
    pub group: String,
    pub day: String,
}

/// 汇总行
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// 非哨兵且属于员工兼容工位的三元组数
    pub valid_assignments: usize,
    /// 排班日同时属于员工可出勤日的 (员工, 日) 数
    pub employee_preferences: usize,
    /// 孤立 员工-日 总数
    pub isolated_employees: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResults {
    pub assignment: AssignmentTable,
    pub groups: Vec<GroupMeetingDay>,
    pub summary: SummaryRow,
}

// ==========================================
// ReportAssembler
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportAssembler {
    analyzer: IsolationAnalyzer,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self {
            analyzer: IsolationAnalyzer::new(),
        }
    }

    /// 组装三个输出关系
    pub fn build(&self, inst: &ProblemInstance, output: &SolverOutput) -> ExportResults {
        self.build_with_isolation(inst, output).0
    }

    /// 组装输出关系，同时返回孤立分析明细
    #[instrument(skip_all, fields(assignments = output.assignments.len()))]
    pub fn build_with_isolation(
        &self,
        inst: &ProblemInstance,
        output: &SolverOutput,
    ) -> (ExportResults, IsolationReport) {
        let assignment =
            AssignmentTable::from_assignments(&inst.employees, &inst.days, &output.assignments);
        let groups = meeting_days(&output.group_meeting_day);
        let isolation = self.analyzer.analyze_table(&assignment, inst);

        let summary = SummaryRow {
            valid_assignments: count_valid_assignments(inst, &output.assignments),
            employee_preferences: count_preferences(inst, &output.schedule_by_employee),
            isolated_employees: isolation.total,
        };
        info!(
            valid_assignments = summary.valid_assignments,
            employee_preferences = summary.employee_preferences,
            isolated_employees = summary.isolated_employees,
            "结果汇总完成"
        );

        (
            ExportResults {
                assignment,
                groups,
                summary,
            },
            isolation,
        )
    }
}

/// 便捷函数: 组装输出关系
pub fn build_outputs(
    inst: &ProblemInstance,
    group_meeting_day: &HashMap<String, String>,
    schedule_by_employee: &HashMap<String, HashSet<String>>,
    assignments: &[Assignment],
) -> ExportResults {
    let output = SolverOutput {
        assignments: assignments.to_vec(),
        group_meeting_day: group_meeting_day.clone(),
        schedule_by_employee: schedule_by_employee.clone(),
    };
    ReportAssembler::new().build(inst, &output)
}

fn meeting_days(group_meeting_day: &HashMap<String, String>) -> Vec<GroupMeetingDay> {
    let mut groups: Vec<GroupMeetingDay> = group_meeting_day
        .iter()
        .map(|(g, d)| GroupMeetingDay {
            group: g.clone(),
            day: d.clone(),
        })
        .collect();
    groups.sort_by(|a, b| a.group.cmp(&b.group));
    groups
}

pub fn count_valid_assignments(inst: &ProblemInstance, assignments: &[Assignment]) -> usize {
    assignments
        .iter()
        .filter(|a| match (&a.desk, inst.desks_by_employee.get(&a.employee)) {
            (Some(desk), Some(compatible)) => compatible.contains(desk),
            _ => false,
        })
        .count()
}

pub fn count_preferences(
    inst: &ProblemInstance,
    schedule_by_employee: &HashMap<String, HashSet<String>>,
) -> usize {
    schedule_by_employee
        .iter()
        .map(|(e, days)| match inst.days_by_employee.get(e) {
            Some(available) => days.iter().filter(|d| available.contains(d)).count(),
            None => 0,
        })
        .sum()
}
