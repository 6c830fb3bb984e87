// ==========================================
// 工位分配排程 - 实例整洁关系视图
// ==========================================
// 用途: 将关系映射展开为两列长表，便于检查与连接
// 输出: 每个关系按 (第一列, 第二列) 字典序排序
// ==========================================

use crate::domain::{ProblemInstance, RelationMap};

/// 两列关系
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub columns: [&'static str; 2],
    pub rows: Vec<(String, String)>,
}

/// 实例的四个整洁关系
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRelations {
    pub desks_zone: Relation,           // (zone, desk)
    pub groups_employees: Relation,     // (group, employee)
    pub days_employees: Relation,       // (employee, day)
    pub compat_employee_desk: Relation, // (employee, desk)
}

pub fn to_relations(inst: &ProblemInstance) -> InstanceRelations {
    InstanceRelations {
        desks_zone: flatten(&inst.desks_by_zone, ["zone", "desk"]),
        groups_employees: flatten(&inst.employees_by_group, ["group", "employee"]),
        days_employees: flatten(&inst.days_by_employee, ["employee", "day"]),
        compat_employee_desk: flatten(&inst.desks_by_employee, ["employee", "desk"]),
    }
}

fn flatten(relation: &RelationMap, columns: [&'static str; 2]) -> Relation {
    let mut rows: Vec<(String, String)> = relation
        .iter()
        .flat_map(|(k, vs)| vs.iter().map(move |v| (k.clone(), v.clone())))
        .collect();
    rows.sort();
    Relation { columns, rows }
}
