// ==========================================
// 工位分配排程 - 问题实例领域模型
// ==========================================
// 职责: 实例的规范内存表示 + 反向索引
// 红线: 构造后不可变（反向索引在构造时一次性填充）
// ==========================================

use crate::domain::schema::{self, FieldDescriptor};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::OnceLock;

/// 关系映射: key -> [id, ...]
pub type RelationMap = BTreeMap<String, Vec<String>>;

// ==========================================
// InstanceSummary - 实例规模摘要
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstanceSummary {
    pub n_employees: usize,
    pub n_desks: usize,
    pub n_days: usize,
    pub n_groups: usize,
    pub n_zones: usize,
}

// ==========================================
// ProblemInstance - 问题实例
// ==========================================
// 说明: days 的顺序有业务含义（决定输出列顺序），其余集合顺序无意义
#[derive(Debug, Clone, Default)]
pub struct ProblemInstance {
    // ===== 标识集合 =====
    pub employees: Vec<String>,
    pub desks: Vec<String>,
    pub days: Vec<String>,
    pub groups: Vec<String>,
    pub zones: Vec<String>,

    // ===== 关系映射 =====
    pub desks_by_zone: RelationMap,      // zone -> desks（一个工位至多属于一个区域）
    pub desks_by_employee: RelationMap,  // employee -> 兼容工位（可为空）
    pub employees_by_group: RelationMap, // group -> employees（一个员工至多属于一个组）
    pub days_by_employee: RelationMap,   // employee -> 可出勤日

    // ===== 反向索引 =====
    pub zone_of_desk: BTreeMap<String, String>,
    pub group_of_employee: BTreeMap<String, String>,

    summary_cache: OnceLock<InstanceSummary>,
}

impl ProblemInstance {
    /// 字段静态描述（替代运行时反射）
    pub const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::public("employees", "Vec<String>"),
        FieldDescriptor::public("desks", "Vec<String>"),
        FieldDescriptor::public("days", "Vec<String>"),
        FieldDescriptor::public("groups", "Vec<String>"),
        FieldDescriptor::public("zones", "Vec<String>"),
        FieldDescriptor::public("desks_by_zone", "BTreeMap<String, Vec<String>>"),
        FieldDescriptor::public("desks_by_employee", "BTreeMap<String, Vec<String>>"),
        FieldDescriptor::public("employees_by_group", "BTreeMap<String, Vec<String>>"),
        FieldDescriptor::public("days_by_employee", "BTreeMap<String, Vec<String>>"),
        FieldDescriptor::public("zone_of_desk", "BTreeMap<String, String>"),
        FieldDescriptor::public("group_of_employee", "BTreeMap<String, String>"),
        FieldDescriptor::private("summary_cache", "OnceLock<InstanceSummary>"),
    ];

    /// 构造实例并立即填充反向索引
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        employees: Vec<String>,
        desks: Vec<String>,
        days: Vec<String>,
        groups: Vec<String>,
        zones: Vec<String>,
        desks_by_zone: RelationMap,
        desks_by_employee: RelationMap,
        employees_by_group: RelationMap,
        days_by_employee: RelationMap,
    ) -> Self {
        let mut inst = Self {
            employees,
            desks,
            days,
            groups,
            zones,
            desks_by_zone,
            desks_by_employee,
            employees_by_group,
            days_by_employee,
            ..Self::default()
        };
        inst.build_reverse_indices();
        inst
    }

    /// 重建 zone_of_desk / group_of_employee
    ///
    /// 非严格模式下若同一 id 出现在多个归属下，按映射遍历顺序后写覆盖
    pub fn build_reverse_indices(&mut self) {
        self.zone_of_desk = invert(&self.desks_by_zone);
        self.group_of_employee = invert(&self.employees_by_group);
    }

    /// 实例规模摘要（首次调用时计算，之后复用）
    pub fn summary(&self) -> InstanceSummary {
        *self.summary_cache.get_or_init(|| InstanceSummary {
            n_employees: self.employees.len(),
            n_desks: self.desks.len(),
            n_days: self.days.len(),
            n_groups: self.groups.len(),
            n_zones: self.zones.len(),
        })
    }

    pub fn zone_of(&self, desk: &str) -> Option<&str> {
        self.zone_of_desk.get(desk).map(String::as_str)
    }

    pub fn group_of(&self, employee: &str) -> Option<&str> {
        self.group_of_employee.get(employee).map(String::as_str)
    }

    pub fn attribute_names(&self, include_private: bool, with_types: bool) -> Vec<String> {
        schema::attribute_names(Self::FIELDS, include_private, with_types)
    }

    pub fn print_attributes<W: Write>(
        &self,
        out: &mut W,
        include_private: bool,
        with_types: bool,
    ) -> io::Result<()> {
        schema::print_attributes(out, Self::FIELDS, include_private, with_types)
    }
}

fn invert(relation: &RelationMap) -> BTreeMap<String, String> {
    let mut reverse = BTreeMap::new();
    for (owner, members) in relation {
        for member in members {
            reverse.insert(member.clone(), owner.clone());
        }
    }
    reverse
}
