// ==========================================
// 工位分配排程 - 预计算索引引擎
// ==========================================
// 职责: 一次性计算求解器所需的全部聚合量
// 输入: ProblemInstance
// 输出: Precalc（只读；load_day 为交给求解器的可变计数器）
// 红线: 纯函数，无副作用，同一实例重复计算结果一致
// ==========================================

use crate::domain::schema::{self, FieldDescriptor};
use crate::domain::ProblemInstance;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use tracing::{debug, instrument};

// ==========================================
// Precalc - 预计算包
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precalc {
    // ===== 基础 =====
    pub cap_zone: HashMap<String, usize>,                  // zone -> 工位数
    pub compat: HashMap<String, HashSet<String>>,          // employee -> 兼容工位
    pub avail: HashMap<String, HashSet<String>>,           // employee -> 可出勤日
    pub group_of_emp: HashMap<String, String>,             // employee -> group
    pub employees_of_group: HashMap<String, Vec<String>>,  // group -> employees
    pub zone_of_desk: HashMap<String, String>,             // desk -> zone

    // ===== 派生 =====
    pub group_size: HashMap<String, usize>,                         // group -> 人数
    pub avail_gd: HashMap<String, HashMap<String, usize>>,          // group -> day -> 可出勤人数
    pub common_days_group: HashMap<String, Vec<String>>,            // group -> 全员可出勤日（按日序）
    pub compat_in_zone: HashMap<String, HashMap<String, usize>>,    // employee -> zone -> 兼容工位数
    pub compat_union_gz: HashMap<String, HashMap<String, usize>>,   // group -> zone -> 组内去重兼容工位数

    // ===== 求解器可变字段 =====
    pub load_day: HashMap<String, i64>, // day -> 负载（初始 0，由求解器更新）
}

impl Precalc {
    pub const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::public("cap_zone", "HashMap<String, usize>"),
        FieldDescriptor::public("compat", "HashMap<String, HashSet<String>>"),
        FieldDescriptor::public("avail", "HashMap<String, HashSet<String>>"),
        FieldDescriptor::public("group_of_emp", "HashMap<String, String>"),
        FieldDescriptor::public("employees_of_group", "HashMap<String, Vec<String>>"),
        FieldDescriptor::public("zone_of_desk", "HashMap<String, String>"),
        FieldDescriptor::public("group_size", "HashMap<String, usize>"),
        FieldDescriptor::public("avail_gd", "HashMap<String, HashMap<String, usize>>"),
        FieldDescriptor::public("common_days_group", "HashMap<String, Vec<String>>"),
        FieldDescriptor::public("compat_in_zone", "HashMap<String, HashMap<String, usize>>"),
        FieldDescriptor::public("compat_union_gz", "HashMap<String, HashMap<String, usize>>"),
        FieldDescriptor::public("load_day", "HashMap<String, i64>"),
    ];

    pub fn attribute_names(&self, with_types: bool) -> Vec<String> {
        schema::attribute_names(Self::FIELDS, false, with_types)
    }

    pub fn print_attributes<W: Write>(&self, out: &mut W, with_types: bool) -> io::Result<()> {
        schema::print_attributes(out, Self::FIELDS, false, with_types)
    }

    /// 组 g 在日 d 可出勤人数（未知组/日为 0）
    pub fn available_in_group(&self, group: &str, day: &str) -> usize {
        self.avail_gd
            .get(group)
            .and_then(|by_day| by_day.get(day))
            .copied()
            .unwrap_or(0)
    }
}

// ==========================================
// PrecalcEngine - 无状态引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct PrecalcEngine;

impl PrecalcEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算预计算包
    #[instrument(skip_all, fields(
        employees = inst.employees.len(),
        groups = inst.groups.len(),
        zones = inst.zones.len(),
        days = inst.days.len()
    ))]
    pub fn compute(&self, inst: &ProblemInstance) -> Precalc {
        // ---- 基础
        let cap_zone: HashMap<String, usize> = inst
            .desks_by_zone
            .iter()
            .map(|(z, ds)| (z.clone(), ds.len()))
            .collect();
        let compat = to_sets(&inst.desks_by_employee);
        let avail = to_sets(&inst.days_by_employee);
        let group_of_emp: HashMap<String, String> = inst
            .group_of_employee
            .iter()
            .map(|(e, g)| (e.clone(), g.clone()))
            .collect();
        let zone_of_desk: HashMap<String, String> = inst
            .zone_of_desk
            .iter()
            .map(|(d, z)| (d.clone(), z.clone()))
            .collect();

        // 已声明的组全部出现（无成员视为空组）
        let mut employees_of_group: HashMap<String, Vec<String>> = inst
            .groups
            .iter()
            .map(|g| (g.clone(), Vec::new()))
            .collect();
        for (g, es) in &inst.employees_by_group {
            employees_of_group.insert(g.clone(), es.clone());
        }

        let desks_in_zone: HashMap<&str, HashSet<&str>> = inst
            .desks_by_zone
            .iter()
            .map(|(z, ds)| (z.as_str(), ds.iter().map(String::as_str).collect()))
            .collect();
        let no_desks = HashSet::new();
        let zone_desks = |z: &str| desks_in_zone.get(z).unwrap_or(&no_desks);

        let group_size: HashMap<String, usize> = employees_of_group
            .iter()
            .map(|(g, es)| (g.clone(), es.len()))
            .collect();

        // ---- group × day: 可出勤人数
        let mut avail_gd: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (g, es) in &employees_of_group {
            let by_day = avail_gd
                .entry(g.clone())
                .or_insert_with(|| inst.days.iter().map(|d| (d.clone(), 0)).collect());
            for e in es {
                for d in avail.get(e).into_iter().flatten() {
                    *by_day.entry(d.clone()).or_insert(0) += 1;
                }
            }
        }

        // ---- group × day: 全员可出勤日（按实例日序；空组无共同日）
        let common_days_group: HashMap<String, Vec<String>> = employees_of_group
            .keys()
            .map(|g| {
                let size = group_size.get(g).copied().unwrap_or(0);
                let days = if size == 0 {
                    Vec::new()
                } else {
                    inst.days
                        .iter()
                        .filter(|d| {
                            avail_gd
                                .get(g)
                                .and_then(|by_day| by_day.get(*d))
                                .copied()
                                .unwrap_or(0)
                                == size
                        })
                        .cloned()
                        .collect()
                };
                (g.clone(), days)
            })
            .collect();

        // ---- employee × zone: 兼容工位数（稠密表，0 也记录）
        let no_compat = HashSet::new();
        let compat_in_zone: HashMap<String, HashMap<String, usize>> = inst
            .employees
            .iter()
            .map(|e| {
                let ds = compat.get(e).unwrap_or(&no_compat);
                let by_zone = inst
                    .zones
                    .iter()
                    .map(|z| {
                        let zd = zone_desks(z);
                        (z.clone(), ds.iter().filter(|d| zd.contains(d.as_str())).count())
                    })
                    .collect();
                (e.clone(), by_zone)
            })
            .collect();

        // ---- group × zone: 组内兼容工位并集（去重，不是求和）
        let compat_union_gz: HashMap<String, HashMap<String, usize>> = employees_of_group
            .iter()
            .map(|(g, es)| {
                let union: HashSet<&str> = es
                    .iter()
                    .filter_map(|e| compat.get(e))
                    .flatten()
                    .map(String::as_str)
                    .collect();
                let by_zone = inst
                    .zones
                    .iter()
                    .map(|z| (z.clone(), union.intersection(zone_desks(z)).count()))
                    .collect();
                (g.clone(), by_zone)
            })
            .collect();

        // ---- day: 初始负载
        let load_day: HashMap<String, i64> = inst.days.iter().map(|d| (d.clone(), 0)).collect();

        debug!(
            zones_with_desks = cap_zone.len(),
            groups = employees_of_group.len(),
            "预计算完成"
        );

        Precalc {
            cap_zone,
            compat,
            avail,
            group_of_emp,
            employees_of_group,
            zone_of_desk,
            group_size,
            avail_gd,
            common_days_group,
            compat_in_zone,
            compat_union_gz,
            load_day,
        }
    }
}

/// 便捷函数: 计算预计算包
pub fn compute_precalcs(inst: &ProblemInstance) -> Precalc {
    PrecalcEngine::new().compute(inst)
}

fn to_sets(relation: &crate::domain::RelationMap) -> HashMap<String, HashSet<String>> {
    relation
        .iter()
        .map(|(k, vs)| (k.clone(), vs.iter().cloned().collect()))
        .collect()
}
