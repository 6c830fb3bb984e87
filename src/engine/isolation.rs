// ==========================================
// 工位分配排程 - 孤立员工分析引擎
// ==========================================
// 输入: 宽表（员工 × 日）或 (Group, Day, Zone, Employee) 长表
// 输出: 孤立的 员工-日 总数 + 各 (组, 日) 分区明细
// ==========================================
// 规则（按 (组, 日) 分区）:
// 1) 区域未知的行整体剔除（不影响他人是否孤立）
// 2) 分区只涉及一个区域: 无人孤立
// 3) 分区涉及 ≥2 个区域:
//    - 每个区域恰好 1 人 → 全员孤立
//    - 否则仅单人区域中的员工孤立
// ==========================================

use crate::domain::{AssignmentTable, OccupancyRow, ProblemInstance};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, instrument};

/// 长表必需列
pub const OCCUPANCY_COLUMNS: [&str; 4] = ["Group", "Day", "Zone", "Employee"];

/// 单个 (组, 日) 分区的分析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionIsolation {
    pub group: String,
    pub day: String,
    pub zone_counts: BTreeMap<String, usize>,
    pub isolated: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolationReport {
    pub total: usize,
    pub partitions: Vec<PartitionIsolation>, // 仅含 ≥2 个区域的分区
}

// ==========================================
// IsolationAnalyzer
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct IsolationAnalyzer;

impl IsolationAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// 宽表 → 长表
    ///
    /// 仅输出使用了工位的单元格；无组员工不参与分区
    pub fn occupancy_from_table(
        &self,
        table: &AssignmentTable,
        inst: &ProblemInstance,
    ) -> Vec<OccupancyRow> {
        let mut rows = Vec::new();
        for row in &table.rows {
            let Some(group) = inst.group_of(&row.employee) else {
                debug!(employee = %row.employee, "员工未归属任何组，跳过");
                continue;
            };
            for (day, desk) in table.days.iter().zip(row.desks.iter()) {
                if let Some(desk) = desk {
                    rows.push(OccupancyRow::new(
                        group,
                        day.clone(),
                        inst.zone_of(desk),
                        row.employee.clone(),
                    ));
                }
            }
        }
        rows
    }

    /// 分析长表
    #[instrument(skip_all, fields(rows = rows.len()))]
    pub fn analyze(&self, rows: &[OccupancyRow]) -> IsolationReport {
        // group -> day -> zone -> 人数（一次遍历构建）
        let mut counts: BTreeMap<&str, BTreeMap<&str, BTreeMap<&str, usize>>> = BTreeMap::new();
        for row in rows {
            let Some(zone) = row.zone.as_deref() else {
                continue;
            };
            *counts
                .entry(row.group.as_str())
                .or_default()
                .entry(row.day.as_str())
                .or_default()
                .entry(zone)
                .or_insert(0) += 1;
        }

        let mut report = IsolationReport::default();
        for (group, by_day) in &counts {
            for (day, by_zone) in by_day {
                if by_zone.len() <= 1 {
                    continue;
                }
                let isolated = isolated_in_partition(by_zone);
                debug!(group, day, zones = by_zone.len(), isolated, "分区孤立统计");
                report.total += isolated;
                report.partitions.push(PartitionIsolation {
                    group: group.to_string(),
                    day: day.to_string(),
                    zone_counts: by_zone
                        .iter()
                        .map(|(z, n)| (z.to_string(), *n))
                        .collect(),
                    isolated,
                });
            }
        }
        report
    }

    /// 孤立 员工-日 总数
    pub fn count_isolated(&self, rows: &[OccupancyRow]) -> usize {
        self.analyze(rows).total
    }

    /// 直接分析宽表
    pub fn analyze_table(&self, table: &AssignmentTable, inst: &ProblemInstance) -> IsolationReport {
        self.analyze(&self.occupancy_from_table(table, inst))
    }
}

fn isolated_in_partition(by_zone: &BTreeMap<&str, usize>) -> usize {
    if by_zone.values().all(|&n| n == 1) {
        by_zone.values().sum()
    } else {
        by_zone.values().filter(|&&n| n == 1).count()
    }
}

/// 便捷函数: 孤立 员工-日 总数
pub fn count_isolated_employees(rows: &[OccupancyRow]) -> usize {
    IsolationAnalyzer::new().count_isolated(rows)
}

/// 从 CSV 读取长表（列: Group, Day, Zone, Employee；空 Zone 视为未知区域）
pub fn read_occupancy_csv<R: Read>(reader: R) -> EngineResult<Vec<OccupancyRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let missing: Vec<String> = OCCUPANCY_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingColumns(missing));
    }

    let index_of = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let (gi, di, zi, ei) = (
        index_of("Group"),
        index_of("Day"),
        index_of("Zone"),
        index_of("Employee"),
    );

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |i: usize| record.get(i).map(str::trim).unwrap_or("");
        let zone = field(zi);
        rows.push(OccupancyRow::new(
            field(gi),
            field(di),
            (!zone.is_empty()).then_some(zone),
            field(ei),
        ));
    }
    Ok(rows)
}
