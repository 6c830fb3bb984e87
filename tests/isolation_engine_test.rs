// ==========================================
// IsolationAnalyzer 集成测试
// ==========================================
// 测试目标: 验证 (组, 日) 分区内的孤立员工统计
// 覆盖范围: 单人区域、全员分散、单区域分区、无区域工位、CSV 长表读取
// ==========================================


use desk_planner::domain::{AssignmentTable, OccupancyRow};
use desk_planner::engine::{
    count_isolated_employees, read_occupancy_csv, EngineError, IsolationAnalyzer,
};
use test_helpers::{sample_assignments, sample_instance};

// ==========================================
// 测试辅助函数
// ==========================================

/// 在同一 (G, L) 分区内按区域人数生成占用行
fn partition(zone_sizes: &[(&str, usize)]) -> Vec<OccupancyRow> {
    let mut rows = Vec::new();
    let mut n = 0;
    for (zone, size) in zone_sizes {
        for _ in 0..*size {
            n += 1;
            rows.push(OccupancyRow::new("G", "L", Some(*zone), format!("E{}", n)));
        }
    }
    rows
}

// ==========================================
// 分区规则
// ==========================================

#[test]
fn test_singleton_zone_next_to_larger_zone() {
    assert_eq!(count_isolated_employees(&partition(&[("Z1", 1), ("Z2", 3)])), 1);
}

#[test]
fn test_all_singletons_are_all_isolated() {
    assert_eq!(
        count_isolated_employees(&partition(&[("Z1", 1), ("Z2", 1), ("Z3", 1)])),
        3
    );
}

#[test]
fn test_single_zone_partition_has_no_isolation() {
    assert_eq!(count_isolated_employees(&partition(&[("Z1", 4)])), 0);
    // 分区只有一个人时同样不计
    assert_eq!(count_isolated_employees(&partition(&[("Z1", 1)])), 0);
}

#[test]
fn test_balanced_zones_have_no_isolation() {
    assert_eq!(count_isolated_employees(&partition(&[("Z1", 2), ("Z2", 2)])), 0);
}

#[test]
fn test_rows_without_zone_are_ignored() {
    let mut rows = partition(&[("Z1", 2)]);
    rows.push(OccupancyRow::new("G", "L", None, "E9"));

    // 无区域行不构成第二个区域
    assert_eq!(count_isolated_employees(&rows), 0);
}

#[test]
fn test_partitions_are_independent() {
    let mut rows = partition(&[("Z1", 1), ("Z2", 1)]);
    rows.push(OccupancyRow::new("G", "Ma", Some("Z1"), "E1"));
    rows.push(OccupancyRow::new("G", "Ma", Some("Z1"), "E2"));
    rows.push(OccupancyRow::new("H", "L", Some("Z3"), "E7"));

    let report = IsolationAnalyzer::new().analyze(&rows);
    assert_eq!(report.total, 2);
    // 仅 ≥2 个区域的分区出现在明细中
    assert_eq!(report.partitions.len(), 1);
    assert_eq!(report.partitions[0].group, "G");
    assert_eq!(report.partitions[0].day, "L");
    assert_eq!(report.partitions[0].isolated, 2);
}

// ==========================================
// 宽表分析
// ==========================================

#[test]
fn test_analyze_sample_assignment_table() {
    let inst = sample_instance();
    let table = AssignmentTable::from_assignments(&inst.employees, &inst.days, &sample_assignments());

    let report = IsolationAnalyzer::new().analyze_table(&table, &inst);
    assert_eq!(report.total, 4);

    let by_key: Vec<(&str, &str, usize)> = report
        .partitions
        .iter()
        .map(|p| (p.group.as_str(), p.day.as_str(), p.isolated))
        .collect();
    assert_eq!(
        by_key,
        vec![("G1", "L", 1), ("G1", "Mi", 1), ("G2", "Ma", 2)]
    );

    // G2/Ma: E6 的 D7 无区域，不计入区域人数
    let g2_ma = &report.partitions[2];
    assert_eq!(g2_ma.zone_counts.len(), 2);
    assert_eq!(g2_ma.zone_counts["Z2"], 1);
    assert_eq!(g2_ma.zone_counts["Z3"], 1);
}

#[test]
fn test_occupancy_from_table_skips_unassigned_cells() {
    let inst = sample_instance();
    let table = AssignmentTable::from_assignments(&inst.employees, &inst.days, &sample_assignments());

    let rows = IsolationAnalyzer::new().occupancy_from_table(&table, &inst);
    // 11 条分配中 1 条为未分配
    assert_eq!(rows.len(), 10);
    assert!(rows
        .iter()
        .any(|r| r.employee == "E6" && r.day == "Ma" && r.zone.is_none()));
    assert!(!rows.iter().any(|r| r.employee == "E6" && r.day == "J"));
}

// ==========================================
// CSV 长表读取
// ==========================================

#[test]
fn test_read_occupancy_csv() {
    let text = "Group,Day,Zone,Employee\n\
                G1,L,Z1,E1\n\
                G1,L,Z1,E2\n\
                G1,L,Z2,E3\n\
                G1,L,,E4\n";
    let rows = read_occupancy_csv(text.as_bytes()).unwrap();

    assert_eq!(rows.len(), 4);
    assert!(rows[3].zone.is_none());
    assert_eq!(count_isolated_employees(&rows), 1);
}

#[test]
fn test_read_occupancy_csv_column_order_independent() {
    let text = "Employee,Zone,Day,Group\nE1,Z1,L,G1\nE2,Z2,L,G1\n";
    let rows = read_occupancy_csv(text.as_bytes()).unwrap();

    assert_eq!(rows[0].group, "G1");
    assert_eq!(rows[1].zone.as_deref(), Some("Z2"));
    assert_eq!(count_isolated_employees(&rows), 2);
}

#[test]
fn test_read_occupancy_csv_missing_columns() {
    let text = "Group,Day,Employee\nG1,L,E1\n";
    let err = read_occupancy_csv(text.as_bytes()).unwrap_err();

    match err {
        EngineError::MissingColumns(cols) => assert_eq!(cols, vec!["Zone".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
}
