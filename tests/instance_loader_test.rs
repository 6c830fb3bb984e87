// ==========================================
// InstanceLoader 集成测试
// ==========================================
// 测试目标: 实例文件读取、严格/非严格校验、目录批量加载
// ==========================================


use desk_planner::importer::{
    load_all_instances, load_instance, to_relations, ImportError, InstanceLoader, ViolationKind,
};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use test_helpers::{sample_instance, sample_instance_json, write_json};

// ==========================================
// 单文件加载
// ==========================================

#[test]
fn test_load_sample_instance_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_json(dir.path(), "sample.json", &sample_instance_json()).unwrap();

    let loaded = load_instance(path.as_path(), true).expect("样例实例应加载成功");
    assert!(loaded.is_valid());

    let inst = loaded.instance;
    let summary = inst.summary();
    assert_eq!(summary.n_employees, 6);
    assert_eq!(summary.n_desks, 7);
    assert_eq!(summary.n_days, 5);
    assert_eq!(summary.n_groups, 3);
    assert_eq!(summary.n_zones, 3);

    // 声明顺序保持不变
    assert_eq!(inst.days, vec!["L", "Ma", "Mi", "J", "V"]);

    // 反向索引
    assert_eq!(inst.zone_of("D4"), Some("Z2"));
    assert_eq!(inst.zone_of("D7"), None);
    assert_eq!(inst.group_of("E5"), Some("G2"));
    assert_eq!(inst.employees_by_group["G3"], Vec::<String>::new());
}

#[test]
fn test_load_missing_file() {
    let err = load_instance(Path::new("/nonexistent/instance.json"), true).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_load_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_instance(path.as_path(), true).unwrap_err();
    assert!(matches!(err, ImportError::JsonParseError(_)));
}

// ==========================================
// 校验
// ==========================================

#[test]
fn test_missing_keys_short_circuit() {
    let mut data = sample_instance_json();
    let obj = data.as_object_mut().unwrap();
    obj.remove("Zones");
    obj.remove("Days_E");
    // 其余错误不应被报告
    obj.insert("Desks".to_string(), json!("not a list"));

    let err = load_instance(data, true).unwrap_err();
    match err {
        ImportError::Validation(v) => {
            assert_eq!(v.messages(), vec!["Missing key: Zones", "Missing key: Days_E"]);
            assert!(v
                .violations
                .iter()
                .all(|x| x.kind == ViolationKind::MissingKey));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_strict_mode_reports_all_reference_errors() {
    let mut data = sample_instance_json();
    data["Desks_E"]["E9"] = json!(["D1"]);
    data["Days_E"]["E1"] = json!(["L", "Sa"]);
    data["Employees_G"]["G2"] = json!(["E4", "E5", "E6", "E1"]);

    let err = load_instance(data, true).unwrap_err();
    let ImportError::Validation(v) = err else {
        panic!("应返回校验错误");
    };
    let messages = v.messages();
    assert!(messages.contains(&"Employee 'E9' in Desks_E not declared in Employees."));
    assert!(messages.contains(&"Day 'Sa' in Days_E[E1] not declared in Days."));
    assert!(messages.contains(&"Employee 'E1' appears in multiple groups ('G1', 'G2')."));

    // 错误文本汇总全部违规
    let text = v.to_string();
    assert!(text.contains("- Day 'Sa' in Days_E[E1] not declared in Days."));
}

#[test]
fn test_desk_in_two_zones_is_cross_ownership() {
    let mut data = sample_instance_json();
    data["Desks_Z"]["Z3"] = json!(["D6", "D1"]);

    let loaded = load_instance(data, false).expect("非严格模式应返回实例");
    assert!(!loaded.is_valid());
    assert_eq!(loaded.violations.len(), 1);
    assert_eq!(loaded.violations[0].kind, ViolationKind::CrossOwnership);
    assert_eq!(
        loaded.violations[0].message,
        "Desk 'D1' appears in multiple zones ('Z1', 'Z3')."
    );
}

#[test]
fn test_repeated_members_rejected_in_strict_mode() {
    let mut data = sample_instance_json();
    data["Desks_Z"]["Z1"] = json!(["D1", "D2", "D3", "D1"]);
    data["Employees_G"]["G1"] = json!(["E1", "E2", "E3", "E2"]);

    let err = load_instance(data.clone(), true).unwrap_err();
    let ImportError::Validation(v) = err else {
        panic!("应返回校验错误");
    };
    assert_eq!(
        v.messages(),
        vec![
            "Desk 'D1' appears more than once in Desks_Z[Z1].",
            "Employee 'E2' appears more than once in Employees_G[G1].",
        ]
    );
    assert!(v
        .violations
        .iter()
        .all(|x| x.kind == ViolationKind::DuplicateId));

    // 非严格模式照常构造，违规交由调用方判断
    let loaded = load_instance(data, false).unwrap();
    assert_eq!(loaded.violations.len(), 2);
}

#[test]
fn test_duplicate_ids_rejected() {
    let mut data = sample_instance_json();
    data["Days"] = json!(["L", "Ma", "Mi", "J", "V", "L"]);

    let err = load_instance(data, true).unwrap_err();
    let ImportError::Validation(v) = err else {
        panic!("应返回校验错误");
    };
    assert_eq!(v.violations.len(), 1);
    assert_eq!(v.violations[0].kind, ViolationKind::DuplicateId);
    assert_eq!(v.violations[0].message, "Values under 'Days' must be unique.");
}

#[test]
fn test_non_strict_builds_best_effort_instance() {
    let mut data = sample_instance_json();
    data["Desks_E"]["E1"] = json!(["D1", 42]);

    let loaded = load_instance(data, false).unwrap();
    assert_eq!(loaded.violations.len(), 1);
    assert_eq!(
        loaded.violations[0].message,
        "Key 'Desks_E' must map str -> list[str]."
    );
    // 非字符串元素被跳过
    assert_eq!(loaded.instance.desks_by_employee["E1"], vec!["D1"]);
}

// ==========================================
// 批量加载
// ==========================================

#[test]
fn test_load_dir_keys_by_file_stem() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "b_week.json", &sample_instance_json()).unwrap();
    write_json(dir.path(), "a_week.json", &sample_instance_json()).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let instances = load_all_instances(dir.path()).unwrap();
    let names: Vec<&str> = instances.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["a_week", "b_week"]);
}

#[test]
fn test_load_dir_aborts_on_invalid_file() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "good.json", &sample_instance_json()).unwrap();
    let mut bad = sample_instance_json();
    bad.as_object_mut().unwrap().remove("Groups");
    write_json(dir.path(), "bad.json", &bad).unwrap();

    // 批量加载总是严格模式
    let err = InstanceLoader::new(false).load_dir(dir.path()).unwrap_err();
    match err {
        ImportError::BatchFileFailed { file, source } => {
            assert_eq!(file, "bad.json");
            assert!(matches!(*source, ImportError::Validation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn test_load_dir_does_not_skip_unreadable_entry() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "a_week.json", &sample_instance_json()).unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.json"), dir.path().join("b_week.json"))
        .unwrap();

    let err = load_all_instances(dir.path()).unwrap_err();
    match err {
        ImportError::BatchFileFailed { file, source } => {
            assert_eq!(file, "b_week.json");
            assert!(matches!(*source, ImportError::FileNotFound(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_dir_custom_extension() {
    let dir = TempDir::new().unwrap();
    write_json(dir.path(), "week.inst", &sample_instance_json()).unwrap();
    write_json(dir.path(), "other.json", &json!({})).unwrap();

    let instances = InstanceLoader::new(true)
        .with_extension(".inst")
        .load_dir(dir.path())
        .unwrap();
    assert_eq!(instances.len(), 1);
    assert!(instances.contains_key("week"));
}

#[test]
fn test_load_dir_rejects_file_path() {
    let dir = TempDir::new().unwrap();
    let path = write_json(dir.path(), "one.json", &sample_instance_json()).unwrap();

    let err = load_all_instances(&path).unwrap_err();
    assert!(matches!(err, ImportError::NotADirectory(_)));
}

// ==========================================
// 整洁关系
// ==========================================

#[test]
fn test_tidy_relations_are_sorted_pairs() {
    let rel = to_relations(&sample_instance());

    assert_eq!(rel.desks_zone.columns, ["zone", "desk"]);
    assert_eq!(rel.desks_zone.rows.len(), 6);
    assert_eq!(
        rel.desks_zone.rows[0],
        ("Z1".to_string(), "D1".to_string())
    );

    // E6 无兼容工位，不产生行
    assert!(rel
        .compat_employee_desk
        .rows
        .iter()
        .all(|(e, _)| e != "E6"));
    assert_eq!(rel.compat_employee_desk.rows.len(), 11);
    assert_eq!(rel.groups_employees.rows.len(), 6);
    assert_eq!(rel.days_employees.rows.len(), 15);
}
