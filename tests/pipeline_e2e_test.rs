// ==========================================
// PlanningPipeline 端到端测试
// ==========================================
// 测试目标: 实例文件 → 预计算 → 求解器 → 汇总 → 工作簿
// 覆盖范围: 求解器替身、求解失败、回放求解、批量执行
// ==========================================


use anyhow::anyhow;
use desk_planner::domain::{ProblemInstance, SolverOutput};
use desk_planner::engine::{AssignmentSolver, EngineError, PlanningPipeline, Precalc, ReplaySolver};
use desk_planner::export::{read_assignment_sheet, SHEET_SUMMARY};
use desk_planner::importer::{load_all_instances, load_instance};
use std::fs::{self, File};
use tempfile::TempDir;
use test_helpers::{sample_instance_json, sample_solution_json, sample_solver_output, write_json};

// ==========================================
// 测试替身
// ==========================================

/// 返回固定结果，并按分配更新每日负载
struct FixedSolver;

impl AssignmentSolver for FixedSolver {
    fn solve(&self, _instance: &ProblemInstance, precalc: &mut Precalc) -> anyhow::Result<SolverOutput> {
        let output = sample_solver_output();
        for a in &output.assignments {
            if a.is_assigned() {
                *precalc.load_day.entry(a.day.clone()).or_insert(0) += 1;
            }
        }
        Ok(output)
    }
}

struct FailingSolver;

impl AssignmentSolver for FailingSolver {
    fn solve(&self, _instance: &ProblemInstance, _precalc: &mut Precalc) -> anyhow::Result<SolverOutput> {
        Err(anyhow!("solver timed out"))
    }
}

// ==========================================
// 单实例
// ==========================================

#[test]
fn test_pipeline_without_export() {
    let dir = TempDir::new().unwrap();
    let path = write_json(dir.path(), "week.json", &sample_instance_json()).unwrap();
    let inst = load_instance(path.as_path(), true).unwrap().instance;

    let outcome = PlanningPipeline::new(FixedSolver).run(&inst).unwrap();

    assert!(outcome.workbook.is_none());
    assert_eq!(outcome.results.summary.valid_assignments, 8);
    assert_eq!(outcome.results.summary.employee_preferences, 11);
    assert_eq!(outcome.results.summary.isolated_employees, 4);
    assert_eq!(outcome.isolation.total, 4);

    // 求解器对 load_day 的更新保留在结果中
    assert_eq!(outcome.precalc.load_day["L"], 3);
    assert_eq!(outcome.precalc.load_day["Ma"], 3);
    assert_eq!(outcome.precalc.load_day["Mi"], 3);
    assert_eq!(outcome.precalc.load_day["J"], 1);
    assert_eq!(outcome.precalc.load_day["V"], 0);
}

#[test]
fn test_pipeline_exports_workbook() {
    let dir = TempDir::new().unwrap();
    let inst = load_instance(sample_instance_json(), true).unwrap().instance;
    let out = dir.path().join("output");

    let outcome = PlanningPipeline::new(FixedSolver)
        .with_export_dir(&out)
        .run(&inst)
        .unwrap();

    let paths = outcome.workbook.expect("应导出工作簿");
    assert!(paths.summary.ends_with(format!("{}.csv", SHEET_SUMMARY)));
    assert_eq!(
        fs::read_to_string(&paths.summary).unwrap(),
        "Valid assignments,Employee preferences,Isolated employees\n8,11,4\n"
    );

    let table =
        read_assignment_sheet(File::open(&paths.employee_assignment).unwrap(), &inst.days, "None")
            .unwrap();
    assert_eq!(table, outcome.results.assignment);
}

#[test]
fn test_pipeline_surfaces_solver_failure() {
    let inst = load_instance(sample_instance_json(), true).unwrap().instance;

    let err = PlanningPipeline::new(FailingSolver).run(&inst).unwrap_err();
    match err {
        EngineError::Solver(e) => {
            let chain = format!("{:#}", e);
            assert!(chain.contains("solver timed out"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ==========================================
// 回放求解
// ==========================================

#[test]
fn test_replay_solver_end_to_end() {
    let dir = TempDir::new().unwrap();
    let inst_path = write_json(dir.path(), "week.json", &sample_instance_json()).unwrap();
    let solution = write_json(dir.path(), "solution.json", &sample_solution_json()).unwrap();
    let inst = load_instance(inst_path.as_path(), true).unwrap().instance;

    let outcome = PlanningPipeline::new(ReplaySolver::new(&solution))
        .with_export_dir(dir.path().join("out"))
        .with_absence_marker("-")
        .run(&inst)
        .unwrap();

    assert_eq!(outcome.results.summary.valid_assignments, 8);
    assert_eq!(outcome.results.summary.employee_preferences, 11);
    assert_eq!(outcome.results.summary.isolated_employees, 4);
    // 哨兵 "none" 映射为未分配
    assert!(outcome
        .solver_output
        .assignments
        .iter()
        .any(|a| a.employee == "E6" && a.day == "J" && a.desk.is_none()));
    assert_eq!(outcome.precalc.load_day["J"], 1);

    let paths = outcome.workbook.unwrap();
    let text = fs::read_to_string(&paths.employee_assignment).unwrap();
    assert!(text.contains("E6,-,D7,-,-,-"));
}

#[test]
fn test_replay_solver_missing_file() {
    let dir = TempDir::new().unwrap();
    let inst = load_instance(sample_instance_json(), true).unwrap().instance;
    let solver = ReplaySolver::new(dir.path().join("absent.json"));

    let err = PlanningPipeline::new(solver).run(&inst).unwrap_err();
    assert!(matches!(err, EngineError::Solver(_)));
}

// ==========================================
// 批量
// ==========================================

#[test]
fn test_run_all_exports_per_instance() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("instances");
    fs::create_dir_all(&inputs).unwrap();
    write_json(&inputs, "week1.json", &sample_instance_json()).unwrap();
    write_json(&inputs, "week2.json", &sample_instance_json()).unwrap();

    let instances = load_all_instances(&inputs).unwrap();
    let out = dir.path().join("output");
    let outcomes = PlanningPipeline::new(FixedSolver)
        .with_export_dir(&out)
        .run_all(&instances)
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    for name in ["week1", "week2"] {
        let paths = outcomes[name].workbook.as_ref().unwrap();
        assert!(paths.summary.starts_with(out.join(name)));
        assert!(paths.summary.exists());
    }
}
