// ==========================================
// 工位分配排程 - 流程编排器
// ==========================================
// 用途: 协调 预计算 → 外部求解 → 汇总(含孤立分析) → 导出
// 说明: 单线程同步执行；每个实例拥有独立的 Precalc（含 load_day）
// ==========================================

use crate::config::ConfigManager;
use crate::domain::{ProblemInstance, SolverOutput, ABSENT_MARKER};
use crate::engine::error::EngineResult;
use crate::engine::isolation::IsolationReport;
use crate::engine::precalc::{Precalc, PrecalcEngine};
use crate::engine::report::{ExportResults, ReportAssembler};
use crate::engine::solver::AssignmentSolver;
use crate::export::{write_workbook, WorkbookPaths};
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// PipelineOutcome - 单实例流程结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub precalc: Precalc, // 含求解器更新后的 load_day
    pub solver_output: SolverOutput,
    pub results: ExportResults,
    pub isolation: IsolationReport,
    pub workbook: Option<WorkbookPaths>,
}

// ==========================================
// PlanningPipeline - 流程编排器
// ==========================================
pub struct PlanningPipeline<S>
where
    S: AssignmentSolver,
{
    solver: S,
    precalc_engine: PrecalcEngine,
    assembler: ReportAssembler,
    export_dir: Option<PathBuf>,
    absence_marker: String,
}

impl<S> PlanningPipeline<S>
where
    S: AssignmentSolver,
{
    /// 创建编排器（默认不导出）
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            precalc_engine: PrecalcEngine::new(),
            assembler: ReportAssembler::new(),
            export_dir: None,
            absence_marker: ABSENT_MARKER.to_string(),
        }
    }

    /// 按配置创建编排器（导出到 output_dir）
    pub fn from_config(solver: S, config: &ConfigManager) -> Self {
        Self::new(solver)
            .with_export_dir(config.output_dir())
            .with_absence_marker(config.absence_marker())
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    pub fn with_absence_marker(mut self, marker: impl Into<String>) -> Self {
        self.absence_marker = marker.into();
        self
    }

    /// 执行完整流程
    pub fn run(&self, instance: &ProblemInstance) -> EngineResult<PipelineOutcome> {
        self.run_into(instance, self.export_dir.as_deref())
    }

    fn run_into(
        &self,
        instance: &ProblemInstance,
        export_dir: Option<&Path>,
    ) -> EngineResult<PipelineOutcome> {
        let summary = instance.summary();
        info!(
            employees = summary.n_employees,
            days = summary.n_days,
            "开始执行工位分配流程"
        );

        // ==========================================
        // 步骤1: 预计算
        // ==========================================
        debug!("步骤1: 计算预计算索引");
        let mut precalc = self.precalc_engine.compute(instance);

        // ==========================================
        // 步骤2: 外部求解（阻塞）
        // ==========================================
        debug!("步骤2: 调用外部求解器");
        let solver_output = self
            .solver
            .solve(instance, &mut precalc)
            .context("外部求解器执行失败")?;
        info!(
            assignments = solver_output.assignments.len(),
            "求解器返回分配结果"
        );

        // ==========================================
        // 步骤3: 汇总 + 孤立分析
        // ==========================================
        debug!("步骤3: 组装输出关系");
        let (results, isolation) = self
            .assembler
            .build_with_isolation(instance, &solver_output);

        // ==========================================
        // 步骤4: 导出（可选）
        // ==========================================
        let workbook = match export_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "步骤4: 导出工作簿");
                Some(write_workbook(dir, &results, &self.absence_marker)?)
            }
            None => None,
        };

        info!(
            isolated_employees = results.summary.isolated_employees,
            "工位分配流程完成"
        );

        Ok(PipelineOutcome {
            precalc,
            solver_output,
            results,
            isolation,
            workbook,
        })
    }

    /// 依次执行多个实例；导出时每个实例写入 export_dir/<实例名>
    ///
    /// 任一实例失败即中止
    pub fn run_all(
        &self,
        instances: &BTreeMap<String, ProblemInstance>,
    ) -> EngineResult<BTreeMap<String, PipelineOutcome>> {
        let mut outcomes = BTreeMap::new();
        for (name, instance) in instances {
            let span = tracing::info_span!("instance", name = %name);
            let _guard = span.enter();

            let dir = self.export_dir.as_ref().map(|d| d.join(name));
            let outcome = self.run_into(instance, dir.as_deref())?;
            outcomes.insert(name.clone(), outcome);
        }
        Ok(outcomes)
    }
}
