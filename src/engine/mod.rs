// ==========================================
// 工位分配排程 - 引擎层
// ==========================================
// 职责: 预计算索引、孤立分析、结果汇总、流程编排
// 红线: 不决定任何员工的工位（求解由外部完成）
// ==========================================

pub mod error;
pub mod isolation;
pub mod orchestrator;
pub mod precalc;
pub mod report;
pub mod solver;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use isolation::{
    count_isolated_employees, read_occupancy_csv, IsolationAnalyzer, IsolationReport,
    PartitionIsolation, OCCUPANCY_COLUMNS,
};
pub use orchestrator::{PipelineOutcome, PlanningPipeline};
pub use precalc::{compute_precalcs, Precalc, PrecalcEngine};
pub use report::{
    build_outputs, count_preferences, count_valid_assignments, ExportResults, GroupMeetingDay,
    ReportAssembler, SummaryRow,
};
pub use solver::{AssignmentSolver, ReplaySolver};
