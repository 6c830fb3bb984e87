// ==========================================
// 工位分配排程 - 核心库
// ==========================================
// 流程: 实例导入/校验 → 预计算索引 → (外部求解器) → 孤立分析 + 结果汇总 → 导出
// 系统定位: 求解器前后的数据层（不做任何工位决策）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实例与分配结果
pub mod domain;

// 导入层 - 实例加载与校验
pub mod importer;

// 引擎层 - 预计算 / 孤立分析 / 汇总 / 编排
pub mod engine;

// 导出层 - 工作簿
pub mod export;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 命令行参数
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Assignment, AssignmentTable, InstanceSummary, OccupancyRow, ProblemInstance, SolverOutput,
};
pub use engine::{
    AssignmentSolver, ExportResults, IsolationAnalyzer, PlanningPipeline, Precalc, PrecalcEngine,
    ReportAssembler,
};
pub use importer::{load_all_instances, load_instance, InstanceLoader, ValidationError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工位分配排程";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
