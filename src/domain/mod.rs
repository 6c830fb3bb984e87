// ==========================================
// 工位分配排程 - 领域模型层
// ==========================================
// 职责: 定义问题实例、分配结果、字段模式
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod instance;
pub mod schema;

// 重导出核心类型
pub use assignment::{
    Assignment, AssignmentRow, AssignmentTable, OccupancyRow, SolverOutput, ABSENT_MARKER,
    UNASSIGNED_DESK,
};
pub use instance::{InstanceSummary, ProblemInstance, RelationMap};
pub use schema::FieldDescriptor;
