// ==========================================
// 工位分配排程 - 导入层
// ==========================================
// 职责: 外部实例导入,校验后生成内部模型
// 支持: JSON 文件 / 流 / 已解析对象 / 目录批量
// ==========================================

// 模块声明
pub mod error;
pub mod instance_loader;
pub mod instance_validator;
pub mod tidy;

// 重导出核心类型
pub use error::{ImportError, ImportResult, ValidationError};
pub use instance_loader::{
    load_all_instances, load_instance, read_instance_value, InstanceLoader, InstanceSource,
    LoadedInstance, DEFAULT_INSTANCE_EXTENSION,
};
pub use instance_validator::{
    validate_instance_value, InstanceValidator, Violation, ViolationKind, IDENTITY_KEYS,
    RELATION_KEYS, REQUIRED_KEYS,
};
pub use tidy::{to_relations, InstanceRelations, Relation};
