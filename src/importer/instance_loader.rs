// ==========================================
// 工位分配排程 - 实例加载器
// ==========================================
// 职责: 读取 JSON 实例 → 校验 → 构造 ProblemInstance（含反向索引）
// 支持: 文件路径 / 已打开的流 / 已解析的 JSON 对象 / 目录批量加载
// ==========================================

use crate::config::ConfigManager;
use crate::domain::{ProblemInstance, RelationMap};
use crate::importer::error::{ImportError, ImportResult, ValidationError};
use crate::importer::instance_validator::{relation_entries, string_items, InstanceValidator, Violation};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// 默认实例文件扩展名
pub const DEFAULT_INSTANCE_EXTENSION: &str = "json";

// ==========================================
// InstanceSource - 实例来源
// ==========================================
pub enum InstanceSource<'a> {
    Path(&'a Path),
    Reader(Box<dyn Read + 'a>),
    Value(Value),
}

impl<'a> From<&'a Path> for InstanceSource<'a> {
    fn from(path: &'a Path) -> Self {
        InstanceSource::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for InstanceSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        InstanceSource::Path(path.as_path())
    }
}

impl From<Value> for InstanceSource<'_> {
    fn from(value: Value) -> Self {
        InstanceSource::Value(value)
    }
}

/// 加载结果: 实例 + 非严格模式下的违规列表
#[derive(Debug, Clone)]
pub struct LoadedInstance {
    pub instance: ProblemInstance,
    pub violations: Vec<Violation>,
}

impl LoadedInstance {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

// ==========================================
// InstanceLoader
// ==========================================
#[derive(Debug, Clone)]
pub struct InstanceLoader {
    strict: bool,
    extension: String,
    validator: InstanceValidator,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InstanceLoader {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            extension: DEFAULT_INSTANCE_EXTENSION.to_string(),
            validator: InstanceValidator::new(),
        }
    }

    /// 从配置构造（strict_validation / instance_extension）
    pub fn from_config(config: &ConfigManager) -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(config.strict_validation()?).with_extension(config.instance_extension()))
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// 加载单个实例
    ///
    /// # 返回
    /// - 严格模式: 存在任何违规 → Err(ImportError::Validation)，携带全部违规
    /// - 非严格模式: 尽力构造实例，违规列表交由调用方检查
    pub fn load<'a>(&self, source: impl Into<InstanceSource<'a>>) -> ImportResult<LoadedInstance> {
        let data = read_instance_value(source.into())?;
        let violations = self.validator.validate(&data);

        if !violations.is_empty() {
            if self.strict {
                return Err(ImportError::Validation(ValidationError::new(violations)));
            }
            for v in &violations {
                warn!(kind = ?v.kind, "实例校验违规(非严格模式): {}", v.message);
            }
        }

        let instance = build_instance(&data);
        let summary = instance.summary();
        info!(
            employees = summary.n_employees,
            desks = summary.n_desks,
            days = summary.n_days,
            groups = summary.n_groups,
            zones = summary.n_zones,
            violations = violations.len(),
            "实例加载完成"
        );

        Ok(LoadedInstance {
            instance,
            violations,
        })
    }

    /// 批量加载目录下全部实例（按文件名排序，严格模式）
    ///
    /// 任意文件失败即中止整批，不返回部分结果
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_dir(&self, dir: &Path) -> ImportResult<BTreeMap<String, ProblemInstance>> {
        if !dir.is_dir() {
            return Err(ImportError::NotADirectory(dir.display().to_string()));
        }

        // 目录项读取失败同样中止整批；扩展名匹配的非目录项一律尝试加载
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|p| !p.is_dir() && self.has_instance_extension(p))
            .collect();
        files.sort();

        let strict = InstanceLoader {
            strict: true,
            ..self.clone()
        };

        let mut result = BTreeMap::new();
        for path in files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            debug!(file = %file_name, "加载实例文件");
            let loaded = strict
                .load(path.as_path())
                .map_err(|e| ImportError::BatchFileFailed {
                    file: file_name.clone(),
                    source: Box::new(e),
                })?;
            result.insert(stem, loaded.instance);
        }

        info!(count = result.len(), "批量实例加载完成");
        Ok(result)
    }

    fn has_instance_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }
}

// ==========================================
// 便捷函数
// ==========================================

/// 加载单个实例
pub fn load_instance<'a>(
    source: impl Into<InstanceSource<'a>>,
    strict: bool,
) -> ImportResult<LoadedInstance> {
    InstanceLoader::new(strict).load(source)
}

/// 批量加载目录下全部 `*.json` 实例
pub fn load_all_instances(dir: &Path) -> ImportResult<BTreeMap<String, ProblemInstance>> {
    InstanceLoader::new(true).load_dir(dir)
}

/// 读取实例 JSON
pub fn read_instance_value(source: InstanceSource<'_>) -> ImportResult<Value> {
    match source {
        InstanceSource::Value(v) => Ok(v),
        InstanceSource::Reader(reader) => Ok(serde_json::from_reader(reader)?),
        InstanceSource::Path(path) => {
            if !path.exists() {
                return Err(ImportError::FileNotFound(path.display().to_string()));
            }
            let file = File::open(path)?;
            Ok(serde_json::from_reader(BufReader::new(file))?)
        }
    }
}

/// 尽力构造实例（缺失键按空集合/空映射处理，非字符串元素跳过）
fn build_instance(data: &Value) -> ProblemInstance {
    let ids = |key: &str| -> Vec<String> {
        data.get(key)
            .map(|v| string_items(v).into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    };
    let relation = |key: &str| -> RelationMap {
        data.get(key)
            .map(|v| {
                relation_entries(v)
                    .into_iter()
                    .map(|(k, items)| {
                        (k.to_string(), items.into_iter().map(str::to_string).collect())
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    ProblemInstance::new(
        ids("Employees"),
        ids("Desks"),
        ids("Days"),
        ids("Groups"),
        ids("Zones"),
        relation("Desks_Z"),
        relation("Desks_E"),
        relation("Employees_G"),
        relation("Days_E"),
    )
}
