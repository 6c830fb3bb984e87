// ==========================================
// 工位分配排程 - 实例结构校验器
// ==========================================
// 职责: 必需键 / 类型形状 / 唯一性 / 引用完整性 / 归属唯一性 校验
// 规则:
// - 缺少顶层键: 立即停止，仅返回缺键消息（后续检查依赖键存在）
// - 其余错误: 累积，不短路
// ==========================================

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// 标识集合键
pub const IDENTITY_KEYS: [&str; 5] = ["Employees", "Desks", "Days", "Groups", "Zones"];

/// 关系映射键
pub const RELATION_KEYS: [&str; 4] = ["Desks_Z", "Desks_E", "Employees_G", "Days_E"];

/// 实例必需的全部顶层键（按校验顺序）
pub const REQUIRED_KEYS: [&str; 9] = [
    "Employees",
    "Desks",
    "Days",
    "Groups",
    "Zones",
    "Desks_Z",
    "Desks_E",
    "Employees_G",
    "Days_E",
];

/// 违规类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// 缺少顶层键（致命，停止校验）
    MissingKey,
    /// 值类型/形状错误
    InvalidType,
    /// 标识集合内重复 / 同一归属下成员重复
    DuplicateId,
    /// 引用了未声明的标识
    UnknownReference,
    /// 同一工位属于多个区域 / 同一员工属于多个组
    CrossOwnership,
}

/// 单条校验违规
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// ==========================================
// InstanceValidator - 无状态校验器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceValidator;

impl InstanceValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验已解析的实例对象
    ///
    /// # 返回
    /// 违规列表（为空表示通过）
    pub fn validate(&self, data: &Value) -> Vec<Violation> {
        let empty = Map::new();
        let obj = data.as_object().unwrap_or(&empty);

        // 1. 必需键
        let missing = self.check_required_keys(obj);
        if !missing.is_empty() {
            return missing;
        }

        let mut violations = Vec::new();

        // 2. 标识集合: list[str] + 唯一
        for key in IDENTITY_KEYS {
            if !is_list_of_str(&obj[key]) {
                violations.push(Violation::new(
                    ViolationKind::InvalidType,
                    format!("Key '{}' must be a list[str].", key),
                ));
            }
        }
        for key in IDENTITY_KEYS {
            if !all_unique(&string_items(&obj[key])) {
                violations.push(Violation::new(
                    ViolationKind::DuplicateId,
                    format!("Values under '{}' must be unique.", key),
                ));
            }
        }

        // 3. 关系映射: dict[str, list[str]]
        for key in RELATION_KEYS {
            match obj[key].as_object() {
                None => violations.push(Violation::new(
                    ViolationKind::InvalidType,
                    format!("Key '{}' must be a dict.", key),
                )),
                Some(map) => {
                    if map.values().any(|v| !is_list_of_str(v)) {
                        violations.push(Violation::new(
                            ViolationKind::InvalidType,
                            format!("Key '{}' must map str -> list[str].", key),
                        ));
                    }
                }
            }
        }

        // 4. 引用完整性（形状错误的部分按可读取的内容继续检查）
        let employees = id_set(&obj["Employees"]);
        let desks = id_set(&obj["Desks"]);
        let days = id_set(&obj["Days"]);
        let groups = id_set(&obj["Groups"]);
        let zones = id_set(&obj["Zones"]);

        self.check_desks_by_zone(&obj["Desks_Z"], &zones, &desks, &mut violations);
        self.check_member_refs(
            &obj["Desks_E"],
            ("Desks_E", "Employee", "Employees", &employees),
            ("Desk", "Desks", &desks),
            &mut violations,
        );
        self.check_employees_by_group(&obj["Employees_G"], &groups, &employees, &mut violations);
        self.check_member_refs(
            &obj["Days_E"],
            ("Days_E", "Employee", "Employees", &employees),
            ("Day", "Days", &days),
            &mut violations,
        );

        violations
    }

    fn check_required_keys(&self, obj: &Map<String, Value>) -> Vec<Violation> {
        REQUIRED_KEYS
            .iter()
            .filter(|k| !obj.contains_key(**k))
            .map(|k| Violation::new(ViolationKind::MissingKey, format!("Missing key: {}", k)))
            .collect()
    }

    /// Desks_Z: 区域已声明、工位已声明、工位只出现一次
    fn check_desks_by_zone(
        &self,
        value: &Value,
        zones: &HashSet<&str>,
        desks: &HashSet<&str>,
        violations: &mut Vec<Violation>,
    ) {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for (z, ds) in relation_entries(value) {
            if !zones.contains(z) {
                violations.push(Violation::new(
                    ViolationKind::UnknownReference,
                    format!("Zone '{}' in Desks_Z not declared in Zones.", z),
                ));
            }
            for d in ds {
                if !desks.contains(d) {
                    violations.push(Violation::new(
                        ViolationKind::UnknownReference,
                        format!("Desk '{}' in Desks_Z[{}] not declared in Desks.", d, z),
                    ));
                }
                match owner.get(d) {
                    Some(first) if *first != z => violations.push(Violation::new(
                        ViolationKind::CrossOwnership,
                        format!(
                            "Desk '{}' appears in multiple zones ('{}', '{}').",
                            d, first, z
                        ),
                    )),
                    Some(_) => violations.push(Violation::new(
                        ViolationKind::DuplicateId,
                        format!("Desk '{}' appears more than once in Desks_Z[{}].", d, z),
                    )),
                    None => {
                        owner.insert(d, z);
                    }
                }
            }
        }
    }

    /// Employees_G: 组已声明、员工已声明、员工只出现一次
    fn check_employees_by_group(
        &self,
        value: &Value,
        groups: &HashSet<&str>,
        employees: &HashSet<&str>,
        violations: &mut Vec<Violation>,
    ) {
        let mut owner: HashMap<&str, &str> = HashMap::new();
        for (g, es) in relation_entries(value) {
            if !groups.contains(g) {
                violations.push(Violation::new(
                    ViolationKind::UnknownReference,
                    format!("Group '{}' in Employees_G not declared in Groups.", g),
                ));
            }
            for e in es {
                if !employees.contains(e) {
                    violations.push(Violation::new(
                        ViolationKind::UnknownReference,
                        format!("Employee '{}' in Employees_G[{}] not declared in Employees.", e, g),
                    ));
                }
                match owner.get(e) {
                    Some(first) if *first != g => violations.push(Violation::new(
                        ViolationKind::CrossOwnership,
                        format!(
                            "Employee '{}' appears in multiple groups ('{}', '{}').",
                            e, first, g
                        ),
                    )),
                    Some(_) => violations.push(Violation::new(
                        ViolationKind::DuplicateId,
                        format!("Employee '{}' appears more than once in Employees_G[{}].", e, g),
                    )),
                    None => {
                        owner.insert(e, g);
                    }
                }
            }
        }
    }

    /// Desks_E / Days_E: 键与成员均已声明
    ///
    /// owner: (关系键, 键实体名, 键集合名, 键集合)
    /// member: (成员实体名, 成员集合名, 成员集合)
    fn check_member_refs(
        &self,
        value: &Value,
        owner: (&str, &str, &str, &HashSet<&str>),
        member: (&str, &str, &HashSet<&str>),
        violations: &mut Vec<Violation>,
    ) {
        let (rel_key, owner_label, owner_set_name, owner_set) = owner;
        let (member_label, member_set_name, member_set) = member;
        for (k, items) in relation_entries(value) {
            if !owner_set.contains(k) {
                violations.push(Violation::new(
                    ViolationKind::UnknownReference,
                    format!(
                        "{} '{}' in {} not declared in {}.",
                        owner_label, k, rel_key, owner_set_name
                    ),
                ));
            }
            for item in items {
                if !member_set.contains(item) {
                    violations.push(Violation::new(
                        ViolationKind::UnknownReference,
                        format!(
                            "{} '{}' in {}[{}] not declared in {}.",
                            member_label, item, rel_key, k, member_set_name
                        ),
                    ));
                }
            }
        }
    }
}

/// 便捷函数: 校验实例对象
pub fn validate_instance_value(data: &Value) -> Vec<Violation> {
    InstanceValidator::new().validate(data)
}

// ==========================================
// 宽松读取辅助（非字符串元素跳过）
// ==========================================

fn is_list_of_str(value: &Value) -> bool {
    value
        .as_array()
        .map(|items| items.iter().all(Value::is_string))
        .unwrap_or(false)
}

/// 读取数组中的字符串元素
pub(crate) fn string_items(value: &Value) -> Vec<&str> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// 读取对象中值为数组的条目
pub(crate) fn relation_entries(value: &Value) -> Vec<(&str, Vec<&str>)> {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .filter(|(_, v)| v.is_array())
                .map(|(k, v)| (k.as_str(), string_items(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn id_set(value: &Value) -> HashSet<&str> {
    string_items(value).into_iter().collect()
}

fn all_unique(items: &[&str]) -> bool {
    let mut seen = HashSet::new();
    items.iter().all(|item| seen.insert(*item))
}
