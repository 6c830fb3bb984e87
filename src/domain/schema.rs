// ==========================================
// 工位分配排程 - 字段模式描述
// ==========================================
// 职责: 以静态字段列表描述领域结构体（名称 + 类型）
// 用途: 诊断输出（列出实例/预计算包包含哪些字段）
// ==========================================

use std::io::{self, Write};

/// 单个字段描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub type_name: &'static str,
    pub private: bool, // 内部缓存字段（默认不列出）
}

impl FieldDescriptor {
    pub const fn public(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            type_name,
            private: false,
        }
    }

    pub const fn private(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            type_name,
            private: true,
        }
    }

    /// 渲染为 `name` 或 `name: type`
    pub fn render(&self, with_types: bool) -> String {
        if with_types {
            format!("{}: {}", self.name, self.type_name)
        } else {
            self.name.to_string()
        }
    }
}

/// 列出字段名称（可选附带类型）
///
/// # 参数
/// - fields: 静态字段列表
/// - include_private: 是否包含内部字段
/// - with_types: 是否输出 `name: type`
pub fn attribute_names(
    fields: &[FieldDescriptor],
    include_private: bool,
    with_types: bool,
) -> Vec<String> {
    fields
        .iter()
        .filter(|f| include_private || !f.private)
        .map(|f| f.render(with_types))
        .collect()
}

/// 以编号列表形式输出字段（从 1 开始）
pub fn print_attributes<W: Write>(
    out: &mut W,
    fields: &[FieldDescriptor],
    include_private: bool,
    with_types: bool,
) -> io::Result<()> {
    for (i, name) in attribute_names(fields, include_private, with_types)
        .iter()
        .enumerate()
    {
        writeln!(out, "{}. {}", i + 1, name)?;
    }
    Ok(())
}
