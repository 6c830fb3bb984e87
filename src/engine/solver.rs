// ==========================================
// 工位分配排程 - 求解器边界
// ==========================================
// 职责: 定义外部求解器接口（本 crate 不实现任何优化/搜索）
// 输入: 实例 + 预计算包（仅 load_day 允许被求解器修改）
// 输出: SolverOutput
// ==========================================

use crate::domain::{Assignment, ProblemInstance, SolverOutput, UNASSIGNED_DESK};
use crate::engine::precalc::Precalc;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ==========================================
// AssignmentSolver Trait
// ==========================================
// 实现者: 外部求解器适配层 / ReplaySolver / 测试替身
pub trait AssignmentSolver {
    /// 求解
    ///
    /// # 参数
    /// - instance: 已校验实例
    /// - precalc: 预计算包（求解器可更新 load_day）
    fn solve(&self, instance: &ProblemInstance, precalc: &mut Precalc) -> anyhow::Result<SolverOutput>;
}

/// 求解结果文件格式
#[derive(Debug, Deserialize)]
struct RecordedSolution {
    assignments: Vec<(String, String, String)>,
    #[serde(default)]
    group_meeting_day: HashMap<String, String>,
    #[serde(default)]
    schedule_by_employee: HashMap<String, Vec<String>>,
}

// ==========================================
// ReplaySolver - 回放已记录的求解结果
// ==========================================
// 用途: 外部求解器以 JSON 落盘后，由本 crate 做汇总与导出
#[derive(Debug, Clone)]
pub struct ReplaySolver {
    path: PathBuf,
    sentinel: String,
}

impl ReplaySolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sentinel: UNASSIGNED_DESK.to_string(),
        }
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 解析求解结果 JSON 文本
    pub fn parse(&self, text: &str) -> anyhow::Result<SolverOutput> {
        let recorded: RecordedSolution =
            serde_json::from_str(text).context("求解结果格式错误")?;

        Ok(SolverOutput {
            assignments: recorded
                .assignments
                .into_iter()
                .map(|(e, d, desk)| Assignment::from_raw(e, d, &desk, &self.sentinel))
                .collect(),
            group_meeting_day: recorded.group_meeting_day,
            schedule_by_employee: recorded
                .schedule_by_employee
                .into_iter()
                .map(|(e, days)| (e, days.into_iter().collect()))
                .collect(),
        })
    }
}

impl AssignmentSolver for ReplaySolver {
    fn solve(&self, _instance: &ProblemInstance, precalc: &mut Precalc) -> anyhow::Result<SolverOutput> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("读取求解结果失败: {}", self.path.display()))?;
        let output = self.parse(&text)?;

        // 回放时按已分配三元组还原每日负载
        for a in output.assignments.iter().filter(|a| a.is_assigned()) {
            *precalc.load_day.entry(a.day.clone()).or_insert(0) += 1;
        }
        Ok(output)
    }
}
