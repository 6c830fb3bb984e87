// ==========================================
// 工位分配排程 - 命令行入口
// ==========================================
// 用法: desk-planner <instance.json | instance_dir> [solution.json] [选项]
// 选项与环境变量见 `desk-planner --help`
// ==========================================

use anyhow::{bail, Context, Result};
use clap::Parser;
use desk_planner::cli::Cli;
use desk_planner::engine::{compute_precalcs, PlanningPipeline, ReplaySolver};
use desk_planner::importer::InstanceLoader;
use desk_planner::logging;
use std::io::{self, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", desk_planner::APP_NAME, desk_planner::VERSION);

    let config = cli.load_config().context("加载配置失败")?;
    let loader = InstanceLoader::from_config(&config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.input.is_dir() {
        if let Some(solution) = &cli.solution {
            bail!("目录模式不支持求解结果回放: {}", solution.display());
        }
        let instances = loader.load_dir(&cli.input)?;
        for (name, inst) in &instances {
            writeln!(out, "{}: {}", name, serde_json::to_string(&inst.summary())?)?;
        }
        return Ok(());
    }

    let loaded = loader.load(cli.input.as_path())?;
    for v in &loaded.violations {
        writeln!(out, "[violation] {}", v.message)?;
    }
    let inst = &loaded.instance;

    writeln!(out, "summary: {}", serde_json::to_string(&inst.summary())?)?;
    writeln!(out, "instance fields:")?;
    inst.print_attributes(&mut out, false, true)?;

    match &cli.solution {
        None => {
            let pre = compute_precalcs(inst);
            writeln!(out, "precalc fields:")?;
            pre.print_attributes(&mut out, true)?;
        }
        Some(path) => {
            let solver = ReplaySolver::new(path).with_sentinel(config.unassigned_sentinel());
            let pipeline = PlanningPipeline::from_config(solver, &config);
            let outcome = pipeline.run(inst)?;
            writeln!(
                out,
                "summary row: {}",
                serde_json::to_string(&outcome.results.summary)?
            )?;
            if let Some(paths) = &outcome.workbook {
                writeln!(out, "workbook: {}", paths.employee_assignment.display())?;
            }
        }
    }

    Ok(())
}
