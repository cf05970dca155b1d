//! opencode-i18n 命令行入口
//! 所有输出都在这里完成，库本身只返回结构化结果
//!
//! 运行命令：
//! cargo run --features cli -- --source ../opencode verify --detailed --dry-run

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env, Target};
use serde_json::to_string_pretty;

use opencode_i18n::{
    ApplyReport, BilingualConverter, CustomConfigBuilder, I18nPatcher, RuleSet, RuleSourceKind,
};

/// 未汉化文件列表最多显示条数
const UNCOVERED_PREVIEW: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "opencode-i18n", version, about = "OpenCode 汉化规则校验与应用工具")]
struct Cli {
    /// 外部汉化规则目录（默认读取 OPENCODE_I18N_DIR，不存在时使用内置规则）
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// OpenCode 源码根目录（默认读取 OPENCODE_SOURCE_DIR，否则为当前目录）
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 以 JSON 输出结果
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 验证汉化配置：完整性、变量保护、匹配情况与覆盖率
    Verify {
        /// 显示详细信息
        #[arg(short, long)]
        detailed: bool,
        /// 模拟应用过程，统计可匹配的规则
        #[arg(long)]
        dry_run: bool,
    },
    /// 将汉化规则应用到源码
    Apply {
        /// 只统计，不写文件
        #[arg(long)]
        dry_run: bool,
    },
    /// 显示规则统计
    Stats,
    /// 将译文转换为 "中文 (English)" 双语格式
    Bilingual {
        /// 写回规则文件（仅外部规则目录）
        #[arg(long)]
        write: bool,
        /// 保持纯中文的原文，可重复指定；指定后替换内置列表
        #[arg(long = "pure-key")]
        pure_keys: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    Builder::from_env(Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }))
        .target(Target::Stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut builder = CustomConfigBuilder::from_env().rules_dir(cli.rules);
    if let Some(source) = cli.source {
        builder = builder.source_root(source);
    }
    let config = builder.build();

    let patcher = I18nPatcher::new(config).context("初始化失败")?;
    let loaded = patcher.load().context("加载配置失败")?;

    if !cli.json {
        println!("提示: 使用{}: {}", loaded.source_kind, loaded.source);
        for issue in &loaded.issues {
            println!("警告: 跳过无效配置 {}: {}", issue.origin_path, issue.message);
        }
    }

    match cli.command {
        Command::Verify { detailed, dry_run } => verify(&patcher, &loaded.rule_sets, detailed, dry_run, cli.json),
        Command::Apply { dry_run } => apply(&patcher, &loaded.rule_sets, dry_run, cli.json),
        Command::Stats => {
            let stats = patcher.stats(&loaded.rule_sets);
            if cli.json {
                println!("{}", to_string_pretty(&stats)?);
            } else {
                println!("配置文件: {} 个", stats.total_sets);
                println!("翻译条目: {} 条", stats.total_replacements);
                for (category, s) in &stats.categories {
                    println!("  {}: {} 个文件, {} 条翻译", category, s.sets, s.replacements);
                }
            }
            Ok(true)
        }
        Command::Bilingual { write, pure_keys } => {
            if write && loaded.source_kind != RuleSourceKind::Filesystem {
                bail!("内置规则为只读，--write 需要外部规则目录");
            }
            bilingual(&loaded.rule_sets, pure_keys, write)
        }
    }
}

fn verify(patcher: &I18nPatcher, rule_sets: &[RuleSet], detailed: bool, dry_run: bool, json: bool) -> Result<bool> {
    let structure = patcher.check_structure(rule_sets);
    let stats = patcher.stats(rule_sets);
    let violations = patcher.verify(rule_sets);
    let simulation = dry_run.then(|| patcher.apply(rule_sets, true));
    let coverage = patcher.coverage(rule_sets);

    if json {
        let report = serde_json::json!({
            "structure": structure,
            "stats": stats,
            "violations": violations,
            "simulation": simulation,
            "coverage": coverage,
        });
        println!("{}", to_string_pretty(&report)?);
        return Ok(violations.is_empty());
    }

    println!("\n[1/4] 验证配置完整性...");
    println!("  ✓ 配置文件: {} 个", stats.total_sets);
    println!("  ✓ 翻译条目: {} 条", stats.total_replacements);
    for issue in &structure {
        println!("  ⚠️ {}", issue);
    }
    if detailed {
        println!("\n  分类统计:");
        for (category, s) in &stats.categories {
            println!("    - {}: {} 个文件, {} 条", category, s.sets, s.replacements);
        }
    }

    println!("\n[2/4] 检查变量保护...");
    if violations.is_empty() {
        println!("  ✓ 变量保护验证通过");
    } else {
        if detailed {
            for v in &violations {
                println!("  ⚠️ {}", v.rule_set);
                println!("     原文: {}", v.find);
                println!("     译文: {}", v.replace);
                println!("     缺失变量: {:?}", v.missing);
            }
        }
        println!("  ⚠️ 发现 {} 处变量问题", violations.len());
    }

    match &simulation {
        Some(report) => {
            println!("\n[3/4] 模拟运行检查...");
            print_simulation(report, detailed);
        }
        None => println!("\n[3/4] 跳过模拟运行（使用 --dry-run 启用）"),
    }

    println!("\n[4/4] 检查汉化覆盖率...");
    println!("  源码文件: {} 个", coverage.candidate_files);
    println!("  已汉化: {} 个", coverage.referenced_files);
    match coverage.percentage {
        Some(pct) => println!("  覆盖率: {:.1}%", pct),
        None => println!("  覆盖率: 不适用（未找到候选源码文件）"),
    }
    if detailed && !coverage.uncovered.is_empty() {
        println!("  未汉化的文件（部分）:");
        for path in coverage.uncovered.iter().take(UNCOVERED_PREVIEW) {
            println!("    - {}", path.display());
        }
        if coverage.uncovered.len() > UNCOVERED_PREVIEW {
            println!("    ... 还有 {} 个文件", coverage.uncovered.len() - UNCOVERED_PREVIEW);
        }
    }

    println!("\n✓ 验证完成");
    Ok(violations.is_empty())
}

fn print_simulation(report: &ApplyReport, detailed: bool) {
    let totals = &report.totals;
    println!(
        "  📝 替换: {}/{} 可匹配",
        totals.rules_matched,
        totals.rules_matched + totals.rules_missed
    );
    if totals.rules_missed > 0 {
        println!("  ⚠️ {} 条翻译在源码中找不到匹配", totals.rules_missed);
    }
    if totals.skipped > 0 {
        println!("  ⚠️ 跳过 {} 个规则集", totals.skipped);
    }
    if detailed {
        for outcome in &report.outcomes {
            if let Some(reason) = &outcome.skip {
                println!("    - {}: {}", outcome.rule_set, reason);
            } else if !outcome.unmatched.is_empty() {
                println!("    - {}: {} 条未匹配", outcome.rule_set, outcome.unmatched.len());
            }
        }
    }
}

fn apply(patcher: &I18nPatcher, rule_sets: &[RuleSet], dry_run: bool, json: bool) -> Result<bool> {
    let report = patcher.apply(rule_sets, dry_run);
    let ok = report.totals.write_failures == 0;

    if json {
        println!("{}", to_string_pretty(&report)?);
        return Ok(ok);
    }

    for outcome in &report.outcomes {
        if let Some(err) = &outcome.write_error {
            println!("  ✗ {}: 写入失败 {}", outcome.target_file, err);
        } else if outcome.written {
            println!("  ✓ {} ({} 处替换)", outcome.target_file, outcome.succeeded);
        }
    }

    let totals = &report.totals;
    println!(
        "✓ 汉化应用完成{}: {} 个文件, {} 处替换, 跳过 {} 个",
        if dry_run { "（模拟）" } else { "" },
        totals.processed,
        totals.rules_matched,
        totals.skipped
    );
    Ok(ok)
}

fn bilingual(rule_sets: &[RuleSet], pure_keys: Vec<String>, write: bool) -> Result<bool> {
    let mut converter = BilingualConverter::new();
    if !pure_keys.is_empty() {
        converter = converter.with_pure_keys(pure_keys);
    }
    let mut changed_count = 0;

    for rule_set in rule_sets {
        let (converted, changed) = converter.convert(rule_set);
        if !changed {
            continue;
        }
        changed_count += 1;
        if write {
            let content = converted.to_document().to_pretty_json()?;
            fs::write(&rule_set.origin_path, content)
                .with_context(|| format!("写入规则文件失败: {}", rule_set.origin_path))?;
        }
        println!("✓ {} ({} 条)", rule_set.identity(), converted.replacements.len());
    }

    println!(
        "\n✅ 完成！共处理 {} 个文件，{} {} 个",
        rule_sets.len(),
        if write { "转换" } else { "待转换" },
        changed_count
    );
    Ok(true)
}
