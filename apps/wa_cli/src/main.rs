// apps/wa_cli/src/main.rs

//! WA2017 IDDES 命令行界面
//!
//! 提供系数查看、属性文件验证和合成通道剖面求值。
//!
//! # 依赖关系
//!
//! ```text
//! wa_cli → wa_physics (滤波宽度、混合层、Wa2017Iddes)
//!        → wa_config  (属性文件、系数与滤波宽度设置)
//!        → wa_foundation (ScalarField、ValidationReport)
//! ```
//!
//! 各子命令读取同一份属性文件。`run` 在其上构造合成通道并求值一次。
//!
//! 库中的 `log` 记录经 `tracing-log` 桥接到本程序的订阅器。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// WA2017 IDDES 混合函数命令行工具
#[derive(Parser)]
#[command(name = "wa_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Wray-Agarwal IDDES blending-function engine", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 在合成通道剖面上求值
    Run(commands::run::RunArgs),
    /// 显示系数与滤波宽度设置
    Info(commands::info::InfoArgs),
    /// 验证属性文件
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
