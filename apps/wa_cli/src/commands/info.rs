// apps/wa_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示模型系数与滤波宽度设置。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;
use wa_config::{Wa2017IddesCoeffs, MODEL_NAME};
use wa_physics::DEFAULT_MIN_PARALLEL_SIZE;

use super::load_properties;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 属性文件路径（缺省显示默认值）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 以 JSON 输出解析后的属性
    #[arg(long)]
    pub json: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== {} 信息 ===", MODEL_NAME);

    let props = load_properties(args.config.as_deref())?;
    let resolved = props.resolve().context("属性文件无效")?;

    if args.json {
        let mut out = props.clone();
        out.model = Some(MODEL_NAME.to_string());
        out.coeffs = resolved.coeffs.to_dict();
        println!("{}", out.to_json()?);
        return Ok(());
    }

    println!("=== 模型系数 ===");
    let defaults = Wa2017IddesCoeffs::default().entries();
    for ((key, value), (_, default)) in resolved.coeffs.entries().iter().zip(defaults.iter()) {
        let marker = if value == default { "" } else { " *" };
        println!("  {:<8} = {:<10.6}{}", key, value, marker);
    }

    println!("\n=== 滤波宽度 ===");
    println!("  type       = {}", resolved.delta.policy.as_str());
    println!("  deltaCoeff = {}", resolved.delta.delta_coeff);
    println!("  Cw         = {}", resolved.delta.cw);

    println!("\n=== 运行环境 ===");
    println!("  wa_cli 版本:   {}", env!("CARGO_PKG_VERSION"));
    println!("  并行线程数:    {}", rayon::current_num_threads());
    println!("  并行阈值单元:  {}", DEFAULT_MIN_PARALLEL_SIZE);

    Ok(())
}
