// apps/wa_cli/src/commands/run.rs

//! 合成通道剖面求值命令
//!
//! 在半通道的壁面法向单元列上构造混合长度模型的 RANS 场，
//! 求值一次 IDDES 混合函数并输出剖面与统计量。
//!
//! # 剖面
//!
//! ```text
//! τ(d)  = u_τ² (1 − d/H)
//! L     = κ d (1 − exp(−d⁺/26))
//! |∇U|  = 2τ / (ν + √(ν² + 4 L² τ))
//! ν_t   = L² |∇U|
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use glam::DVec3;
use serde::Serialize;
use tracing::info;
use wa_foundation::ScalarField;
use wa_physics::{
    CellGeometry, EvalConfig, FilterWidthProvider, IddesDelta, RansCore, RansSnapshot,
    Wa2017Iddes,
};

use super::load_properties;

const KAPPA: f64 = 0.41;
const VAN_DRIEST_A: f64 = 26.0;

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// 属性文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 壁面法向单元数
    #[arg(long, default_value = "64")]
    pub cells: usize,

    /// 半通道高度 [m]
    #[arg(long, default_value = "1.0")]
    pub height: f64,

    /// 摩擦雷诺数
    #[arg(long, default_value = "1000.0")]
    pub re_tau: f64,

    /// 壁面法向网格增长率（1 为均匀）
    #[arg(long, default_value = "1.1")]
    pub growth: f64,

    /// 强制串行求值
    #[arg(long)]
    pub sequential: bool,

    /// 以 JSON 输出全部场
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    wall_distance: &'a [f64],
    alpha: &'a [f64],
    ft: &'a [f64],
    fl: &'a [f64],
    fe: &'a [f64],
    fd: &'a [f64],
    fdtilda: &'a [f64],
    fdes: &'a [f64],
    l_hybrid: &'a [f64],
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    if args.cells == 0 {
        bail!("单元数必须为正");
    }
    if !(args.height > 0.0 && args.re_tau > 0.0 && args.growth >= 1.0) {
        bail!("height、re_tau 必须为正，growth 不小于 1");
    }

    let props = load_properties(args.config.as_deref())?;
    let delta_settings = props.delta_settings().context("滤波宽度设置无效")?;

    let cells = channel_cells(args.cells, args.height, args.growth);
    if !cells.iter().all(|c| c.extent.y > 0.0) {
        bail!("增长率 {} 对 {} 单元过大，首层网格退化", args.growth, args.cells);
    }
    let provider: Arc<dyn FilterWidthProvider> = Arc::new(
        IddesDelta::new(delta_settings, &cells).context("构建滤波宽度失败")?,
    );
    let rans = channel_rans(&cells, args.height, args.re_tau)?;

    let eval = if args.sequential {
        EvalConfig::sequential()
    } else {
        EvalConfig::default()
    };
    let mut model = Wa2017Iddes::new(&props, &provider)
        .context("构建模型失败")?
        .with_eval_config(eval);

    info!(
        "通道剖面: {} 单元, H={} m, Re_τ={}, 增长率={}",
        args.cells, args.height, args.re_tau, args.growth
    );

    let start = Instant::now();
    model.calc_fdes(&rans).context("混合函数求值失败")?;
    let elapsed = start.elapsed();
    info!("求值耗时: {:.3} ms", elapsed.as_secs_f64() * 1e3);

    let l_hybrid = model.hybrid_length_scale(&rans)?;

    if args.json {
        let out = RunOutput {
            wall_distance: provider.wall_distance(),
            alpha: model.alpha(),
            ft: model.ft(),
            fl: model.fl(),
            fe: model.fe(),
            fd: model.fd(),
            fdtilda: model.fdtilda(),
            fdes: model.fdes(),
            l_hybrid: &l_hybrid,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_profile(&model, provider.as_ref(), &rans);
    print_stats(&[
        model.alpha(),
        model.fe(),
        model.fd(),
        model.fdtilda(),
        &l_hybrid,
    ]);

    let les_cells = model.fdtilda().iter().filter(|&&v| v < 0.5).count();
    println!(
        "\nLES 区单元 (fdtilda < 0.5): {} / {}",
        les_cells,
        model.n_cells()
    );
    Ok(())
}

/// 壁面加密的单元列
fn channel_cells(n: usize, height: f64, growth: f64) -> Vec<CellGeometry> {
    let first = if growth > 1.0 {
        height * (growth - 1.0) / (growth.powi(n as i32) - 1.0)
    } else {
        height / n as f64
    };

    let mut cells = Vec::with_capacity(n);
    let mut y = 0.0;
    let mut dy = first;
    for _ in 0..n {
        let extent = DVec3::new(0.1 * height, dy, 0.05 * height);
        cells.push(CellGeometry::new(extent, dy, y + 0.5 * dy));
        y += dy;
        dy *= growth;
    }
    cells
}

/// 混合长度模型的 RANS 场
fn channel_rans(cells: &[CellGeometry], height: f64, re_tau: f64) -> Result<RansSnapshot> {
    let u_tau = 1.0;
    let nu = u_tau * height / re_tau;

    let mut mag = Vec::with_capacity(cells.len());
    let mut nu_t = Vec::with_capacity(cells.len());
    let mut l_rans = Vec::with_capacity(cells.len());
    for c in cells {
        let d = c.wall_distance;
        let tau = u_tau * u_tau * (1.0 - d / height).max(0.0);
        let d_plus = d * u_tau / nu;
        let l = KAPPA * d * (1.0 - (-d_plus / VAN_DRIEST_A).exp());
        let g = 2.0 * tau / (nu + (nu * nu + 4.0 * l * l * tau).sqrt());
        mag.push(g);
        nu_t.push(l * l * g);
        l_rans.push(KAPPA * d);
    }

    Ok(RansSnapshot::with_uniform_nu(mag, nu_t, nu, l_rans)?)
}

fn print_profile(model: &Wa2017Iddes, provider: &dyn FilterWidthProvider, rans: &dyn RansCore) {
    let n = model.n_cells();
    let stride = (n / 32).max(1);

    println!(
        "{:>6} {:>12} {:>12} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "cell", "d", "nu_t/nu", "alpha", "fe", "fd", "fdtilda", "fdes"
    );
    for i in (0..n).step_by(stride) {
        println!(
            "{:>6} {:>12.4e} {:>12.4e} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            i,
            provider.wall_distance()[i],
            rans.nu_t()[i] / rans.nu()[i],
            model.alpha()[i],
            model.fe()[i],
            model.fd()[i],
            model.fdtilda()[i],
            model.fdes()[i],
        );
    }
}

fn print_stats(fields: &[&ScalarField]) {
    println!("\n=== 场统计 ===");
    println!("{:>10} {:>12} {:>12} {:>12}", "field", "min", "max", "mean");
    for field in fields {
        if let Some(s) = field.stats() {
            println!(
                "{:>10} {:>12.4e} {:>12.4e} {:>12.4e}",
                field.name(),
                s.min,
                s.max,
                s.mean
            );
        }
    }
}
