// apps/wa_cli/src/commands/validate.rs

//! 属性文件验证命令
//!
//! 检查模型名、系数与滤波宽度设置，未识别的键作为警告报告。

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::{error, info, warn};
use wa_config::{ConfigError, TurbulenceProperties, MODEL_NAME};
use wa_foundation::{ValidationError, ValidationReport, ValidationWarning};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 属性文件路径（.json / .yaml / .yml）
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== {} 属性验证 ===", MODEL_NAME);
    println!("检查属性文件: {}", args.config.display());

    let mut report = ValidationReport::new();
    match TurbulenceProperties::load(&args.config) {
        Ok(props) => check_properties(&props, &mut report),
        Err(e) => report.add_error(custom_error(&e)),
    }

    print_validation_result(&report, args.strict)
}

fn check_properties(props: &TurbulenceProperties, report: &mut ValidationReport) {
    if props.model.is_none() {
        report.add_warning(ValidationWarning::Custom {
            message: format!("未指定 model，按 {} 处理", MODEL_NAME),
        });
    }
    for key in props.coeffs.unknown.keys() {
        report.add_warning(ValidationWarning::Custom {
            message: format!("未识别的系数键: {}", key),
        });
    }

    match props.coefficients() {
        Ok(_) => println!("  ✓ 系数有效"),
        Err(e) => report.add_error(custom_error(&e)),
    }
    match props.delta_settings() {
        Ok(_) => println!("  ✓ 滤波宽度设置有效"),
        Err(e) => report.add_error(custom_error(&e)),
    }
}

fn custom_error(e: &ConfigError) -> ValidationError {
    ValidationError::Custom {
        message: e.to_string(),
    }
}

fn print_validation_result(report: &ValidationReport, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    // 输出错误
    if report.has_errors() {
        println!("\n错误 ({}):", report.error_count());
        for err in &report.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    // 输出警告
    if report.has_warnings() {
        println!("\n警告 ({}):", report.warning_count());
        for warning in &report.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        report.is_valid() && !report.has_warnings()
    } else {
        report.is_valid()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            report.error_count(),
            report.warning_count()
        )
    }
}
