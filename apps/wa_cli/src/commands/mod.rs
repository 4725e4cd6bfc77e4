// apps/wa_cli/src/commands/mod.rs

//! 子命令实现

pub mod info;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use wa_config::TurbulenceProperties;

/// 加载属性文件，未指定时使用默认属性
pub fn load_properties(path: Option<&Path>) -> Result<TurbulenceProperties> {
    match path {
        Some(p) => TurbulenceProperties::load(p)
            .with_context(|| format!("无法加载属性文件: {}", p.display())),
        None => Ok(TurbulenceProperties::default()),
    }
}
