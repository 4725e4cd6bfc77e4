// crates/wa_config/src/lib.rs

//! WA-IDDES Config Layer
//!
//! 配置层，提供模型系数字典、滤波宽度设置和版本化的系数重读。
//!
//! # 模块概览
//!
//! - [`coeffs`]: WA2017 IDDES 系数字典及其默认值
//! - [`delta`]: 滤波宽度（`h_max` 聚合策略与 IDDES 壁面系数）
//! - [`properties`]: 属性文件（JSON/YAML）加载与解析
//! - [`store`]: 版本化系数存储，原子替换
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! wa_cli       ─> uses TurbulenceProperties, Wa2017Iddes
//! wa_physics   ─> CoeffStore, DeltaSettings
//! wa_config    ─> 本层
//! wa_foundation
//! ```
//!
//! # 设计原则
//!
//! 1. **缺省即默认**: 字典中缺少的键取文档默认值
//! 2. **非法即错误**: 键存在但值非法时返回错误，绝不静默替换
//! 3. **原子替换**: 重读成功才替换系数快照

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coeffs;
pub mod delta;
pub mod error;
pub mod properties;
pub mod store;

// 重导出核心类型
pub use coeffs::{CoeffsDict, Wa2017IddesCoeffs};
pub use delta::{DeltaDict, DeltaSettings, HmaxPolicy, DEFAULT_IDDES_CW};
pub use error::ConfigError;
pub use properties::{ResolvedProperties, TurbulenceProperties, MODEL_NAME};
pub use store::{CoeffStore, ReloadOutcome};
