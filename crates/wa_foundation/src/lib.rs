// crates/wa_foundation/src/lib.rs

//! WA-IDDES Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`field`]: 单元标量场
//! - [`validation`]: 运行时验证工具
//!
//! # 示例
//!
//! ```
//! use wa_foundation::{ScalarField, ValidationReport};
//!
//! let fe = ScalarField::from_vec("fe", vec![0.0, 0.2, 0.7]);
//! let mut report = ValidationReport::new();
//! report.check_range("fe", &fe, 0.0, 1.0);
//! assert!(report.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod validation;

// 重导出常用类型
pub use error::{ensure_len, WaError, WaResult};
pub use field::{FieldStats, ScalarField};
pub use validation::{ValidationError, ValidationReport, ValidationWarning};

/// 极小正数，用作分母下限
pub const ROOT_VSMALL: f64 = 1.0e-150;

/// 梯度模下限，避免零梯度导致比值发散
pub const SMALL_GRADIENT: f64 = 1.0e-10;
