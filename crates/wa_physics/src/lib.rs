// crates/wa_physics/src/lib.rs

//! WA2017 IDDES 混合函数引擎
//!
//! 提供湍流混合场的计算，包括：
//! - 逐单元并行求值 (parallel)
//! - 湍流混合 (turbulence) - 滤波宽度、DES/DDES/IDDES 层、模型
//!
//! # Trait 抽象
//!
//! - [`FilterWidthProvider`]: 滤波宽度与壁面距离
//! - [`RansCore`]: RANS 求解器提供的场
//! - [`BlendingLayer`]: 组合链中的单层

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod parallel;
pub mod turbulence;

// 重导出常用类型
pub use parallel::{EvalConfig, EvalStrategy, DEFAULT_MIN_PARALLEL_SIZE};
pub use turbulence::{
    BlendingContext, BlendingLayer, CellGeometry, FilterWidthProvider, IddesDelta, IddesLayer,
    LayerInputs, PrescribedDelay, PrescribedDes, PrescribedFilterWidth, RansCore, RansSnapshot,
    VelocityGradient, Wa2017Ddes, Wa2017Des, Wa2017Iddes,
};
