// crates/wa_physics/src/turbulence/mod.rs

//! 湍流混合模块
//!
//! WA2017 IDDES：在 Wray-Agarwal 一方程 RANS 模型之上的改进延迟分离涡模拟。
//! 模型不求解输运方程，只计算决定每个单元按 RANS 还是 LES 处理的混合场。
//!
//! # 组合链
//!
//! ```text
//! Wa2017Des   ─> c_des, fdes 基线
//! Wa2017Ddes  ─> fd, fdes 延迟修正
//! IddesLayer  ─> alpha, ft, fl, fe, fdtilda, 覆盖 fdes
//! ```
//!
//! 各层实现 [`BlendingLayer`]，共享同一个 [`BlendingContext`]。
//!
//! # 外部协作者
//!
//! - [`FilterWidthProvider`]: 以 `Weak` 引用持有，多个模型可共享
//! - [`RansCore`]: 每次求值时传入

pub mod context;
pub mod correlations;
pub mod ddes;
pub mod delta;
pub mod des;
pub mod iddes;
pub mod model;
pub mod rans;
pub mod traits;

pub use context::{BlendingContext, LayerInputs};
pub use ddes::{PrescribedDelay, Wa2017Ddes};
pub use delta::{iddes_width, CellGeometry, IddesDelta, PrescribedFilterWidth};
pub use des::{PrescribedDes, Wa2017Des};
pub use iddes::IddesLayer;
pub use model::Wa2017Iddes;
pub use rans::RansSnapshot;
pub use traits::{BlendingLayer, FilterWidthProvider, RansCore, VelocityGradient};
