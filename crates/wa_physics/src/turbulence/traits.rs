// crates/wa_physics/src/turbulence/traits.rs

//! 湍流混合 trait
//!
//! 定义混合函数引擎与外部协作者之间的接口：
//!
//! - [`FilterWidthProvider`]: 滤波宽度与壁面距离（外部拥有，只读共享）
//! - [`RansCore`]: RANS 求解器提供的速度梯度模、涡粘性和长度尺度
//! - [`BlendingLayer`]: DES → DDES → IDDES 组合链中的单个层

use glam::{DMat3, DVec3};
use wa_foundation::{ensure_len, WaResult};

use super::context::{BlendingContext, LayerInputs};

/// 三维速度梯度张量
///
/// `G[i][j] = ∂u_j/∂x_i`，按行给出。梯度模为 Frobenius 范数：
///
/// ```text
/// |∇U| = √(Σ G_ij²)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityGradient(pub DMat3);

impl Default for VelocityGradient {
    /// 零梯度（`DMat3::default()` 为单位阵）
    fn default() -> Self {
        Self(DMat3::ZERO)
    }
}

impl VelocityGradient {
    /// 按行创建
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        // DMat3 列主序，按行输入需转置
        Self(DMat3::from_cols_array_2d(&rows).transpose())
    }

    /// 单一剪切分量 `∂u/∂y`
    pub fn simple_shear(du_dy: f64) -> Self {
        Self::from_rows([[0.0, 0.0, 0.0], [du_dy, 0.0, 0.0], [0.0, 0.0, 0.0]])
    }

    /// 分量 `∂u_j/∂x_i`
    #[inline]
    pub fn component(&self, i: usize, j: usize) -> f64 {
        self.0.col(j)[i]
    }

    /// 梯度模（Frobenius 范数）
    #[inline]
    pub fn magnitude(&self) -> f64 {
        let cols = [self.0.x_axis, self.0.y_axis, self.0.z_axis];
        cols.iter().map(|c| c.length_squared()).sum::<f64>().sqrt()
    }

    /// 应变率模 `√(2 S:S)`
    pub fn strain_rate_magnitude(&self) -> f64 {
        let s = (self.0 + self.0.transpose()) * 0.5;
        (2.0 * double_dot(&s, &s)).sqrt()
    }

    /// 涡量模 `√(2 W:W)`
    pub fn vorticity_magnitude(&self) -> f64 {
        let w = (self.0 - self.0.transpose()) * 0.5;
        (2.0 * double_dot(&w, &w)).sqrt()
    }

    /// 检查梯度是否有效
    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
    }
}

fn double_dot(a: &DMat3, b: &DMat3) -> f64 {
    let pairs: [(DVec3, DVec3); 3] = [
        (a.x_axis, b.x_axis),
        (a.y_axis, b.y_axis),
        (a.z_axis, b.z_axis),
    ];
    pairs.iter().map(|(p, q)| p.dot(*q)).sum()
}

/// 滤波宽度提供者
///
/// 由外部（网格几何处理）拥有，可被多个湍流模型实例只读共享。
/// 契约：`h_max` 与 `delta` 在每个单元都是有限正数，壁面距离非负。
pub trait FilterWidthProvider: Send + Sync {
    /// 提供者名称
    fn name(&self) -> &'static str;

    /// 单元数
    fn n_cells(&self) -> usize;

    /// 壁面距离 `d` [m]
    fn wall_distance(&self) -> &[f64];

    /// 局部最大网格尺度 `h_max` [m]
    fn hmax(&self) -> &[f64];

    /// LES 滤波宽度 `Δ` [m]
    fn delta(&self) -> &[f64];
}

/// RANS 核心提供的场
pub trait RansCore: Send + Sync {
    /// 单元数
    fn n_cells(&self) -> usize;

    /// 速度梯度模 `|∇U|` [1/s]
    fn mag_grad_u(&self) -> &[f64];

    /// RANS 涡粘性 `ν_t` [m²/s]
    fn nu_t(&self) -> &[f64];

    /// 分子运动粘性 `ν` [m²/s]
    fn nu(&self) -> &[f64];

    /// RANS 长度尺度 `l_RANS` [m]
    fn rans_length_scale(&self) -> &[f64];

    /// 检查所有场的长度
    fn check_sizes(&self, n_cells: usize) -> WaResult<()> {
        ensure_len("mag_grad_u", n_cells, self.mag_grad_u().len())?;
        ensure_len("nu_t", n_cells, self.nu_t().len())?;
        ensure_len("nu", n_cells, self.nu().len())?;
        ensure_len("rans_length_scale", n_cells, self.rans_length_scale().len())
    }
}

/// 混合层
///
/// 每一层读取输入与上一层写入的上下文字段，并写入自己负责的字段。
/// 层按从左到右的顺序组合：DES 基线 → DDES 延迟 → IDDES 覆盖。
pub trait BlendingLayer: Send + Sync {
    /// 层名称
    fn name(&self) -> &'static str;

    /// 应用本层
    fn apply(&self, inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()>;
}
