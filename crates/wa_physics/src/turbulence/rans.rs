// crates/wa_physics/src/turbulence/rans.rs

//! RANS 场快照
//!
//! 宿主求解器每个时间步把当前的速度梯度模、涡粘性、分子粘性和
//! RANS 长度尺度交给混合引擎。[`RansSnapshot`] 是最简单的 [`RansCore`] 实现。

use wa_foundation::{ensure_len, WaResult};

use super::traits::{RansCore, VelocityGradient};

/// RANS 场快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RansSnapshot {
    mag_grad_u: Vec<f64>,
    nu_t: Vec<f64>,
    nu: Vec<f64>,
    length_scale: Vec<f64>,
}

impl RansSnapshot {
    /// 由四个场创建，长度必须一致
    pub fn new(
        mag_grad_u: Vec<f64>,
        nu_t: Vec<f64>,
        nu: Vec<f64>,
        length_scale: Vec<f64>,
    ) -> WaResult<Self> {
        let n = mag_grad_u.len();
        ensure_len("nu_t", n, nu_t.len())?;
        ensure_len("nu", n, nu.len())?;
        ensure_len("rans_length_scale", n, length_scale.len())?;
        Ok(Self {
            mag_grad_u,
            nu_t,
            nu,
            length_scale,
        })
    }

    /// 由速度梯度张量创建（取 Frobenius 范数）
    pub fn from_gradients(
        gradients: &[VelocityGradient],
        nu_t: Vec<f64>,
        nu: Vec<f64>,
        length_scale: Vec<f64>,
    ) -> WaResult<Self> {
        let mag = gradients.iter().map(VelocityGradient::magnitude).collect();
        Self::new(mag, nu_t, nu, length_scale)
    }

    /// 均匀分子粘性
    pub fn with_uniform_nu(
        mag_grad_u: Vec<f64>,
        nu_t: Vec<f64>,
        nu: f64,
        length_scale: Vec<f64>,
    ) -> WaResult<Self> {
        let n = mag_grad_u.len();
        Self::new(mag_grad_u, nu_t, vec![nu; n], length_scale)
    }

    /// 可变涡粘性（宿主在原位更新）
    pub fn nu_t_mut(&mut self) -> &mut [f64] {
        &mut self.nu_t
    }

    /// 可变速度梯度模
    pub fn mag_grad_u_mut(&mut self) -> &mut [f64] {
        &mut self.mag_grad_u
    }
}

impl RansCore for RansSnapshot {
    fn n_cells(&self) -> usize {
        self.mag_grad_u.len()
    }

    fn mag_grad_u(&self) -> &[f64] {
        &self.mag_grad_u
    }

    fn nu_t(&self) -> &[f64] {
        &self.nu_t
    }

    fn nu(&self) -> &[f64] {
        &self.nu
    }

    fn rans_length_scale(&self) -> &[f64] {
        &self.length_scale
    }
}
