// crates/wa_physics/src/turbulence/iddes.rs

//! IDDES 覆盖层
//!
//! 读取 DDES 层提供的 `f_d`，依次计算
//!
//! ```text
//! alpha → (fl, ft) → fe → fdtilda → fdes
//! ```
//!
//! 每个阶段对所有单元完整求值一遍后才进入下一阶段，
//! 最后把 `fdtilda` 写入破坏项乘子槽位，覆盖 DES/DDES 写入的值。
//!
//! 各阶段公式见 [`super::correlations`]。

use wa_foundation::{ScalarField, WaError, WaResult};

use super::context::{BlendingContext, LayerInputs};
use super::correlations as corr;
use super::traits::BlendingLayer;

/// IDDES 覆盖层
#[derive(Debug, Clone, Copy, Default)]
pub struct IddesLayer;

impl IddesLayer {
    /// 阶段 1: `alpha = 0.25 − d / h_max`
    pub fn alpha_into(&self, inputs: &LayerInputs<'_>, out: &mut [f64]) {
        let d = inputs.filter.wall_distance();
        let hmax = inputs.filter.hmax();
        inputs.eval.fill_cells(out, |i| corr::alpha(d[i], hmax[i]));
    }

    /// 阶段 2a: 湍流关联 `ft`
    pub fn ft_into(&self, inputs: &LayerInputs<'_>, mag_grad_u: &[f64], out: &mut [f64]) {
        let c = inputs.coeffs;
        let d = inputs.filter.wall_distance();
        let nu_t = inputs.rans.nu_t();
        inputs.eval.fill_cells(out, |i| {
            corr::ft(corr::wall_ratio(nu_t[i], mag_grad_u[i], d[i], c.kappa), c.ct)
        });
    }

    /// 阶段 2b: 层流关联 `fl`
    pub fn fl_into(&self, inputs: &LayerInputs<'_>, mag_grad_u: &[f64], out: &mut [f64]) {
        let c = inputs.coeffs;
        let d = inputs.filter.wall_distance();
        let nu = inputs.rans.nu();
        inputs.eval.fill_cells(out, |i| {
            corr::fl(corr::wall_ratio(nu[i], mag_grad_u[i], d[i], c.kappa), c.cl)
        });
    }

    /// 阶段 3: 抬升函数 `fe`
    pub fn fe_into(
        &self,
        inputs: &LayerInputs<'_>,
        alpha: &[f64],
        ft: &[f64],
        fl: &[f64],
        out: &mut [f64],
    ) {
        inputs
            .eval
            .fill_cells(out, |i| corr::fe(corr::fe1(alpha[i]), corr::fe2(ft[i], fl[i])));
    }

    /// 阶段 4: 混合长度尺度选择器 `fdtilda`
    pub fn fdtilda_into(
        &self,
        inputs: &LayerInputs<'_>,
        alpha: &[f64],
        fd: &[f64],
        fe: &[f64],
        out: &mut [f64],
    ) {
        inputs
            .eval
            .fill_cells(out, |i| corr::fdtilda(fd[i], corr::f_b(alpha[i]), fe[i]));
    }

    /// 计算 `alpha` 场
    pub fn alpha(&self, inputs: &LayerInputs<'_>) -> ScalarField {
        let mut field = ScalarField::zeros("alpha", inputs.n_cells());
        self.alpha_into(inputs, &mut field);
        field
    }

    /// 以给定速度梯度模计算 `ft` 场
    pub fn ft(&self, inputs: &LayerInputs<'_>, mag_grad_u: &[f64]) -> WaResult<ScalarField> {
        wa_foundation::ensure_len("mag_grad_u", inputs.n_cells(), mag_grad_u.len())?;
        let mut field = ScalarField::zeros("ft", inputs.n_cells());
        self.ft_into(inputs, mag_grad_u, &mut field);
        Ok(field)
    }

    /// 以给定速度梯度模计算 `fl` 场
    pub fn fl(&self, inputs: &LayerInputs<'_>, mag_grad_u: &[f64]) -> WaResult<ScalarField> {
        wa_foundation::ensure_len("mag_grad_u", inputs.n_cells(), mag_grad_u.len())?;
        let mut field = ScalarField::zeros("fl", inputs.n_cells());
        self.fl_into(inputs, mag_grad_u, &mut field);
        Ok(field)
    }
}

impl BlendingLayer for IddesLayer {
    fn name(&self) -> &'static str {
        "WA2017IDDES"
    }

    fn apply(&self, inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()> {
        if !ctx.fd_provided() {
            return Err(WaError::invalid_input(
                "IDDES 层需要延迟函数 fd，组合链中没有层提供",
            ));
        }

        let mag_grad_u = inputs.rans.mag_grad_u();

        self.alpha_into(inputs, &mut ctx.alpha);
        self.fl_into(inputs, mag_grad_u, &mut ctx.fl);
        self.ft_into(inputs, mag_grad_u, &mut ctx.ft);
        self.fe_into(inputs, &ctx.alpha, &ctx.ft, &ctx.fl, &mut ctx.fe);
        self.fdtilda_into(inputs, &ctx.alpha, &ctx.fd, &ctx.fe, &mut ctx.fdtilda);

        ctx.fdes.copy_from(&ctx.fdtilda)?;
        ctx.mark_fdes_provided();
        Ok(())
    }
}
