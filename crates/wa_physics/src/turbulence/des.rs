// crates/wa_physics/src/turbulence/des.rs

//! DES 基线层
//!
//! 写入 `C_DES` 与基线破坏项乘子：
//!
//! ```text
//! f_DES = max(l_RANS / (C_DES Δ), 1)
//! ```

use wa_foundation::WaResult;

use super::context::{BlendingContext, LayerInputs};
use super::traits::BlendingLayer;

/// WA2017 DES 基线层
#[derive(Debug, Clone, Copy, Default)]
pub struct Wa2017Des;

impl BlendingLayer for Wa2017Des {
    fn name(&self) -> &'static str {
        "WA2017DES"
    }

    fn apply(&self, inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()> {
        let c_des = inputs.coeffs.c_des;
        let l_rans = inputs.rans.rans_length_scale();
        let delta = inputs.filter.delta();

        ctx.c_des = c_des;
        inputs
            .eval
            .fill_cells(&mut ctx.fdes, |i| (l_rans[i] / (c_des * delta[i])).max(1.0));
        ctx.mark_fdes_provided();
        Ok(())
    }
}

/// 宿主给定的 DES 基线
///
/// 用于接入外部 DES 实现或在测试中固定基线。
#[derive(Debug, Clone, PartialEq)]
pub struct PrescribedDes {
    c_des: f64,
    fdes: Vec<f64>,
}

impl PrescribedDes {
    /// 创建
    pub fn new(c_des: f64, fdes: Vec<f64>) -> Self {
        Self { c_des, fdes }
    }
}

impl BlendingLayer for PrescribedDes {
    fn name(&self) -> &'static str {
        "PrescribedDES"
    }

    fn apply(&self, _inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()> {
        ctx.fdes.copy_from(&self.fdes)?;
        ctx.c_des = self.c_des;
        ctx.mark_fdes_provided();
        Ok(())
    }
}
