// crates/wa_physics/src/turbulence/ddes.rs

//! DDES 延迟层
//!
//! ```text
//! r_d   = (ν_t + ν) / (κ² d² max(|∇U|, 10⁻¹⁰))
//! f_d   = 1 − tanh((C_d1 r_d)³)
//! f_DES = max(f_d · l_RANS / (C_DES Δ), 1)
//! ```
//!
//! 附着边界层内 `r_d` 大，`f_d → 0`，破坏项乘子回到 RANS 值 1。

use wa_foundation::{WaError, WaResult};

use super::context::{BlendingContext, LayerInputs};
use super::correlations::{fd, wall_ratio};
use super::traits::BlendingLayer;

/// WA2017 DDES 延迟层
#[derive(Debug, Clone, Copy, Default)]
pub struct Wa2017Ddes;

impl BlendingLayer for Wa2017Ddes {
    fn name(&self) -> &'static str {
        "WA2017DDES"
    }

    fn apply(&self, inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()> {
        let c = inputs.coeffs;
        let d = inputs.filter.wall_distance();
        let delta = inputs.filter.delta();
        let mag = inputs.rans.mag_grad_u();
        let nu_t = inputs.rans.nu_t();
        let nu = inputs.rans.nu();
        let l_rans = inputs.rans.rans_length_scale();

        inputs.eval.fill_cells(&mut ctx.fd, |i| {
            let r_d = wall_ratio(nu_t[i] + nu[i], mag[i], d[i], c.kappa);
            fd(r_d, c.cd1)
        });

        let fd_field = &ctx.fd;
        let c_des = c.c_des;
        inputs.eval.fill_cells(&mut ctx.fdes, |i| {
            (fd_field[i] * l_rans[i] / (c_des * delta[i])).max(1.0)
        });

        ctx.c_des = c_des;
        ctx.mark_fd_provided();
        ctx.mark_fdes_provided();
        Ok(())
    }
}

/// 宿主给定的延迟函数
#[derive(Debug, Clone, PartialEq)]
pub struct PrescribedDelay {
    fd: Vec<f64>,
}

impl PrescribedDelay {
    /// 创建，`f_d` 必须位于 [0, 1]
    pub fn new(fd: Vec<f64>) -> WaResult<Self> {
        if let Some(&v) = fd.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(WaError::out_of_range("fd", v, 0.0, 1.0));
        }
        Ok(Self { fd })
    }

    /// 均匀延迟函数
    pub fn uniform(n_cells: usize, fd: f64) -> WaResult<Self> {
        Self::new(vec![fd; n_cells])
    }
}

impl BlendingLayer for PrescribedDelay {
    fn name(&self) -> &'static str {
        "PrescribedDelay"
    }

    fn apply(&self, _inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()> {
        ctx.fd.copy_from(&self.fd)?;
        ctx.mark_fd_provided();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::EvalConfig;
    use crate::turbulence::delta::PrescribedFilterWidth;
    use crate::turbulence::rans::RansSnapshot;
    use wa_config::Wa2017IddesCoeffs;

    #[test]
    fn test_ddes_shields_boundary_layer() {
        // 单元 0: 近壁、高涡粘性 → f_d ≈ 0
        // 单元 1: 远场、零涡粘性 → f_d ≈ 1
        let rans = RansSnapshot::with_uniform_nu(
            vec![100.0, 1.0],
            vec![1e-3, 0.0],
            1e-6,
            vec![0.01, 5.0],
        )
        .unwrap();
        let filter =
            PrescribedFilterWidth::with_hmax_as_delta(vec![1e-3, 5.0], vec![0.1, 0.1]).unwrap();
        let coeffs = Wa2017IddesCoeffs::default();
        let inputs = LayerInputs {
            rans: &rans,
            filter: &filter,
            coeffs: &coeffs,
            eval: EvalConfig::sequential(),
        };

        let mut ctx = BlendingContext::new(2);
        Wa2017Ddes.apply(&inputs, &mut ctx).unwrap();
        assert!(ctx.fd_provided() && ctx.fdes_provided());
        assert!(ctx.fd[0] < 1e-6);
        assert!((ctx.fd[1] - 1.0).abs() < 1e-9);
        assert_eq!(ctx.fdes[0], 1.0);
        assert!((ctx.fdes[1] - 5.0 / (0.41 * 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_prescribed_delay_range() {
        assert!(PrescribedDelay::new(vec![0.0, 0.5, 1.0]).is_ok());
        match PrescribedDelay::new(vec![0.5, 1.2]) {
            Err(WaError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "fd");
                assert_eq!(value, 1.2);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(PrescribedDelay::uniform(3, f64::NAN).is_err());
    }
}
