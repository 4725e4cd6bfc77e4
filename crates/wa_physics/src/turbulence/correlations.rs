// crates/wa_physics/src/turbulence/correlations.rs

//! IDDES 经验关联函数（逐单元）
//!
//! # 公式
//!
//! ```text
//! α       = 0.25 − d / h_max
//! r_dt    = ν_t / (κ² d² max(|∇U|, 10⁻¹⁰))
//! r_dl    = ν   / (κ² d² max(|∇U|, 10⁻¹⁰))
//! f_t     = tanh((c_t² r_dt)³)
//! f_l     = tanh((c_l² r_dl)¹⁰)
//! f_e1    = 2 exp(−11.09 α²)   (α ≥ 0)
//!           2 exp(−9 α²)       (α < 0)
//! f_e2    = 1 − max(f_t, f_l)
//! f_e     = max(f_e1 − 1, 0) · f_e2
//! f_B     = min(2 exp(−9 α²), 1)
//! f̃_d     = max(1 − f_d, f_B, f_e)
//! f_d     = 1 − tanh((C_d1 r_d)³),  r_d = (ν_t + ν) / (κ² d² max(|∇U|, 10⁻¹⁰))
//! ```
//!
//! 参考：Shur, Spalart, Strelets & Travin (2008) 的 IDDES 形式，
//! 以及 Han & Agarwal (2018) 基于 Wray-Agarwal 模型的 IDDES。

use wa_foundation::{ROOT_VSMALL, SMALL_GRADIENT};

/// `α` 的偏移量
pub const ALPHA_OFFSET: f64 = 0.25;

/// `f_e1` 在 α ≥ 0 时的指数系数
pub const FE1_EXPONENT_POSITIVE: f64 = 11.09;

/// `f_e1` 在 α < 0 时的指数系数，同时用于 `f_B`
pub const FE1_EXPONENT_NEGATIVE: f64 = 9.0;

/// 抬升混合因子
#[inline]
pub fn alpha(wall_distance: f64, hmax: f64) -> f64 {
    ALPHA_OFFSET - wall_distance / hmax
}

/// 类雷诺数的近壁比值 `ν_x / (κ² d² max(|∇U|, ε))`
///
/// 分母有下限，`d = 0` 的壁面单元给出饱和值而非 NaN；负的输入粘性截断为零。
#[inline]
pub fn wall_ratio(viscosity: f64, mag_grad_u: f64, wall_distance: f64, kappa: f64) -> f64 {
    let denom = kappa * kappa * wall_distance * wall_distance * mag_grad_u.max(SMALL_GRADIENT);
    viscosity.max(0.0) / denom.max(ROOT_VSMALL)
}

/// 湍流关联 `f_t`，立方律，识别已解析湍流
#[inline]
pub fn ft(r_dt: f64, ct: f64) -> f64 {
    (ct * ct * r_dt).powi(3).tanh()
}

/// 层流关联 `f_l`，十次方律，识别层流与近壁子层
#[inline]
pub fn fl(r_dl: f64, cl: f64) -> f64 {
    (cl * cl * r_dl).powi(10).tanh()
}

/// 抬升包络 `f_e1`（在 α = 0 两侧非对称）
#[inline]
pub fn fe1(alpha: f64) -> f64 {
    let a2 = alpha * alpha;
    if alpha >= 0.0 {
        2.0 * (-FE1_EXPONENT_POSITIVE * a2).exp()
    } else {
        2.0 * (-FE1_EXPONENT_NEGATIVE * a2).exp()
    }
}

/// 抬升抑制 `f_e2`
#[inline]
pub fn fe2(ft: f64, fl: f64) -> f64 {
    1.0 - ft.max(fl)
}

/// 抬升函数 `f_e`，恒非负
#[inline]
pub fn fe(fe1: f64, fe2: f64) -> f64 {
    (fe1 - 1.0).max(0.0) * fe2
}

/// 网格混合包络 `f_B`
#[inline]
pub fn f_b(alpha: f64) -> f64 {
    (2.0 * (-FE1_EXPONENT_NEGATIVE * alpha * alpha).exp()).min(1.0)
}

/// 混合长度尺度选择器 `f̃_d`
#[inline]
pub fn fdtilda(fd: f64, f_b: f64, fe: f64) -> f64 {
    (1.0 - fd).max(f_b).max(fe)
}

/// DDES 延迟函数 `f_d`（边界层内趋于 0）
#[inline]
pub fn fd(r_d: f64, cd1: f64) -> f64 {
    1.0 - (cd1 * r_d).powi(3).tanh()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha() {
        assert!((alpha(0.0, 1.0) - 0.25).abs() < 1e-15);
        assert!((alpha(0.25, 1.0)).abs() < 1e-15);
        assert!((alpha(10.0, 1.0) + 9.75).abs() < 1e-12);
    }

    #[test]
    fn test_wall_ratio_guards() {
        // d = 0 且 ν_t = 0: 有限
        let r = wall_ratio(0.0, 1.0, 0.0, 0.41);
        assert_eq!(r, 0.0);
        // d = 0 且 ν_t > 0: 饱和但不是 NaN
        let r = wall_ratio(1e-5, 1.0, 0.0, 0.41);
        assert!(!r.is_nan());
        assert!((ft(r, 1.63) - 1.0).abs() < 1e-15);
        // 零梯度使用下限
        let r = wall_ratio(1.0, 0.0, 1.0, 1.0);
        assert!((r - 1e10).abs() < 1.0);
        // 负粘性截断
        assert_eq!(wall_ratio(-1.0, 1.0, 1.0, 0.41), 0.0);
    }

    #[test]
    fn test_ft_fl_bounds_and_shape() {
        for &r in &[0.0, 1e-3, 0.1, 0.5, 1.0, 10.0, 1e6] {
            let t = ft(r, 1.63);
            let l = fl(r, 3.55);
            assert!((0.0..=1.0).contains(&t));
            assert!((0.0..=1.0).contains(&l));
        }
        // 十次方律在小比值时比立方律更平缓地离开零
        let r = 0.05;
        assert!(fl(r, 1.0) < ft(r, 1.0));
    }

    #[test]
    fn test_fe1_asymmetry() {
        assert!((fe1(0.0) - 2.0).abs() < 1e-15);
        let a = 0.2;
        assert!(fe1(a) < fe1(-a));
        assert!((fe1(-a) - 2.0 * (-9.0 * a * a).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_fe_nonnegative() {
        assert_eq!(fe(0.5, 1.0), 0.0);
        assert!((fe(1.5, 0.5) - 0.25).abs() < 1e-15);
        assert_eq!(fe(2.0, 0.0), 0.0);
    }

    #[test]
    fn test_f_b_capped() {
        assert_eq!(f_b(0.0), 1.0);
        assert_eq!(f_b(0.25), 1.0);
        assert!(f_b(-3.0) < 1e-30);
    }

    #[test]
    fn test_fdtilda_is_max_of_indicators() {
        assert_eq!(fdtilda(1.0, 0.0, 0.0), 0.0);
        assert_eq!(fdtilda(0.0, 0.2, 0.3), 1.0);
        assert_eq!(fdtilda(0.9, 0.05, 0.4), 0.4);
    }

    #[test]
    fn test_fd_limits() {
        assert!((fd(0.0, 4.0) - 1.0).abs() < 1e-15);
        assert!(fd(10.0, 4.0).abs() < 1e-12);
    }
}
