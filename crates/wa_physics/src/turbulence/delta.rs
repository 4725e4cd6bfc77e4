// crates/wa_physics/src/turbulence/delta.rs

//! 滤波宽度提供者
//!
//! - [`IddesDelta`]: 由单元几何计算 `h_max` 与 IDDES 滤波宽度
//! - [`PrescribedFilterWidth`]: 包装宿主求解器给定的场
//!
//! # IDDES 滤波宽度
//!
//! ```text
//! h_max = deltaCoeff · max(ex, ey, ez) / 2        (maxDeltaxyz)
//! h_max = deltaCoeff · (ex · ey · ez)^(1/3)       (cubeRootVol)
//! Δ     = min(max(C_w d, C_w h_max, h_wn), h_max)
//! ```
//!
//! `maxDeltaxyz` 取单元中心到各面距离的最大值，默认 `deltaCoeff = 2`
//! 即单元最大边长。

use glam::DVec3;
use serde::{Deserialize, Serialize};
use wa_config::{DeltaSettings, HmaxPolicy};
use wa_foundation::{ensure_len, WaError, WaResult};

use super::traits::FilterWidthProvider;

/// 单元几何
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    /// 单元三个方向的边长 [m]
    pub extent: DVec3,
    /// 壁面法向网格间距 `h_wn` [m]
    pub wall_normal_spacing: f64,
    /// 单元中心到最近壁面的距离 [m]
    pub wall_distance: f64,
}

impl CellGeometry {
    /// 创建单元几何
    pub fn new(extent: DVec3, wall_normal_spacing: f64, wall_distance: f64) -> Self {
        Self {
            extent,
            wall_normal_spacing,
            wall_distance,
        }
    }

    fn validate(&self, cell: usize) -> WaResult<()> {
        if !self.extent.is_finite() || self.extent.min_element() <= 0.0 {
            return Err(WaError::degenerate_geometry(
                cell,
                "extent",
                self.extent.min_element(),
            ));
        }
        if !self.wall_normal_spacing.is_finite() || self.wall_normal_spacing < 0.0 {
            return Err(WaError::degenerate_geometry(
                cell,
                "wall_normal_spacing",
                self.wall_normal_spacing,
            ));
        }
        if !self.wall_distance.is_finite() || self.wall_distance < 0.0 {
            return Err(WaError::degenerate_geometry(
                cell,
                "wall_distance",
                self.wall_distance,
            ));
        }
        Ok(())
    }
}

/// 按策略计算 `h_max`
#[inline]
pub fn hmax(policy: HmaxPolicy, delta_coeff: f64, extent: DVec3) -> f64 {
    match policy {
        HmaxPolicy::MaxDeltaxyz => delta_coeff * 0.5 * extent.max_element(),
        HmaxPolicy::CubeRootVol => delta_coeff * (extent.x * extent.y * extent.z).cbrt(),
    }
}

/// IDDES 滤波宽度 `min(max(C_w d, C_w h_max, h_wn), h_max)`
#[inline]
pub fn iddes_width(wall_distance: f64, hmax: f64, wall_normal_spacing: f64, cw: f64) -> f64 {
    (cw * wall_distance)
        .max(cw * hmax)
        .max(wall_normal_spacing)
        .min(hmax)
}

/// 由单元几何计算的 IDDES 滤波宽度
#[derive(Debug, Clone)]
pub struct IddesDelta {
    settings: DeltaSettings,
    wall_distance: Vec<f64>,
    hmax: Vec<f64>,
    delta: Vec<f64>,
}

impl IddesDelta {
    /// 从单元几何创建
    pub fn new(settings: DeltaSettings, cells: &[CellGeometry]) -> WaResult<Self> {
        let mut provider = Self {
            settings,
            wall_distance: Vec::new(),
            hmax: Vec::new(),
            delta: Vec::new(),
        };
        provider.correct(cells)?;
        Ok(provider)
    }

    /// 滤波宽度设置
    pub fn settings(&self) -> &DeltaSettings {
        &self.settings
    }

    /// 几何变化后重新计算（失败时保持原值）
    pub fn correct(&mut self, cells: &[CellGeometry]) -> WaResult<()> {
        for (i, cell) in cells.iter().enumerate() {
            cell.validate(i)?;
        }

        let s = self.settings;
        let hmax: Vec<f64> = cells
            .iter()
            .map(|c| hmax(s.policy, s.delta_coeff, c.extent))
            .collect();
        let delta = cells
            .iter()
            .zip(&hmax)
            .map(|(c, &h)| iddes_width(c.wall_distance, h, c.wall_normal_spacing, s.cw))
            .collect();

        self.wall_distance = cells.iter().map(|c| c.wall_distance).collect();
        self.hmax = hmax;
        self.delta = delta;

        log::debug!(
            "IDDESDelta: {} 单元, 策略 {}, deltaCoeff={}, Cw={}",
            cells.len(),
            s.policy.as_str(),
            s.delta_coeff,
            s.cw
        );
        Ok(())
    }
}

impl FilterWidthProvider for IddesDelta {
    fn name(&self) -> &'static str {
        "IDDESDelta"
    }

    fn n_cells(&self) -> usize {
        self.hmax.len()
    }

    fn wall_distance(&self) -> &[f64] {
        &self.wall_distance
    }

    fn hmax(&self) -> &[f64] {
        &self.hmax
    }

    fn delta(&self) -> &[f64] {
        &self.delta
    }
}

/// 宿主给定的滤波宽度场
///
/// 不做正值检查：契约由宿主负责，违背时由求值引擎报告致命错误。
#[derive(Debug, Clone, PartialEq)]
pub struct PrescribedFilterWidth {
    wall_distance: Vec<f64>,
    hmax: Vec<f64>,
    delta: Vec<f64>,
}

impl PrescribedFilterWidth {
    /// 由三个场创建，长度必须一致
    pub fn new(wall_distance: Vec<f64>, hmax: Vec<f64>, delta: Vec<f64>) -> WaResult<Self> {
        ensure_len("hmax", wall_distance.len(), hmax.len())?;
        ensure_len("delta", wall_distance.len(), delta.len())?;
        Ok(Self {
            wall_distance,
            hmax,
            delta,
        })
    }

    /// `Δ = h_max` 的简化形式
    pub fn with_hmax_as_delta(wall_distance: Vec<f64>, hmax: Vec<f64>) -> WaResult<Self> {
        let delta = hmax.clone();
        Self::new(wall_distance, hmax, delta)
    }
}

impl FilterWidthProvider for PrescribedFilterWidth {
    fn name(&self) -> &'static str {
        "PrescribedFilterWidth"
    }

    fn n_cells(&self) -> usize {
        self.hmax.len()
    }

    fn wall_distance(&self) -> &[f64] {
        &self.wall_distance
    }

    fn hmax(&self) -> &[f64] {
        &self.hmax
    }

    fn delta(&self) -> &[f64] {
        &self.delta
    }
}
