// crates/wa_physics/src/turbulence/context.rs

//! 混合求值上下文
//!
//! 组合链各层共享的具名中间场。每次求值都写入一个后台上下文，
//! 全部层成功后才与前台上下文交换，外部永远看不到部分更新的场。

use wa_config::Wa2017IddesCoeffs;
use wa_foundation::{ScalarField, ValidationReport};

use super::traits::{FilterWidthProvider, RansCore};
use crate::parallel::EvalConfig;

/// 层的只读输入
pub struct LayerInputs<'a> {
    /// RANS 核心
    pub rans: &'a dyn RansCore,
    /// 滤波宽度提供者
    pub filter: &'a dyn FilterWidthProvider,
    /// 本次求值使用的系数快照
    pub coeffs: &'a Wa2017IddesCoeffs,
    /// 求值配置
    pub eval: EvalConfig,
}

impl<'a> LayerInputs<'a> {
    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.filter.n_cells()
    }
}

/// 混合求值上下文
#[derive(Debug, Clone)]
pub struct BlendingContext {
    /// DES 标定常数（由 DES 层写入）
    pub c_des: f64,
    /// 破坏项乘子（DES 层写基线，后续层覆盖）
    pub fdes: ScalarField,
    /// DDES 延迟函数
    pub fd: ScalarField,
    /// 抬升混合因子
    pub alpha: ScalarField,
    /// 湍流关联函数
    pub ft: ScalarField,
    /// 层流关联函数
    pub fl: ScalarField,
    /// 抬升函数
    pub fe: ScalarField,
    /// 混合长度尺度选择器
    pub fdtilda: ScalarField,
    fdes_provided: bool,
    fd_provided: bool,
}

impl BlendingContext {
    /// 创建全零上下文
    pub fn new(n_cells: usize) -> Self {
        Self {
            c_des: 0.0,
            fdes: ScalarField::zeros("fdes", n_cells),
            fd: ScalarField::zeros("fd", n_cells),
            alpha: ScalarField::zeros("alpha", n_cells),
            ft: ScalarField::zeros("ft", n_cells),
            fl: ScalarField::zeros("fl", n_cells),
            fe: ScalarField::zeros("fe", n_cells),
            fdtilda: ScalarField::zeros("fdtilda", n_cells),
            fdes_provided: false,
            fd_provided: false,
        }
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.fdes.len()
    }

    /// 开始新一次求值，清除“已提供”标记
    pub(crate) fn begin(&mut self) {
        self.fdes_provided = false;
        self.fd_provided = false;
    }

    /// 标记 `c_des`/`fdes` 已由某层写入
    pub fn mark_fdes_provided(&mut self) {
        self.fdes_provided = true;
    }

    /// 标记 `fd` 已由某层写入
    pub fn mark_fd_provided(&mut self) {
        self.fd_provided = true;
    }

    /// 本次求值是否已写入 `fdes`
    pub fn fdes_provided(&self) -> bool {
        self.fdes_provided
    }

    /// 本次求值是否已写入 `fd`
    pub fn fd_provided(&self) -> bool {
        self.fd_provided
    }

    /// 检查场不变量
    ///
    /// - 所有场有限
    /// - `ft`、`fl`、`fe`、`fd`、`fdtilda` ∈ [0, 1]
    /// - `fdes` ≥ 0
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check_finite("alpha", &self.alpha);
        report.check_range("ft", &self.ft, 0.0, 1.0);
        report.check_range("fl", &self.fl, 0.0, 1.0);
        report.check_range("fe", &self.fe, 0.0, 1.0);
        report.check_range("fd", &self.fd, 0.0, 1.0);
        report.check_range("fdtilda", &self.fdtilda, 0.0, 1.0);
        report.check_range("fdes", &self.fdes, 0.0, f64::MAX);
        report
    }
}
