// crates/wa_physics/src/turbulence/model.rs

//! WA2017 IDDES 模型
//!
//! 组合 DES → DDES → IDDES 三层，对外暴露 `calc_fdes` 求值入口。
//!
//! # 求值流程
//!
//! 1. 升级滤波宽度提供者的弱引用，失效时返回 `ProviderUnavailable`
//! 2. 检查场长度与几何（`h_max`、`Δ` 有限且为正）
//! 3. 在后台上下文中依次应用各层
//! 4. 全部成功后交换前后台上下文
//!
//! 任一步失败时前台上下文保持上一次求值的结果。
//!
//! # 示例
//!
//! ```
//! use std::sync::Arc;
//! use wa_config::TurbulenceProperties;
//! use wa_physics::turbulence::{
//!     FilterWidthProvider, PrescribedFilterWidth, RansSnapshot, Wa2017Iddes,
//! };
//!
//! let filter: Arc<dyn FilterWidthProvider> = Arc::new(
//!     PrescribedFilterWidth::with_hmax_as_delta(vec![0.0, 0.5], vec![1.0, 1.0]).unwrap(),
//! );
//! let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
//!
//! let rans = RansSnapshot::with_uniform_nu(
//!     vec![10.0, 10.0],
//!     vec![1e-4, 1e-4],
//!     1e-5,
//!     vec![0.1, 0.1],
//! )
//! .unwrap();
//! model.calc_fdes(&rans).unwrap();
//! assert_eq!(model.fdtilda()[0], 1.0);
//! ```

use std::sync::{Arc, Weak};

use wa_config::{CoeffStore, ConfigError, TurbulenceProperties, Wa2017IddesCoeffs};
use wa_foundation::{ensure_len, ScalarField, WaError, WaResult};

use super::context::{BlendingContext, LayerInputs};
use super::ddes::Wa2017Ddes;
use super::des::Wa2017Des;
use super::iddes::IddesLayer;
use super::traits::{BlendingLayer, FilterWidthProvider, RansCore};
use crate::parallel::EvalConfig;

/// WA2017 IDDES 混合模型
pub struct Wa2017Iddes {
    store: CoeffStore,
    print_coeffs: bool,
    filter: Weak<dyn FilterWidthProvider>,
    filter_name: &'static str,
    layers: Vec<Box<dyn BlendingLayer>>,
    iddes: IddesLayer,
    eval: EvalConfig,
    front: BlendingContext,
    back: BlendingContext,
    evaluations: u64,
}

impl Wa2017Iddes {
    /// 创建模型
    ///
    /// 系数或滤波宽度设置非法时构造失败。
    /// 默认组合链为 [`Wa2017Des`] → [`Wa2017Ddes`]。
    pub fn new(
        props: &TurbulenceProperties,
        filter: &Arc<dyn FilterWidthProvider>,
    ) -> WaResult<Self> {
        props.check_model()?;
        props.delta_settings()?;
        let store = CoeffStore::from_properties(props)?;
        let n_cells = filter.n_cells();

        let model = Self {
            store,
            print_coeffs: props.print_coeffs,
            filter: Arc::downgrade(filter),
            filter_name: filter.name(),
            layers: vec![Box::new(Wa2017Des), Box::new(Wa2017Ddes)],
            iddes: IddesLayer,
            eval: EvalConfig::default(),
            front: BlendingContext::new(n_cells),
            back: BlendingContext::new(n_cells),
            evaluations: 0,
        };

        log::debug!(
            "WA2017IDDES: {} 单元, 滤波宽度提供者 {}",
            n_cells,
            model.filter_name
        );
        model.log_coeffs();
        Ok(model)
    }

    /// 替换 IDDES 之前的组合链
    pub fn with_layers(mut self, layers: Vec<Box<dyn BlendingLayer>>) -> Self {
        self.layers = layers;
        self
    }

    /// 设置求值配置
    pub fn with_eval_config(mut self, eval: EvalConfig) -> Self {
        self.eval = eval;
        self
    }

    fn log_coeffs(&self) {
        let entries = self.store.get().entries();
        if self.print_coeffs {
            for (key, value) in entries {
                log::info!("  {:<8} = {}", key, value);
            }
        } else {
            for (key, value) in entries {
                log::debug!("  {:<8} = {}", key, value);
            }
        }
    }

    // ========================================================================
    // 求值
    // ========================================================================

    /// 重新计算全部混合场，并把 `fdtilda` 写入破坏项乘子
    pub fn calc_fdes(&mut self, rans: &dyn RansCore) -> WaResult<()> {
        let filter = self
            .filter
            .upgrade()
            .ok_or_else(|| WaError::provider_unavailable(self.filter_name))?;
        self.check_inputs(filter.as_ref(), rans)?;

        let coeffs = self.store.snapshot();
        let inputs = LayerInputs {
            rans,
            filter: filter.as_ref(),
            coeffs: &coeffs,
            eval: self.eval,
        };

        self.back.begin();
        for layer in &self.layers {
            layer.apply(&inputs, &mut self.back)?;
            log::trace!("层 {} 完成", layer.name());
        }

        if !self.back.fd_provided() {
            return Err(WaError::invalid_input("组合链中没有层提供延迟函数 fd"));
        }
        if !self.back.fdes_provided() {
            return Err(WaError::invalid_input("组合链中没有层提供 fdes 基线"));
        }

        self.iddes.apply(&inputs, &mut self.back)?;
        std::mem::swap(&mut self.front, &mut self.back);
        self.evaluations += 1;

        let report = self.front.validate();
        if !report.is_valid() {
            log::warn!("混合场不变量检查失败: {}", report);
        }
        if log::log_enabled!(log::Level::Trace) {
            for field in [&self.front.fe, &self.front.fdtilda, &self.front.fdes] {
                if let Some(s) = field.stats() {
                    log::trace!(
                        "{}: min={:.4e} max={:.4e} mean={:.4e}",
                        field.name(),
                        s.min,
                        s.max,
                        s.mean
                    );
                }
            }
        }
        Ok(())
    }

    fn check_inputs(&self, filter: &dyn FilterWidthProvider, rans: &dyn RansCore) -> WaResult<()> {
        let n = self.front.n_cells();
        ensure_len("filter", n, filter.n_cells())?;
        ensure_len("wall_distance", n, filter.wall_distance().len())?;
        ensure_len("hmax", n, filter.hmax().len())?;
        ensure_len("delta", n, filter.delta().len())?;
        rans.check_sizes(n)?;

        let positive = |v: f64| v.is_finite() && v > 0.0;
        let hmax = filter.hmax();
        if let Some(i) = self.eval.find_cell(n, |i| !positive(hmax[i])) {
            return Err(WaError::degenerate_geometry(i, "hmax", hmax[i]));
        }
        let delta = filter.delta();
        if let Some(i) = self.eval.find_cell(n, |i| !positive(delta[i])) {
            return Err(WaError::degenerate_geometry(i, "delta", delta[i]));
        }
        let d = filter.wall_distance();
        if let Some(i) = self.eval.find_cell(n, |i| !(d[i].is_finite() && d[i] >= 0.0)) {
            return Err(WaError::degenerate_geometry(i, "wall_distance", d[i]));
        }

        let fields: [(&str, &[f64]); 4] = [
            ("mag_grad_u", rans.mag_grad_u()),
            ("nu_t", rans.nu_t()),
            ("nu", rans.nu()),
            ("rans_length_scale", rans.rans_length_scale()),
        ];
        for (name, values) in fields {
            if let Some(i) = self.eval.find_cell(n, |i| !values[i].is_finite()) {
                return Err(WaError::invalid_input(format!(
                    "RANS 场 {} 在单元 {} 处非有限: {}",
                    name, i, values[i]
                )));
            }
        }
        Ok(())
    }

    /// 混合长度尺度
    ///
    /// ```text
    /// l_hyb = fdtilda (1 + fe) l_RANS + (1 − fdtilda) C_DES Δ
    /// ```
    ///
    /// 使用最近一次成功求值的场。
    pub fn hybrid_length_scale(&self, rans: &dyn RansCore) -> WaResult<ScalarField> {
        let filter = self
            .filter
            .upgrade()
            .ok_or_else(|| WaError::provider_unavailable(self.filter_name))?;
        let n = self.front.n_cells();
        ensure_len("delta", n, filter.delta().len())?;
        ensure_len("rans_length_scale", n, rans.rans_length_scale().len())?;

        let ctx = &self.front;
        let l_rans = rans.rans_length_scale();
        let delta = filter.delta();
        let mut out = ScalarField::zeros("l_hybrid", n);
        self.eval.fill_cells(&mut out, |i| {
            let f = ctx.fdtilda[i];
            f * (1.0 + ctx.fe[i]) * l_rans[i] + (1.0 - f) * ctx.c_des * delta[i]
        });
        Ok(out)
    }

    // ========================================================================
    // 配置
    // ========================================================================

    /// 重读系数
    ///
    /// 返回系数是否变化。文档中任一项非法（包括滤波宽度设置）时
    /// 保留原有系数与版本号。
    pub fn read(&mut self, props: &TurbulenceProperties) -> Result<bool, ConfigError> {
        if let Err(e) = props.check_model().and_then(|_| props.delta_settings()) {
            log::warn!("系数重读被拒绝: {}", e);
            return Err(e);
        }
        let changed = self.store.reload(props)?.changed();
        self.print_coeffs = props.print_coeffs;
        if changed {
            self.log_coeffs();
        }
        Ok(changed)
    }

    // ========================================================================
    // 访问器
    // ========================================================================

    /// 当前系数
    pub fn coeffs(&self) -> &Wa2017IddesCoeffs {
        self.store.get()
    }

    /// 系数版本号（每次成功且有变化的重读加一）
    pub fn coeff_version(&self) -> u64 {
        self.store.version()
    }

    /// 单元数
    pub fn n_cells(&self) -> usize {
        self.front.n_cells()
    }

    /// 成功求值次数
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// 最近一次成功求值的上下文
    pub fn context(&self) -> &BlendingContext {
        &self.front
    }

    /// DES 标定常数
    pub fn c_des(&self) -> f64 {
        self.front.c_des
    }

    /// 抬升混合因子
    pub fn alpha(&self) -> &ScalarField {
        &self.front.alpha
    }

    /// 湍流关联函数
    pub fn ft(&self) -> &ScalarField {
        &self.front.ft
    }

    /// 层流关联函数
    pub fn fl(&self) -> &ScalarField {
        &self.front.fl
    }

    /// 抬升函数
    pub fn fe(&self) -> &ScalarField {
        &self.front.fe
    }

    /// 延迟函数
    pub fn fd(&self) -> &ScalarField {
        &self.front.fd
    }

    /// 混合长度尺度选择器
    pub fn fdtilda(&self) -> &ScalarField {
        &self.front.fdtilda
    }

    /// 破坏项乘子
    pub fn fdes(&self) -> &ScalarField {
        &self.front.fdes
    }
}

impl std::fmt::Debug for Wa2017Iddes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let layers: Vec<&str> = self.layers.iter().map(|l| l.name()).collect();
        f.debug_struct("Wa2017Iddes")
            .field("n_cells", &self.n_cells())
            .field("filter", &self.filter_name)
            .field("layers", &layers)
            .field("coeff_version", &self.coeff_version())
            .field("evaluations", &self.evaluations)
            .finish()
    }
}
