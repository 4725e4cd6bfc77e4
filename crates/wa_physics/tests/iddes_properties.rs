// crates/wa_physics/tests/iddes_properties.rs

//! IDDES 混合场性质测试
//!
//! 覆盖：
//! - 有界性（fe ≥ 0，fdtilda ∈ [0, 1]）
//! - 幂等性与串并行一致性
//! - 近壁、远场与极限情形
//! - 系数重读失败后保持原值
//! - 提供者共享、失效与退化几何

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::DVec3;
use wa_config::{DeltaSettings, TurbulenceProperties};
use wa_foundation::{ScalarField, WaError, WaResult};
use wa_physics::turbulence::correlations;
use wa_physics::{
    BlendingContext, BlendingLayer, CellGeometry, EvalConfig, FilterWidthProvider, IddesDelta,
    LayerInputs, PrescribedDelay, PrescribedDes, PrescribedFilterWidth, RansSnapshot, Wa2017Ddes,
    Wa2017Des, Wa2017Iddes,
};

// ============================================================
// 测试辅助设施
// ============================================================

const KAPPA: f64 = 0.41;

/// 半通道网格：n 个单元沿壁面法向均匀分布
fn channel_cells(n: usize, height: f64) -> Vec<CellGeometry> {
    let dy = height / n as f64;
    (0..n)
        .map(|i| {
            let d = (i as f64 + 0.5) * dy;
            CellGeometry::new(DVec3::new(0.1 * height, dy, 0.05 * height), dy, d)
        })
        .collect()
}

/// 对数律近似的 RANS 场
fn channel_rans(cells: &[CellGeometry], height: f64, re_tau: f64) -> RansSnapshot {
    let u_tau = 1.0;
    let nu = u_tau * height / re_tau;
    let mag = cells
        .iter()
        .map(|c| u_tau / (KAPPA * c.wall_distance))
        .collect();
    let nu_t = cells
        .iter()
        .map(|c| KAPPA * u_tau * c.wall_distance * (1.0 - c.wall_distance / height))
        .collect();
    let l = cells.iter().map(|c| KAPPA * c.wall_distance).collect();
    RansSnapshot::with_uniform_nu(mag, nu_t, nu, l).unwrap()
}

fn channel_provider(n: usize, height: f64) -> Arc<dyn FilterWidthProvider> {
    let cells = channel_cells(n, height);
    Arc::new(IddesDelta::new(DeltaSettings::default(), &cells).unwrap())
}

fn uniform_filter(n: usize, d: f64, hmax: f64) -> Arc<dyn FilterWidthProvider> {
    Arc::new(PrescribedFilterWidth::with_hmax_as_delta(vec![d; n], vec![hmax; n]).unwrap())
}

fn uniform_rans(n: usize) -> RansSnapshot {
    RansSnapshot::with_uniform_nu(vec![10.0; n], vec![1e-4; n], 1e-5, vec![0.1; n]).unwrap()
}

fn model_with_delay(filter: &Arc<dyn FilterWidthProvider>, fd: f64) -> Wa2017Iddes {
    let n = filter.n_cells();
    Wa2017Iddes::new(&TurbulenceProperties::default(), filter)
        .unwrap()
        .with_layers(vec![
            Box::new(Wa2017Des),
            Box::new(PrescribedDelay::uniform(n, fd).unwrap()),
        ])
}

fn snapshot(model: &Wa2017Iddes) -> Vec<ScalarField> {
    vec![
        model.alpha().clone(),
        model.ft().clone(),
        model.fl().clone(),
        model.fe().clone(),
        model.fd().clone(),
        model.fdtilda().clone(),
        model.fdes().clone(),
    ]
}

fn all_bitwise_eq(a: &[ScalarField], b: &[ScalarField]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.bitwise_eq(y))
}

// ============================================================
// 有界性
// ============================================================

#[test]
fn test_bounds_over_sampled_inputs() {
    let distances = [0.0, 1e-6, 1e-3, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 3.0, 100.0];
    let hmaxes = [1e-3, 0.02, 0.1, 1.0];
    let gradients = [0.0, 1e-3, 1.0, 1e3];
    let nu_ts = [0.0, 1e-6, 1e-3, 1.0];

    let mut d = Vec::new();
    let mut h = Vec::new();
    let mut mag = Vec::new();
    let mut nu_t = Vec::new();
    for &di in &distances {
        for &hi in &hmaxes {
            for &gi in &gradients {
                for &ti in &nu_ts {
                    d.push(di);
                    h.push(hi);
                    mag.push(gi);
                    nu_t.push(ti);
                }
            }
        }
    }
    let n = d.len();

    let filter: Arc<dyn FilterWidthProvider> =
        Arc::new(PrescribedFilterWidth::with_hmax_as_delta(d, h).unwrap());
    let rans = RansSnapshot::with_uniform_nu(mag, nu_t, 1e-5, vec![0.1; n]).unwrap();
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();

    for i in 0..n {
        let fe = model.fe()[i];
        let fdtilda = model.fdtilda()[i];
        assert!(fe >= 0.0 && fe <= 1.0, "单元 {}: fe={}", i, fe);
        assert!((0.0..=1.0).contains(&fdtilda), "单元 {}: fdtilda={}", i, fdtilda);
        assert!((0.0..=1.0).contains(&model.ft()[i]));
        assert!((0.0..=1.0).contains(&model.fl()[i]));
        assert!(model.alpha()[i].is_finite());

        // fdtilda 不小于其组合的任一指示量
        let f_b = correlations::f_b(model.alpha()[i]);
        assert!(fdtilda >= fe);
        assert!(fdtilda >= f_b);
        assert!(fdtilda >= 1.0 - model.fd()[i]);
    }
    assert!(model.context().validate().is_valid());
}

#[test]
fn test_fdes_is_fdtilda() {
    let filter = channel_provider(64, 1.0);
    let rans = channel_rans(&channel_cells(64, 1.0), 1.0, 1000.0);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();
    assert_eq!(model.fdes().as_slice(), model.fdtilda().as_slice());
}

// ============================================================
// 幂等性与并行一致性
// ============================================================

#[test]
fn test_idempotent_evaluation() {
    let filter = channel_provider(200, 2.0);
    let rans = channel_rans(&channel_cells(200, 2.0), 2.0, 550.0);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();

    model.calc_fdes(&rans).unwrap();
    let first = snapshot(&model);
    model.calc_fdes(&rans).unwrap();
    let second = snapshot(&model);

    assert!(all_bitwise_eq(&first, &second));
    assert_eq!(model.evaluations(), 2);
}

#[test]
fn test_in_place_rans_update_is_picked_up() {
    let filter = uniform_filter(1, 0.02, 0.1);
    let mut rans = uniform_rans(1);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();
    let (ft0, fl0) = (model.ft()[0], model.fl()[0]);

    // 宿主原位更新 RANS 场，不重建快照
    rans.nu_t_mut()[0] *= 0.5;
    model.calc_fdes(&rans).unwrap();
    assert!(model.ft()[0] < ft0);
    assert_eq!(model.fl()[0], fl0);

    rans.mag_grad_u_mut()[0] *= 2.0;
    model.calc_fdes(&rans).unwrap();
    assert!(model.fl()[0] < fl0);
    assert_eq!(model.evaluations(), 3);
}

#[test]
fn test_sequential_matches_parallel() {
    let n = 10_000;
    let filter = channel_provider(n, 1.0);
    let rans = channel_rans(&channel_cells(n, 1.0), 1.0, 5200.0);

    let mut seq = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter)
        .unwrap()
        .with_eval_config(EvalConfig::sequential());
    let mut par = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter)
        .unwrap()
        .with_eval_config(EvalConfig::parallel());
    seq.calc_fdes(&rans).unwrap();
    par.calc_fdes(&rans).unwrap();

    assert!(all_bitwise_eq(&snapshot(&seq), &snapshot(&par)));
}

// ============================================================
// 极限与典型情形
// ============================================================

#[test]
fn test_floor_when_delay_inactive_far_from_wall() {
    // f_d = 1, alpha ≪ 0 使 f_B 与 fe 可忽略
    let filter = uniform_filter(4, 10.0, 0.1);
    let mut model = model_with_delay(&filter, 1.0);
    model.calc_fdes(&uniform_rans(4)).unwrap();
    for i in 0..4 {
        assert_eq!(model.fe()[i], 0.0);
        assert!(model.fdtilda()[i] < 1e-12);
    }
}

#[test]
fn test_ceiling_when_delay_fully_active() {
    let filter = uniform_filter(3, 0.7, 0.1);
    let mut model = model_with_delay(&filter, 0.0);
    model.calc_fdes(&uniform_rans(3)).unwrap();
    assert!(model.fdtilda().iter().all(|&v| v == 1.0));
}

#[test]
fn test_wall_cell_uses_rans() {
    // d = 0, h_max = 1
    let filter = uniform_filter(1, 0.0, 1.0);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&uniform_rans(1)).unwrap();

    assert!((model.alpha()[0] - 0.25).abs() < 1e-15);
    assert_eq!(correlations::f_b(model.alpha()[0]), 1.0);
    assert_eq!(model.fdtilda()[0], 1.0);
}

#[test]
fn test_far_field_tracks_elevation() {
    // d ≫ h_max: f_B → 0；f_d = 1 时 fdtilda 与 fe 之差不超过 f_B
    let filter = uniform_filter(2, 3.0, 1.0);
    let mut model = model_with_delay(&filter, 1.0);
    model.calc_fdes(&uniform_rans(2)).unwrap();

    let f_b = correlations::f_b(model.alpha()[0]);
    assert!(f_b < 1e-20);
    assert!((model.fdtilda()[0] - model.fe()[0]).abs() <= f_b);
}

#[test]
fn test_channel_profile_shape() {
    let n = 100;
    let cells = channel_cells(n, 1.0);
    let filter = channel_provider(n, 1.0);
    let rans = channel_rans(&cells, 1.0, 2000.0);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();

    // 第一层单元位于附着边界层内
    assert_eq!(model.fdtilda()[0], 1.0);
    // 混合长度尺度处处为正
    let l = model.hybrid_length_scale(&rans).unwrap();
    assert!(l.iter().all(|&v| v > 0.0 && v.is_finite()));
}

#[test]
fn test_geometry_from_json() {
    let json = r#"[
        { "extent": [0.1, 0.01, 0.05], "wall_normal_spacing": 0.01, "wall_distance": 0.005 },
        { "extent": [0.1, 0.1, 0.05], "wall_normal_spacing": 0.1, "wall_distance": 0.5 }
    ]"#;
    let cells: Vec<CellGeometry> = serde_json::from_str(json).unwrap();
    let provider = IddesDelta::new(DeltaSettings::default(), &cells).unwrap();
    assert!((provider.hmax()[0] - 0.1).abs() < 1e-15);
    // Δ = min(max(0.15·0.005, 0.15·0.1, 0.01), 0.1) = 0.015
    assert!((provider.delta()[0] - 0.015).abs() < 1e-15);
}

// ============================================================
// 系数重读
// ============================================================

#[test]
fn test_rejected_reread_keeps_coefficients_and_results() {
    let filter = channel_provider(32, 1.0);
    let rans = channel_rans(&channel_cells(32, 1.0), 1.0, 1000.0);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();
    let before = snapshot(&model);
    let ct = model.coeffs().ct;

    let props = TurbulenceProperties::from_yaml("coeffs:\n  ct: -1.0\n").unwrap();
    assert!(model.read(&props).is_err());
    assert_eq!(model.coeffs().ct, ct);
    assert_eq!(model.coeff_version(), 0);

    model.calc_fdes(&rans).unwrap();
    assert!(all_bitwise_eq(&before, &snapshot(&model)));
}

#[test]
fn test_reread_changes_results() {
    let filter = uniform_filter(1, 0.02, 0.1);
    let rans = uniform_rans(1);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();
    let ft_before = model.ft()[0];

    let props = TurbulenceProperties::from_json(r#"{"coeffs": {"ct": 0.5}}"#).unwrap();
    assert!(model.read(&props).unwrap());
    model.calc_fdes(&rans).unwrap();
    assert!(model.ft()[0] < ft_before);
}

// ============================================================
// 提供者与错误路径
// ============================================================

#[test]
fn test_provider_shared_between_models() {
    let filter = channel_provider(16, 1.0);
    let rans = channel_rans(&channel_cells(16, 1.0), 1.0, 1000.0);

    let mut a = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    let props = TurbulenceProperties::from_json(r#"{"coeffs": {"cl": 5.0}}"#).unwrap();
    let mut b = Wa2017Iddes::new(&props, &filter).unwrap();

    a.calc_fdes(&rans).unwrap();
    b.calc_fdes(&rans).unwrap();
    assert_eq!(Arc::strong_count(&filter), 1);
    assert!(a.alpha().bitwise_eq(b.alpha()));
}

#[test]
fn test_dropped_provider_is_fatal() {
    let filter = uniform_filter(2, 0.1, 1.0);
    let rans = uniform_rans(2);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();
    model.calc_fdes(&rans).unwrap();
    let before = snapshot(&model);

    drop(filter);
    let err = model.calc_fdes(&rans).unwrap_err();
    assert!(matches!(err, WaError::ProviderUnavailable { .. }));
    assert!(err.is_fatal());
    assert!(all_bitwise_eq(&before, &snapshot(&model)));
    assert!(model.hybrid_length_scale(&rans).is_err());
}

#[test]
fn test_zero_hmax_is_degenerate_geometry() {
    let filter: Arc<dyn FilterWidthProvider> = Arc::new(
        PrescribedFilterWidth::new(vec![0.1, 0.1], vec![1.0, 0.0], vec![0.1, 0.1]).unwrap(),
    );
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter).unwrap();

    match model.calc_fdes(&uniform_rans(2)) {
        Err(e @ WaError::DegenerateGeometry { .. }) => {
            assert!(e.is_fatal());
            if let WaError::DegenerateGeometry { cell, quantity, .. } = e {
                assert_eq!(cell, 1);
                assert_eq!(quantity, "hmax");
            }
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(model.evaluations(), 0);
    assert!(model.fdtilda().iter().all(|&v| v == 0.0));
    assert!(model.fdes().iter().all(|&v| v == 0.0));
}

/// 先写入垃圾值再失败的层
struct FailingLayer {
    armed: Arc<AtomicBool>,
}

impl BlendingLayer for FailingLayer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn apply(&self, _inputs: &LayerInputs<'_>, ctx: &mut BlendingContext) -> WaResult<()> {
        if self.armed.load(Ordering::SeqCst) {
            ctx.fdes.par_fill(-42.0);
            ctx.fd.par_fill(f64::NAN);
            return Err(WaError::invalid_input("injected"));
        }
        Ok(())
    }
}

#[test]
fn test_failed_layer_leaves_fields_untouched() {
    let filter = channel_provider(8, 1.0);
    let rans = channel_rans(&channel_cells(8, 1.0), 1.0, 1000.0);
    let armed = Arc::new(AtomicBool::new(false));
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter)
        .unwrap()
        .with_layers(vec![
            Box::new(Wa2017Des),
            Box::new(Wa2017Ddes),
            Box::new(FailingLayer {
                armed: Arc::clone(&armed),
            }),
        ]);

    model.calc_fdes(&rans).unwrap();
    let before = snapshot(&model);

    armed.store(true, Ordering::SeqCst);
    assert!(model.calc_fdes(&rans).is_err());
    assert!(all_bitwise_eq(&before, &snapshot(&model)));
    assert_eq!(model.evaluations(), 1);

    // 恢复后可以继续求值，且不受失败求值残留影响
    armed.store(false, Ordering::SeqCst);
    model.calc_fdes(&rans).unwrap();
    assert!(all_bitwise_eq(&before, &snapshot(&model)));
}

#[test]
fn test_prescribed_baseline_chain() {
    let filter = uniform_filter(2, 0.0, 1.0);
    let mut model = Wa2017Iddes::new(&TurbulenceProperties::default(), &filter)
        .unwrap()
        .with_layers(vec![
            Box::new(PrescribedDes::new(0.65, vec![2.0, 3.0])),
            Box::new(PrescribedDelay::new(vec![0.5, 0.5]).unwrap()),
        ]);
    model.calc_fdes(&uniform_rans(2)).unwrap();
    assert_eq!(model.c_des(), 0.65);
    // IDDES 覆盖了基线
    assert_eq!(model.fdes().as_slice(), &[1.0, 1.0]);
}
