// crates/wa_foundation/src/field.rs

//! 单元标量场
//!
//! `ScalarField` 是定义在网格单元上的具名标量场，
//! 提供逐单元运算、并行迭代、统计量和 Serde 支持。
//! 混合函数引擎的全部中间量（`alpha`、`ft`、`fl`、`fe`、`fdtilda`）都用它存储。

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use crate::error::{ensure_len, WaResult};

/// 单元标量场
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    name: String,
    values: Vec<f64>,
}

/// 标量场统计量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// 算术平均
    pub mean: f64,
}

impl ScalarField {
    /// 创建全零场
    pub fn zeros(name: impl Into<String>, n_cells: usize) -> Self {
        Self::uniform(name, n_cells, 0.0)
    }

    /// 创建均匀场
    pub fn uniform(name: impl Into<String>, n_cells: usize, value: f64) -> Self {
        Self {
            name: name.into(),
            values: vec![value; n_cells],
        }
    }

    /// 从已有数据创建
    pub fn from_vec(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// 字段名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 只读切片
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// 单元值（越界返回 `None`）
    #[inline]
    pub fn get(&self, cell: usize) -> Option<f64> {
        self.values.get(cell).copied()
    }

    /// 并行填充
    pub fn par_fill(&mut self, value: f64) {
        self.values.par_iter_mut().for_each(|v| *v = value);
    }

    /// 从切片复制，长度必须一致
    pub fn copy_from(&mut self, source: &[f64]) -> WaResult<()> {
        ensure_len("ScalarField::copy_from", self.values.len(), source.len())?;
        self.values.copy_from_slice(source);
        Ok(())
    }

    /// 逐单元原地变换
    pub fn map_inplace(&mut self, f: impl Fn(f64) -> f64 + Sync + Send) {
        self.values.par_iter_mut().for_each(|v| *v = f(*v));
    }

    /// 将所有值截断到 `[lo, hi]`
    pub fn clamp_inplace(&mut self, lo: f64, hi: f64) {
        self.map_inplace(|v| v.clamp(lo, hi));
    }

    /// 最小值（空场返回 `None`）
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    /// 最大值（空场返回 `None`）
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// 统计量（空场返回 `None`）
    pub fn stats(&self) -> Option<FieldStats> {
        let min = self.min()?;
        let max = self.max()?;
        let mean = self.values.iter().sum::<f64>() / self.values.len() as f64;
        Some(FieldStats { min, max, mean })
    }

    /// 所有值是否有限
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// 与另一场逐位相等（区分 `0.0` 与 `-0.0`，NaN 视为相等）
    pub fn bitwise_eq(&self, other: &ScalarField) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Deref for ScalarField {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl DerefMut for ScalarField {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_and_uniform() {
        let f = ScalarField::zeros("fe", 4);
        assert_eq!(f.len(), 4);
        assert_eq!(f.name(), "fe");
        assert!(f.iter().all(|&v| v == 0.0));

        let g = ScalarField::uniform("fd", 3, 0.5);
        assert!((g[2] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_copy_from_checks_length() {
        let mut f = ScalarField::zeros("alpha", 3);
        assert!(f.copy_from(&[1.0, 2.0, 3.0]).is_ok());
        assert_eq!(f.as_slice(), &[1.0, 2.0, 3.0]);
        assert!(f.copy_from(&[1.0]).is_err());
        assert_eq!(f.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_clamp_and_stats() {
        let mut f = ScalarField::from_vec("fdtilda", vec![-0.5, 0.25, 1.5, 0.75]);
        f.clamp_inplace(0.0, 1.0);
        let stats = f.stats().unwrap();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert!((stats.mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_stats() {
        let f = ScalarField::zeros("ft", 0);
        assert!(f.stats().is_none());
        assert!(f.min().is_none());
    }

    #[test]
    fn test_bitwise_eq() {
        let a = ScalarField::from_vec("a", vec![0.0, 1.0]);
        let b = ScalarField::from_vec("b", vec![-0.0, 1.0]);
        assert!(a.bitwise_eq(&a.clone()));
        assert!(!a.bitwise_eq(&b));
    }

    #[test]
    fn test_serde_roundtrip_keeps_name() {
        let f = ScalarField::from_vec("fl", vec![0.1, 0.2]);
        let json = serde_json::to_string(&f).unwrap();
        let back: ScalarField = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name(), "fl");
        assert_eq!(back, f);
    }
}
