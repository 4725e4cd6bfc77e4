// crates/wa_physics/src/parallel.rs

//! 逐单元并行求值
//!
//! 混合函数的每个阶段都是无单元间依赖的逐单元运算，
//! 可以按任意顺序或并行求值。小规模网格串行执行以避免调度开销。
//!
//! 阶段之间的顺序由调用方保证：同一单元的第 N 阶段
//! 总是读取本次求值中第 N−1 阶段刚写入的结果。

use rayon::prelude::*;

/// 默认最小并行单元数（低于此值串行执行）
pub const DEFAULT_MIN_PARALLEL_SIZE: usize = 4096;

/// 求值策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalStrategy {
    /// 串行执行
    Sequential,
    /// 始终并行
    Parallel,
    /// 根据单元数自动选择
    #[default]
    Auto,
}

/// 求值配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// 求值策略
    pub strategy: EvalStrategy,
    /// 最小并行单元数（仅 `Auto` 使用）
    pub min_parallel_size: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            strategy: EvalStrategy::Auto,
            min_parallel_size: DEFAULT_MIN_PARALLEL_SIZE,
        }
    }
}

impl EvalConfig {
    /// 串行配置
    pub fn sequential() -> Self {
        Self {
            strategy: EvalStrategy::Sequential,
            ..Default::default()
        }
    }

    /// 并行配置
    pub fn parallel() -> Self {
        Self {
            strategy: EvalStrategy::Parallel,
            ..Default::default()
        }
    }

    /// 对给定单元数是否使用并行
    #[inline]
    pub fn use_parallel(&self, n_cells: usize) -> bool {
        match self.strategy {
            EvalStrategy::Sequential => false,
            EvalStrategy::Parallel => true,
            EvalStrategy::Auto => n_cells >= self.min_parallel_size,
        }
    }

    /// 逐单元填充输出：`out[i] = f(i)`
    pub fn fill_cells<F>(&self, out: &mut [f64], f: F)
    where
        F: Fn(usize) -> f64 + Sync + Send,
    {
        if self.use_parallel(out.len()) {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, v)| *v = f(i));
        } else {
            for (i, v) in out.iter_mut().enumerate() {
                *v = f(i);
            }
        }
    }

    /// 查找第一个不满足谓词的单元
    pub fn find_cell<F>(&self, n_cells: usize, pred: F) -> Option<usize>
    where
        F: Fn(usize) -> bool + Sync + Send,
    {
        if self.use_parallel(n_cells) {
            (0..n_cells).into_par_iter().find_first(|&i| pred(i))
        } else {
            (0..n_cells).find(|&i| pred(i))
        }
    }
}
