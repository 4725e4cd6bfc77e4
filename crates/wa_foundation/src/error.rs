// crates/wa_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `WaError` 枚举和 `WaResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，配置解析错误在 `wa_config` 中定义
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **可追溯**: 支持错误链
//!
//! # 示例
//!
//! ```
//! use wa_foundation::error::{WaError, WaResult};
//!
//! fn check_width(h_max: f64) -> WaResult<()> {
//!     if h_max <= 0.0 {
//!         return Err(WaError::degenerate_geometry(0, "h_max", h_max));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_width(-1.0).is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type WaResult<T> = Result<T, WaError>;

/// 湍流混合引擎错误类型
#[derive(Error, Debug)]
pub enum WaError {
    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 数据超出范围
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 退化几何（滤波宽度或单元尺度非正）
    ///
    /// 属于上游提供者的契约违背，不可重试。
    #[error("退化几何: 单元 {cell} 的 {quantity}={value} 必须为有限正数")]
    DegenerateGeometry {
        /// 单元编号
        cell: usize,
        /// 物理量名称
        quantity: &'static str,
        /// 实际值
        value: f64,
    },

    /// 外部提供者不可用（非拥有引用已失效）
    #[error("外部提供者不可用: {provider}")]
    ProviderUnavailable {
        /// 提供者名称
        provider: &'static str,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 验证失败
    #[error("验证失败: {0}")]
    Validation(String),
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl WaError {
    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 数据超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 退化几何
    pub fn degenerate_geometry(cell: usize, quantity: &'static str, value: f64) -> Self {
        Self::DegenerateGeometry {
            cell,
            quantity,
            value,
        }
    }

    /// 提供者不可用
    pub fn provider_unavailable(provider: &'static str) -> Self {
        Self::ProviderUnavailable { provider }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 是否为致命错误（上游契约违背）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DegenerateGeometry { .. } | Self::ProviderUnavailable { .. }
        )
    }
}

/// 检查数组长度，不匹配时返回 `SizeMismatch`
#[inline]
pub fn ensure_len(name: &'static str, expected: usize, actual: usize) -> WaResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(WaError::size_mismatch(name, expected, actual))
    }
}
