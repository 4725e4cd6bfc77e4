// crates/wa_foundation/src/validation.rs

//! 运行时验证工具
//!
//! 提供验证报告和错误/警告类型，用于检查标量场的有界性不变量。
//!
//! # 示例
//!
//! ```
//! use wa_foundation::validation::ValidationReport;
//!
//! let fe = [0.0, 0.3, -0.1];
//! let mut report = ValidationReport::new();
//! report.check_range("fe", &fe, 0.0, f64::MAX);
//!
//! assert!(report.has_errors());
//! assert_eq!(report.error_count(), 1);
//! ```

use std::fmt;

/// 单个字段最多记录的错误条目数，其余仅计数
pub const MAX_ERRORS_PER_FIELD: usize = 8;

/// 验证报告
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// 错误列表
    pub errors: Vec<ValidationError>,
    /// 警告列表
    pub warnings: Vec<ValidationWarning>,
    /// 超出记录上限而未保存的错误数
    pub suppressed: usize,
}

impl ValidationReport {
    /// 创建空的验证报告
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加错误
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 是否有警告
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 错误数量（含被抑制的条目）
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.suppressed
    }

    /// 警告数量
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// 是否通过（无错误）
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// 检查字段所有值是否有限且位于 `[min, max]`
    ///
    /// 每个字段最多记录 [`MAX_ERRORS_PER_FIELD`] 条错误。
    pub fn check_range(&mut self, field: &'static str, values: &[f64], min: f64, max: f64) {
        let mut recorded = 0;
        for (cell_id, &value) in values.iter().enumerate() {
            let error = if !value.is_finite() {
                ValidationError::NonFinite {
                    field,
                    cell_id,
                    value,
                }
            } else if value < min || value > max {
                ValidationError::OutOfRange {
                    field,
                    cell_id,
                    value,
                    min,
                    max,
                }
            } else {
                continue;
            };

            if recorded < MAX_ERRORS_PER_FIELD {
                self.errors.push(error);
                recorded += 1;
            } else {
                self.suppressed += 1;
            }
        }
    }

    /// 检查字段所有值是否有限
    pub fn check_finite(&mut self, field: &'static str, values: &[f64]) {
        self.check_range(field, values, f64::NEG_INFINITY, f64::INFINITY);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "验证报告:")?;
        writeln!(f, "  错误: {} 个", self.error_count())?;
        writeln!(f, "  警告: {} 个", self.warning_count())?;

        if self.has_errors() {
            writeln!(f, "\n错误详情:")?;
            for (i, err) in self.errors.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, err)?;
            }
            if self.suppressed > 0 {
                writeln!(f, "  ... 另有 {} 个错误未列出", self.suppressed)?;
            }
        }

        if self.has_warnings() {
            writeln!(f, "\n警告详情:")?;
            for (i, warn) in self.warnings.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, warn)?;
            }
        }

        Ok(())
    }
}

/// 验证错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 非有限值
    NonFinite {
        /// 字段名称
        field: &'static str,
        /// 所在单元 ID
        cell_id: usize,
        /// 非有限的数值
        value: f64,
    },
    /// 数据超出范围
    OutOfRange {
        /// 字段名称
        field: &'static str,
        /// 所在单元 ID
        cell_id: usize,
        /// 实际值
        value: f64,
        /// 下界
        min: f64,
        /// 上界
        max: f64,
    },
    /// 自定义错误
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite {
                field,
                cell_id,
                value,
            } => {
                write!(f, "单元{}: 字段{}={} (非有限值)", cell_id, field, value)
            }
            Self::OutOfRange {
                field,
                cell_id,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "单元{}: 字段{}={} 超出范围[{}, {}]",
                    cell_id, field, value, min, max
                )
            }
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// 验证警告类型
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// 自定义警告
    Custom {
        /// 自定义消息
        message: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { message } => write!(f, "{}", message),
        }
    }
}
