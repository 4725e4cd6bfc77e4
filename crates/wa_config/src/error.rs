// crates/wa_config/src/error.rs

//! 配置层错误类型

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 不支持的文件格式
    #[error("不支持的配置文件格式: {0}（支持 .json / .yaml / .yml）")]
    UnsupportedFormat(String),

    /// 模型类型不匹配
    #[error("模型类型不匹配: 期望 {expected}, 实际 {actual}")]
    ModelMismatch {
        /// 期望的模型名
        expected: String,
        /// 配置中的模型名
        actual: String,
    },
}

impl ConfigError {
    /// 构造无效值错误
    pub fn invalid(key: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for wa_foundation::WaError {
    fn from(err: ConfigError) -> Self {
        wa_foundation::WaError::config(err.to_string())
    }
}
