// crates/wa_config/src/properties.rs

//! 湍流属性文件
//!
//! 顶层文档结构：
//!
//! ```json
//! {
//!   "model": "WA2017IDDES",
//!   "printCoeffs": true,
//!   "coeffs": { "ct": 1.63, "cl": 3.55 },
//!   "delta": { "type": "maxDeltaxyz", "deltaCoeff": 2.0 }
//! }
//! ```
//!
//! 按扩展名选择格式：`.json` 使用 JSON，`.yaml`/`.yml` 使用 YAML。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::coeffs::{CoeffsDict, Wa2017IddesCoeffs};
use crate::delta::{DeltaDict, DeltaSettings};
use crate::error::ConfigError;

/// 本模型在属性文件中的名称
pub const MODEL_NAME: &str = "WA2017IDDES";

/// 湍流属性（原始输入形式）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurbulenceProperties {
    /// 模型名，缺省视为本模型
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// 构造时是否打印系数
    #[serde(rename = "printCoeffs", default)]
    pub print_coeffs: bool,
    /// 系数字典
    #[serde(default)]
    pub coeffs: CoeffsDict,
    /// 滤波宽度配置
    #[serde(default)]
    pub delta: DeltaDict,
}

/// 解析并验证后的属性
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProperties {
    /// 模型系数
    pub coeffs: Wa2017IddesCoeffs,
    /// 滤波宽度设置
    pub delta: DeltaSettings,
    /// 是否打印系数
    pub print_coeffs: bool,
}

impl TurbulenceProperties {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 从文件加载（按扩展名选择格式）
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content = std::fs::read_to_string(path)?;
        match ext.as_str() {
            "json" => Self::from_json(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 检查模型名
    pub fn check_model(&self) -> Result<(), ConfigError> {
        match &self.model {
            Some(name) if name != MODEL_NAME => Err(ConfigError::ModelMismatch {
                expected: MODEL_NAME.to_string(),
                actual: name.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// 解析模型系数
    pub fn coefficients(&self) -> Result<Wa2017IddesCoeffs, ConfigError> {
        self.check_model()?;
        Wa2017IddesCoeffs::from_dict(&self.coeffs)
    }

    /// 解析滤波宽度设置
    pub fn delta_settings(&self) -> Result<DeltaSettings, ConfigError> {
        DeltaSettings::from_dict(&self.delta)
    }

    /// 解析并验证全部属性
    pub fn resolve(&self) -> Result<ResolvedProperties, ConfigError> {
        Ok(ResolvedProperties {
            coeffs: self.coefficients()?,
            delta: self.delta_settings()?,
            print_coeffs: self.print_coeffs,
        })
    }
}
