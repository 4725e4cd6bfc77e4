// crates/wa_config/src/delta.rs

//! 滤波宽度配置
//!
//! 选择 `h_max` 的聚合策略，以及 IDDES 滤波宽度的壁面系数：
//!
//! ```json
//! "delta": { "type": "maxDeltaxyz", "deltaCoeff": 2.0, "Cw": 0.15 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// `h_max` 聚合策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HmaxPolicy {
    /// 单元中心到各面距离的最大值乘以 `deltaCoeff`
    #[default]
    #[serde(rename = "maxDeltaxyz")]
    MaxDeltaxyz,
    /// 单元体积立方根乘以 `deltaCoeff`
    #[serde(rename = "cubeRootVol")]
    CubeRootVol,
}

impl HmaxPolicy {
    /// 策略的默认 `deltaCoeff`
    pub fn default_delta_coeff(self) -> f64 {
        match self {
            Self::MaxDeltaxyz => 2.0,
            Self::CubeRootVol => 1.0,
        }
    }

    /// 字典中的名称
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MaxDeltaxyz => "maxDeltaxyz",
            Self::CubeRootVol => "cubeRootVol",
        }
    }
}

/// 滤波宽度配置（原始输入形式）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaDict {
    /// 聚合策略
    #[serde(rename = "type", default)]
    pub policy: HmaxPolicy,
    /// 策略系数
    #[serde(rename = "deltaCoeff", default, skip_serializing_if = "Option::is_none")]
    pub delta_coeff: Option<f64>,
    /// IDDES 壁面系数
    #[serde(rename = "Cw", default, skip_serializing_if = "Option::is_none")]
    pub cw: Option<f64>,
}

/// 已验证的滤波宽度设置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaSettings {
    /// 聚合策略
    pub policy: HmaxPolicy,
    /// 策略系数
    pub delta_coeff: f64,
    /// IDDES 壁面系数
    pub cw: f64,
}

/// IDDES 壁面系数默认值
pub const DEFAULT_IDDES_CW: f64 = 0.15;

impl Default for DeltaSettings {
    fn default() -> Self {
        let policy = HmaxPolicy::default();
        Self {
            policy,
            delta_coeff: policy.default_delta_coeff(),
            cw: DEFAULT_IDDES_CW,
        }
    }
}

impl DeltaSettings {
    /// 从字典解析并验证
    pub fn from_dict(dict: &DeltaDict) -> Result<Self, ConfigError> {
        let settings = Self {
            policy: dict.policy,
            delta_coeff: dict
                .delta_coeff
                .unwrap_or_else(|| dict.policy.default_delta_coeff()),
            cw: dict.cw.unwrap_or(DEFAULT_IDDES_CW),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// 验证设置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delta_coeff.is_finite() || self.delta_coeff <= 0.0 {
            return Err(ConfigError::invalid(
                "delta.deltaCoeff",
                self.delta_coeff,
                "必须为有限正数",
            ));
        }
        if !self.cw.is_finite() || self.cw <= 0.0 || self.cw > 1.0 {
            return Err(ConfigError::invalid("delta.Cw", self.cw, "必须在 (0, 1] 范围内"));
        }
        Ok(())
    }
}
