// crates/wa_config/src/coeffs.rs

//! WA2017 IDDES 模型系数
//!
//! 系数字典的键名与求解器字典保持一致：
//!
//! | 键 | 默认值 | 说明 |
//! |----|--------|------|
//! | kappa | 0.41 | von Kármán 常数 |
//! | Cw | 8.54 | WA 壁面系数 |
//! | C1ke | 0.1127 | k-ε 分支产生系数 |
//! | C1kw | 0.0829 | k-ω 分支产生系数 |
//! | sigmake | 1.0 | k-ε 分支扩散系数 |
//! | sigmakw | 0.72 | k-ω 分支扩散系数 |
//! | C2ke | C1ke/κ² + sigmake | 缺省时由其他系数导出 |
//! | C2kw | C1kw/κ² + sigmakw | 缺省时由其他系数导出 |
//! | CDES | 0.41 | DES 标定常数 |
//! | Cd1 | 4.0 | DDES 延迟函数系数 |
//! | fwStar | 0.424 | 低雷诺数修正参考值 |
//! | cl | 3.55 | 层流关联系数 |
//! | ct | 1.63 | 湍流关联系数 |
//!
//! 缺省键取默认值；键存在但数值非法（非有限或非正）时返回错误，
//! 绝不静默替换为默认值。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// 系数字典（原始输入形式，所有键可选）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoeffsDict {
    /// von Kármán 常数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kappa: Option<f64>,
    /// WA 壁面系数
    #[serde(rename = "Cw", default, skip_serializing_if = "Option::is_none")]
    pub cw: Option<f64>,
    /// k-ε 分支产生系数
    #[serde(rename = "C1ke", default, skip_serializing_if = "Option::is_none")]
    pub c1ke: Option<f64>,
    /// k-ω 分支产生系数
    #[serde(rename = "C1kw", default, skip_serializing_if = "Option::is_none")]
    pub c1kw: Option<f64>,
    /// k-ε 分支扩散系数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigmake: Option<f64>,
    /// k-ω 分支扩散系数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigmakw: Option<f64>,
    /// k-ε 分支耗散系数
    #[serde(rename = "C2ke", default, skip_serializing_if = "Option::is_none")]
    pub c2ke: Option<f64>,
    /// k-ω 分支耗散系数
    #[serde(rename = "C2kw", default, skip_serializing_if = "Option::is_none")]
    pub c2kw: Option<f64>,
    /// DES 标定常数
    #[serde(rename = "CDES", default, skip_serializing_if = "Option::is_none")]
    pub c_des: Option<f64>,
    /// DDES 延迟函数系数
    #[serde(rename = "Cd1", default, skip_serializing_if = "Option::is_none")]
    pub cd1: Option<f64>,
    /// 低雷诺数修正参考值
    #[serde(rename = "fwStar", default, skip_serializing_if = "Option::is_none")]
    pub fw_star: Option<f64>,
    /// 层流关联系数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cl: Option<f64>,
    /// 湍流关联系数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct: Option<f64>,
    /// 未识别的键（仅告警）
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

/// 已解析、已验证的 WA2017 IDDES 系数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wa2017IddesCoeffs {
    /// von Kármán 常数
    pub kappa: f64,
    /// WA 壁面系数
    pub cw: f64,
    /// k-ε 分支产生系数
    pub c1ke: f64,
    /// k-ω 分支产生系数
    pub c1kw: f64,
    /// k-ε 分支扩散系数
    pub sigmake: f64,
    /// k-ω 分支扩散系数
    pub sigmakw: f64,
    /// k-ε 分支耗散系数
    pub c2ke: f64,
    /// k-ω 分支耗散系数
    pub c2kw: f64,
    /// DES 标定常数
    pub c_des: f64,
    /// DDES 延迟函数系数
    pub cd1: f64,
    /// 低雷诺数修正参考值
    pub fw_star: f64,
    /// 层流关联系数
    pub cl: f64,
    /// 湍流关联系数
    pub ct: f64,
}

const DEFAULT_KAPPA: f64 = 0.41;
const DEFAULT_CW: f64 = 8.54;
const DEFAULT_C1KE: f64 = 0.1127;
const DEFAULT_C1KW: f64 = 0.0829;
const DEFAULT_SIGMAKE: f64 = 1.0;
const DEFAULT_SIGMAKW: f64 = 0.72;
const DEFAULT_CDES: f64 = 0.41;
const DEFAULT_CD1: f64 = 4.0;
const DEFAULT_FW_STAR: f64 = 0.424;
const DEFAULT_CL: f64 = 3.55;
const DEFAULT_CT: f64 = 1.63;

impl Default for Wa2017IddesCoeffs {
    fn default() -> Self {
        let kappa = DEFAULT_KAPPA;
        Self {
            kappa,
            cw: DEFAULT_CW,
            c1ke: DEFAULT_C1KE,
            c1kw: DEFAULT_C1KW,
            sigmake: DEFAULT_SIGMAKE,
            sigmakw: DEFAULT_SIGMAKW,
            c2ke: DEFAULT_C1KE / (kappa * kappa) + DEFAULT_SIGMAKE,
            c2kw: DEFAULT_C1KW / (kappa * kappa) + DEFAULT_SIGMAKW,
            c_des: DEFAULT_CDES,
            cd1: DEFAULT_CD1,
            fw_star: DEFAULT_FW_STAR,
            cl: DEFAULT_CL,
            ct: DEFAULT_CT,
        }
    }
}

impl Wa2017IddesCoeffs {
    /// 从字典解析：缺省键取默认值，`C2ke`/`C2kw` 缺省时由解析后的系数导出
    pub fn from_dict(dict: &CoeffsDict) -> Result<Self, ConfigError> {
        for key in dict.unknown.keys() {
            log::warn!("忽略未识别的系数键 '{}'", key);
        }

        let kappa = dict.kappa.unwrap_or(DEFAULT_KAPPA);
        let c1ke = dict.c1ke.unwrap_or(DEFAULT_C1KE);
        let c1kw = dict.c1kw.unwrap_or(DEFAULT_C1KW);
        let sigmake = dict.sigmake.unwrap_or(DEFAULT_SIGMAKE);
        let sigmakw = dict.sigmakw.unwrap_or(DEFAULT_SIGMAKW);

        // 先验证导出 C2 所需的系数，避免用非法 kappa 做除法
        check_positive("kappa", kappa)?;
        check_positive("C1ke", c1ke)?;
        check_positive("C1kw", c1kw)?;
        check_positive("sigmake", sigmake)?;
        check_positive("sigmakw", sigmakw)?;

        let coeffs = Self {
            kappa,
            cw: dict.cw.unwrap_or(DEFAULT_CW),
            c1ke,
            c1kw,
            sigmake,
            sigmakw,
            c2ke: dict
                .c2ke
                .unwrap_or_else(|| c1ke / (kappa * kappa) + sigmake),
            c2kw: dict
                .c2kw
                .unwrap_or_else(|| c1kw / (kappa * kappa) + sigmakw),
            c_des: dict.c_des.unwrap_or(DEFAULT_CDES),
            cd1: dict.cd1.unwrap_or(DEFAULT_CD1),
            fw_star: dict.fw_star.unwrap_or(DEFAULT_FW_STAR),
            cl: dict.cl.unwrap_or(DEFAULT_CL),
            ct: dict.ct.unwrap_or(DEFAULT_CT),
        };

        coeffs.validate()?;
        Ok(coeffs)
    }

    /// 验证所有系数为有限正数
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in self.entries() {
            check_positive(key, value)?;
        }
        Ok(())
    }

    /// 按字典键名列出全部系数
    pub fn entries(&self) -> [(&'static str, f64); 13] {
        [
            ("kappa", self.kappa),
            ("Cw", self.cw),
            ("C1ke", self.c1ke),
            ("C1kw", self.c1kw),
            ("sigmake", self.sigmake),
            ("sigmakw", self.sigmakw),
            ("C2ke", self.c2ke),
            ("C2kw", self.c2kw),
            ("CDES", self.c_des),
            ("Cd1", self.cd1),
            ("fwStar", self.fw_star),
            ("cl", self.cl),
            ("ct", self.ct),
        ]
    }

    /// 转换为完整字典（所有键均显式给出）
    pub fn to_dict(&self) -> CoeffsDict {
        CoeffsDict {
            kappa: Some(self.kappa),
            cw: Some(self.cw),
            c1ke: Some(self.c1ke),
            c1kw: Some(self.c1kw),
            sigmake: Some(self.sigmake),
            sigmakw: Some(self.sigmakw),
            c2ke: Some(self.c2ke),
            c2kw: Some(self.c2kw),
            c_des: Some(self.c_des),
            cd1: Some(self.cd1),
            fw_star: Some(self.fw_star),
            cl: Some(self.cl),
            ct: Some(self.ct),
            unknown: BTreeMap::new(),
        }
    }
}

fn check_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid(key, value, "必须为有限值"));
    }
    if value <= 0.0 {
        return Err(ConfigError::invalid(key, value, "必须为正数"));
    }
    Ok(())
}
