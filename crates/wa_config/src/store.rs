// crates/wa_config/src/store.rs

//! 版本化系数存储
//!
//! 系数以不可变快照（`Arc<Wa2017IddesCoeffs>`）形式持有，
//! 重读时先完整解析并验证新系数，成功后整体替换快照并递增版本号。
//! 失败时旧快照保持不变。求值过程持有的快照不受并发重读影响。

use std::sync::Arc;

use crate::coeffs::Wa2017IddesCoeffs;
use crate::error::ConfigError;
use crate::properties::TurbulenceProperties;

/// 重读结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// 系数已更新
    Updated {
        /// 新版本号
        version: u64,
    },
    /// 系数未变化
    Unchanged,
}

impl ReloadOutcome {
    /// 是否发生了更新
    pub fn changed(self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// 版本化系数存储
#[derive(Debug, Clone)]
pub struct CoeffStore {
    current: Arc<Wa2017IddesCoeffs>,
    version: u64,
}

impl Default for CoeffStore {
    fn default() -> Self {
        Self::new(Wa2017IddesCoeffs::default())
    }
}

impl CoeffStore {
    /// 以给定系数创建（版本 0）
    pub fn new(coeffs: Wa2017IddesCoeffs) -> Self {
        Self {
            current: Arc::new(coeffs),
            version: 0,
        }
    }

    /// 从属性文件创建，非法输入直接返回错误
    pub fn from_properties(props: &TurbulenceProperties) -> Result<Self, ConfigError> {
        Ok(Self::new(props.coefficients()?))
    }

    /// 当前系数
    #[inline]
    pub fn get(&self) -> &Wa2017IddesCoeffs {
        &self.current
    }

    /// 当前系数快照
    pub fn snapshot(&self) -> Arc<Wa2017IddesCoeffs> {
        Arc::clone(&self.current)
    }

    /// 当前版本号
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// 用已验证的系数替换
    pub fn replace(&mut self, coeffs: Wa2017IddesCoeffs) -> Result<ReloadOutcome, ConfigError> {
        coeffs.validate()?;
        if coeffs == *self.current {
            return Ok(ReloadOutcome::Unchanged);
        }
        self.current = Arc::new(coeffs);
        self.version += 1;
        Ok(ReloadOutcome::Updated {
            version: self.version,
        })
    }

    /// 从属性文件重读
    ///
    /// 解析或验证失败时返回错误，当前系数与版本号保持不变。
    pub fn reload(&mut self, props: &TurbulenceProperties) -> Result<ReloadOutcome, ConfigError> {
        let coeffs = match props.coefficients() {
            Ok(c) => c,
            Err(e) => {
                log::warn!("系数重读被拒绝，保留版本 {} 的系数: {}", self.version, e);
                return Err(e);
            }
        };

        let outcome = self.replace(coeffs)?;
        match outcome {
            ReloadOutcome::Updated { version } => {
                log::info!("系数已更新至版本 {}", version);
            }
            ReloadOutcome::Unchanged => {
                log::debug!("系数未变化（版本 {}）", self.version);
            }
        }
        Ok(outcome)
    }
}
