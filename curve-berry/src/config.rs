//! 运行参数.
//!
//! 所有字段都有默认值 (见 [`crate::consts`]), 配置文件只需写出要覆盖的字段:
//!
//! ```toml
//! selection = "prefer_closed"
//!
//! [hist]
//! level = 55.0
//!
//! [mri_label]
//! radius = 7
//! ```

use crate::contour::{HistParams, MriLabelParams, MriSingleParams, Selection};

cfg_if::cfg_if! {
    if #[cfg(feature = "serde")] {
        use std::fs;
        use std::path::Path;

        use crate::Result;
    }
}

/// 一次运行用到的全部参数.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CurveMetricConfig {
    /// 代表轮廓选取策略.
    pub selection: Selection,

    /// 组织学切片参数.
    pub hist: HistParams,

    /// MRI 单组织模式参数.
    pub mri_single: MriSingleParams,

    /// MRI 带标签模式参数.
    pub mri_label: MriLabelParams,
}

#[cfg(feature = "serde")]
impl CurveMetricConfig {
    /// 从 TOML 文本解析.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// 从 TOML 文件读取.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&text)?;
        log::debug!("configuration loaded from {}: {cfg:?}", path.display());
        Ok(cfg)
    }
}
