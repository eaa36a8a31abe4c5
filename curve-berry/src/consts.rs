//! 通用常量.
//!
//! 这里的值都只是默认值, 运行时由 [`crate::config::CurveMetricConfig`] 显式传入各提取器.

/// 组织学切片.
pub mod hist {
    /// 组织前景的强度下限 (严格大于该值才算前景).
    pub const TISSUE_THRESHOLD: f32 = 20.0;

    /// 前景掩膜的腐蚀半径, 用于去掉细小的伪区域.
    pub const EROSION_RADIUS: usize = 2;

    /// 等值线强度.
    pub const CONTOUR_LEVEL: f32 = 60.0;
}

/// MRI 切片, 单组织模式.
pub mod mri_single {
    /// 众数统计区间下限 (不含).
    pub const BAND_LOW: f32 = 0.0;

    /// 众数统计区间上限 (不含).
    pub const BAND_HIGH: f32 = 5.0;

    /// 强度严格小于该值的像素构成掩膜.
    pub const MASK_BELOW: f32 = 4.5;

    /// 掩膜腐蚀半径.
    pub const EROSION_RADIUS: usize = 5;
}

/// MRI 切片, 带标签模式.
pub mod mri_label {
    /// 标签众数统计区间下限 (含).
    pub const BAND_LOW: f32 = 0.5;

    /// 标签众数统计区间上限 (含).
    pub const BAND_HIGH: f32 = 4.5;

    /// 膨胀 / 腐蚀半径.
    pub const RADIUS: usize = 9;

    /// 参考标签. 边界位于当前标签与参考标签之间.
    pub const REFERENCE_LABEL: i64 = 6;

    /// 排除标签. 其邻域内的等值线不予考虑.
    pub const EXCLUSION_LABEL: i64 = 5;
}

/// 可视化颜色.
pub mod color {
    /// 被修剪掉的线段.
    pub const TRIMMED: &str = "yellow";

    /// 保留的 MRI 曲线线段.
    pub const KEPT_MRI: &str = "orange";

    /// 保留的组织学曲线线段.
    pub const KEPT_HIST: &str = "red";
}

/// BDE 的高分位数 (hd95).
pub const HD_QUANTILE: f64 = 0.95;
