//! 组织学切片与 MRI 切片的组织掩膜、等值线强度与代表轮廓.
//!
//! 所有阈值都来自参数结构, 默认值见 [`crate::consts`].

use ndarray::ArrayView2;

use super::{find_contours, Contour, ContourSelect};
use crate::consts::{hist, mri_label, mri_single};
use crate::{morph, stats, Error, Mask, Modality, Result, Volume};

/// 从 `contours` 中选出代表轮廓. 没有任何轮廓时返回 `Err(Error::NoContour)`.
fn representative<S: ContourSelect + ?Sized>(
    mut contours: Vec<Contour>,
    select: &S,
    modality: Modality,
) -> Result<Contour> {
    let count = contours.len();
    let idx = select
        .select_representative(&contours)
        .ok_or(Error::NoContour { modality, count })?;
    log::debug!(
        "{modality}: {count} contour(s), representative #{idx} with {} points",
        contours[idx].len()
    );
    Ok(contours.swap_remove(idx))
}

/// 组织学切片的提取参数.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HistParams {
    /// 强度严格大于该值的像素为组织.
    pub threshold: f32,

    /// 组织掩膜的腐蚀半径.
    pub erosion_radius: usize,

    /// 等值线强度.
    pub level: f32,
}

impl Default for HistParams {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl HistParams {
    /// 默认参数: 阈值 20, 腐蚀半径 2, 等值线强度 60.
    #[inline]
    pub const fn new() -> Self {
        Self {
            threshold: hist::TISSUE_THRESHOLD,
            erosion_radius: hist::EROSION_RADIUS,
            level: hist::CONTOUR_LEVEL,
        }
    }

    /// 组织掩膜: 阈值化后腐蚀, 去掉细小的伪区域.
    pub fn tissue_mask(&self, img: ArrayView2<f32>) -> Mask {
        let fg = img.mapv(|v| v > self.threshold);
        morph::erode(fg.view(), self.erosion_radius)
    }

    /// 提取组织学切片的代表轮廓 (像素空间).
    pub fn extract<S: ContourSelect + ?Sized>(&self, vol: &Volume, select: &S) -> Result<Contour> {
        let mask = self.tissue_mask(vol.data());
        let contours = find_contours(vol.data(), self.level, Some(mask.view()));
        representative(contours, select, Modality::Histology)
    }
}

/// MRI 切片单组织模式的提取参数.
///
/// 截断强度取自开区间 `(band_low, band_high)` 内强度的众数, 等值线强度为其一半.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MriSingleParams {
    /// 众数统计区间下限 (不含).
    pub band_low: f32,

    /// 众数统计区间上限 (不含).
    pub band_high: f32,

    /// 强度严格小于该值的像素构成掩膜.
    pub mask_below: f32,

    /// 掩膜腐蚀半径.
    pub erosion_radius: usize,
}

impl Default for MriSingleParams {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MriSingleParams {
    /// 默认参数: 区间 (0, 5), 掩膜 `< 4.5`, 腐蚀半径 5.
    #[inline]
    pub const fn new() -> Self {
        Self {
            band_low: mri_single::BAND_LOW,
            band_high: mri_single::BAND_HIGH,
            mask_below: mri_single::MASK_BELOW,
            erosion_radius: mri_single::EROSION_RADIUS,
        }
    }

    /// 截断强度: 区间内强度的众数.
    pub fn cutoff(&self, img: ArrayView2<f32>) -> Result<f32> {
        let (lo, hi) = (self.band_low, self.band_high);
        stats::mode(img.iter().copied().filter(|&v| lo < v && v < hi)).ok_or(
            Error::EmptyIntensityBand {
                modality: Modality::Mri,
                low: lo,
                high: hi,
            },
        )
    }

    /// 组织掩膜.
    pub fn tissue_mask(&self, img: ArrayView2<f32>) -> Mask {
        let below = img.mapv(|v| v < self.mask_below);
        morph::erode(below.view(), self.erosion_radius)
    }

    /// 提取 MRI 切片的代表轮廓, 同时返回截断强度.
    pub fn extract<S: ContourSelect + ?Sized>(
        &self,
        vol: &Volume,
        select: &S,
    ) -> Result<(Contour, f32)> {
        let cutoff = self.cutoff(vol.data())?;
        log::info!("MRI cutoff intensity: {cutoff}");
        let mask = self.tissue_mask(vol.data());
        let contours = find_contours(vol.data(), cutoff / 2.0, Some(mask.view()));
        Ok((representative(contours, select, Modality::Mri)?, cutoff))
    }
}

/// MRI 切片带标签模式的提取参数.
///
/// 当前切片的解剖标签取自闭区间 `[band_low, band_high]` 内强度的众数 (四舍五入),
/// 边界取在该标签与参考标签之间, 排除标签附近的部分不予考虑.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MriLabelParams {
    /// 标签众数统计区间下限 (含).
    pub band_low: f32,

    /// 标签众数统计区间上限 (含).
    pub band_high: f32,

    /// 膨胀 / 腐蚀半径.
    pub radius: usize,

    /// 参考标签.
    pub reference_label: i64,

    /// 排除标签.
    pub exclusion_label: i64,
}

impl Default for MriLabelParams {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MriLabelParams {
    /// 默认参数: 区间 \[0.5, 4.5\], 半径 9, 参考标签 6, 排除标签 5.
    #[inline]
    pub const fn new() -> Self {
        Self {
            band_low: mri_label::BAND_LOW,
            band_high: mri_label::BAND_HIGH,
            radius: mri_label::RADIUS,
            reference_label: mri_label::REFERENCE_LABEL,
            exclusion_label: mri_label::EXCLUSION_LABEL,
        }
    }

    /// 检测当前切片的解剖标签.
    pub fn detect_label(&self, img: ArrayView2<f32>) -> Result<i64> {
        let (lo, hi) = (self.band_low, self.band_high);
        let m = stats::mode(img.iter().copied().filter(|&v| lo <= v && v <= hi)).ok_or(
            Error::EmptyIntensityBand {
                modality: Modality::Mri,
                low: lo,
                high: hi,
            },
        )?;
        Ok(m.round() as i64)
    }

    /// 掩膜: `dilate(== label) ∧ dilate(== reference) ∧ erode(!= exclusion)`.
    pub fn tissue_mask(&self, img: ArrayView2<f32>, label: i64) -> Mask {
        let r = self.radius;
        let is = |target: i64| img.mapv(|v| v == target as f32);

        let mut mask = morph::dilate(is(label).view(), r);
        morph::intersect_with(&mut mask, morph::dilate(is(self.reference_label).view(), r).view());
        let kept = img.mapv(|v| v != self.exclusion_label as f32);
        morph::intersect_with(&mut mask, morph::erode(kept.view(), r).view());
        mask
    }

    /// 等值线强度: 标签与参考标签的中点.
    #[inline]
    pub fn level(&self, label: i64) -> f32 {
        (self.reference_label + label) as f32 / 2.0
    }

    /// 提取 MRI 切片的代表轮廓, 同时返回检测到的标签.
    pub fn extract<S: ContourSelect + ?Sized>(
        &self,
        vol: &Volume,
        select: &S,
    ) -> Result<(Contour, i64)> {
        let label = self.detect_label(vol.data())?;
        log::info!("MRI label: {label}");
        let mask = self.tissue_mask(vol.data(), label);
        let contours = find_contours(vol.data(), self.level(label), Some(mask.view()));
        Ok((representative(contours, select, Modality::Mri)?, label))
    }
}
