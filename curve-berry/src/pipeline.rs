//! 完整流程: 提取 → 映射 → (修剪) → 测量.

use crate::config::CurveMetricConfig;
use crate::metric::{frechet, pairwise_distances, MetricRecord};
use crate::svg::TrimPlot;
use crate::trim::{trim_bounds, TrimBounds};
use crate::{Curve, Result, Volume};

/// MRI 边界的提取方式.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Variant {
    /// 单组织: 截断强度取区间内众数, 等值线在其一半处.
    SingleTissue,

    /// 带标签: 自动检测当前标签, 边界取在它与参考标签之间.
    LabelAware,
}

/// 一对物理坐标下的边界曲线.
#[derive(Clone, Debug, PartialEq)]
pub struct CurvePair {
    /// MRI 边界 (曲线 1).
    pub mri: Curve,

    /// 组织学边界 (曲线 2).
    pub hist: Curve,

    /// 检测到的 MRI 标签 (仅 [`Variant::LabelAware`]).
    pub label: Option<i64>,
}

impl CurvePair {
    /// 从两张切片中提取代表轮廓并映射到毫米坐标.
    ///
    /// 先处理组织学切片, 再处理 MRI 切片; 任何一步失败立即返回.
    pub fn extract(
        mri: &Volume,
        hist: &Volume,
        cfg: &CurveMetricConfig,
        variant: Variant,
    ) -> Result<Self> {
        let select = &cfg.selection;
        let xh = cfg.hist.extract(hist, select)?;
        let (xm, label) = match variant {
            Variant::SingleTissue => (cfg.mri_single.extract(mri, select)?.0, None),
            Variant::LabelAware => {
                let (c, label) = cfg.mri_label.extract(mri, select)?;
                (c, Some(label))
            }
        };
        log::debug!(
            "contours: {} MRI points, {} histology points",
            xm.len(),
            xh.len()
        );

        Ok(Self {
            mri: mri.affine().map_contour(&xm),
            hist: hist.affine().map_contour(&xh),
            label,
        })
    }

    /// 在完整曲线上计算全部指标.
    pub fn measure(&self) -> MetricRecord {
        let record = MetricRecord::compute(&self.mri, &self.hist);
        self.labelled(record)
    }

    /// 先修剪再计算 BDE 统计量. Fréchet 距离仍在完整曲线上计算.
    pub fn measure_trimmed(&self) -> (MetricRecord, TrimBounds) {
        let bounds = trim_bounds(pairwise_distances(&self.mri, &self.hist).view());
        let (ym, yh) = bounds.apply(&self.mri, &self.hist);
        let d = pairwise_distances(ym, yh);
        let record = MetricRecord::from_distances(d.view(), frechet(&self.mri, &self.hist));
        (self.labelled(record), bounds)
    }

    /// 修剪结果图. `shape` 为 MRI 切片的形状.
    #[inline]
    pub fn plot(&self, shape: (usize, usize), bounds: TrimBounds) -> TrimPlot<'_> {
        TrimPlot::new(shape, &self.mri, &self.hist, bounds)
    }

    fn labelled(&self, record: MetricRecord) -> MetricRecord {
        match self.label {
            Some(label) => record.with_label(label),
            None => record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Affine2d, Error, Modality};
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    /// 上半部分为 `top`, 下半部分为 `bottom` 的 20×20 切片.
    fn half_planes(top: f32, bottom: f32, affine: Affine2d) -> Volume {
        let data = Array2::from_shape_fn((20, 20), |(h, _)| if h < 10 { top } else { bottom });
        Volume::from_parts(data, affine)
    }

    /// 沿第一个物理轴平移 1 mm.
    fn shifted() -> Affine2d {
        Affine2d::from_scale_translation([1.0, 1.0], [1.0, 0.0])
    }

    #[test]
    fn test_single_tissue_offset() {
        let mri = half_planes(2.0, 0.0, Affine2d::identity());
        let hist = half_planes(90.0, 30.0, shifted());
        let cfg = CurveMetricConfig::default();

        let pair = CurvePair::extract(&mri, &hist, &cfg, Variant::SingleTissue).unwrap();
        assert_eq!(pair.label, None);
        assert_eq!(pair.mri.len(), 20);
        assert_eq!(pair.hist.len(), 20);
        assert!(pair.hist.iter().all(|&(x, _)| x == 10.5));

        let m = pair.measure();
        assert_eq!(m.label, None);
        assert_abs_diff_eq!(m.bde_hd, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(m.bde_median, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(m.frechet, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_square_ring_offset() {
        // 平行于平移方向的两条边上最近距离接近 0, 中位数因此小于 1.
        let square = |inside: f32, outside: f32, affine: Affine2d| {
            let data = Array2::from_shape_fn((40, 40), |(h, w)| {
                if (10..30).contains(&h) && (10..30).contains(&w) {
                    inside
                } else {
                    outside
                }
            });
            Volume::from_parts(data, affine)
        };
        let mri = square(2.0, 0.0, Affine2d::identity());
        let hist = square(90.0, 30.0, shifted());
        let cfg = CurveMetricConfig::default();

        let pair = CurvePair::extract(&mri, &hist, &cfg, Variant::SingleTissue).unwrap();
        let m = pair.measure();
        assert_abs_diff_eq!(m.bde_hd, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(m.frechet, 1.0, epsilon = 1e-3);
        assert!(m.bde_median < 0.9, "bde_median = {}", m.bde_median);
    }

    #[test]
    fn test_label_aware_trimmed() {
        let mri = half_planes(2.0, 6.0, Affine2d::identity());
        let hist = half_planes(30.0, 90.0, shifted());
        let cfg = CurveMetricConfig::default();

        let pair = CurvePair::extract(&mri, &hist, &cfg, Variant::LabelAware).unwrap();
        assert_eq!(pair.label, Some(2));

        let (m, b) = pair.measure_trimmed();
        // 两条等长平行线段的端点互为最近点, 各被剥掉一个.
        assert_eq!(
            b,
            TrimBounds {
                am: 1,
                bm: 18,
                ah: 1,
                bh: 18
            }
        );
        assert_eq!(b.trimmed_count(pair.mri.len(), pair.hist.len()), (2, 2));
        assert_eq!(m.label, Some(2));
        assert_abs_diff_eq!(m.bde_hd, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(m.bde_median, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(m.frechet, 1.0, epsilon = 1e-3);

        let mut buf = Vec::new();
        pair.plot(mri.shape(), b).write_to(&mut buf).unwrap();
        let doc = String::from_utf8(buf).unwrap();
        assert_eq!(doc.matches("<line ").count(), 38);
    }

    #[test]
    fn test_no_histology_contour() {
        let mri = half_planes(2.0, 0.0, Affine2d::identity());
        let hist = half_planes(0.0, 0.0, Affine2d::identity());
        let cfg = CurveMetricConfig::default();
        let err = CurvePair::extract(&mri, &hist, &cfg, Variant::SingleTissue).unwrap_err();
        assert!(matches!(
            err,
            Error::NoContour {
                modality: Modality::Histology,
                count: 0
            }
        ));
    }

    #[test]
    fn test_histology_checked_first() {
        // 两张切片都没有轮廓时, 报告组织学切片的错误.
        let flat = half_planes(0.0, 0.0, Affine2d::identity());
        let cfg = CurveMetricConfig::default();
        let err = CurvePair::extract(&flat, &flat, &cfg, Variant::LabelAware).unwrap_err();
        assert_eq!(err.to_string(), "No contours in histology: 0");
    }
}
