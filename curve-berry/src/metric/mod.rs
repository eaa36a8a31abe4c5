//! 曲线距离指标.
//!
//! 记曲线 1 (MRI) 为 `P`, 曲线 2 (组织学) 为 `Q`, 距离矩阵 `D[i, j] = |P_i - Q_j|`.
//! BDE (boundary distance error) 统计量建立在两组最近点距离上:
//!
//! - `d1`: `Q` 中每个点到 `P` 的最近距离 (`D` 的列最小值);
//! - `d2`: `P` 中每个点到 `Q` 的最近距离 (`D` 的行最小值).
//!
//! 各统计量对 `d1`, `d2` 分别计算后取平均 (`bde_hd` 取最大值), 因此交换两条曲线
//! 结果不变.

use ndarray::{Array2, ArrayView2, Axis};

use crate::consts::HD_QUANTILE;
use crate::{stats, Idx2dF};

mod frechet;

pub use frechet::frechet;

/// 两点之间的欧氏距离.
#[inline]
pub fn point_distance(a: Idx2dF, b: Idx2dF) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// 距离矩阵. 行对应 `a` 中的点, 列对应 `b` 中的点.
pub fn pairwise_distances(a: &[Idx2dF], b: &[Idx2dF]) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| point_distance(a[i], b[j]))
}

/// 沿 `axis` 的最小值. 与 `axis` 正交的方向上每个下标对应一个值.
fn min_along(d: ArrayView2<f64>, axis: Axis) -> Vec<f64> {
    d.lanes(axis)
        .into_iter()
        .map(|lane| lane.fold(f64::INFINITY, |acc, &v| acc.min(v)))
        .collect()
}

/// 最近点距离 `(d1, d2)`: `d1` 为列最小值, `d2` 为行最小值.
///
/// 矩阵为空时两者均为空.
pub fn nearest_distances(d: ArrayView2<f64>) -> (Vec<f64>, Vec<f64>) {
    if d.is_empty() {
        return (Vec::new(), Vec::new());
    }
    (min_along(d, Axis(0)), min_along(d, Axis(1)))
}

/// 一次测量的全部指标.
///
/// 序列化时键的顺序与字段顺序一致; `label` 为 `None` 时省略.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricRecord {
    /// MRI 切片的解剖标签 (仅带标签模式).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub label: Option<i64>,

    /// 两组最近点距离中位数的平均.
    pub bde_median: f64,

    /// 两组最近点距离均值的平均.
    pub bde_mad: f64,

    /// 两组最近点距离均方的平均, 再开方.
    pub bde_rms: f64,

    /// 两组最近点距离 95 分位数的平均.
    pub bde_hd95: f64,

    /// 所有最近点距离的最大值 (Hausdorff 距离).
    pub bde_hd: f64,

    /// 离散 Fréchet 距离.
    pub frechet: f64,
}

/// 两组样本同一统计量的平均. 任一组为空时为 NaN.
fn averaged(d1: &[f64], d2: &[f64], f: impl Fn(&[f64]) -> Option<f64>) -> f64 {
    match (f(d1), f(d2)) {
        (Some(a), Some(b)) => (a + b) / 2.0,
        _ => f64::NAN,
    }
}

impl MetricRecord {
    /// 由距离矩阵计算 BDE 统计量, Fréchet 距离由调用方给出.
    pub fn from_distances(d: ArrayView2<f64>, frechet: f64) -> Self {
        let (d1, d2) = nearest_distances(d);

        let bde_median = averaged(&d1, &d2, stats::median::<f64>);
        let bde_mad = averaged(&d1, &d2, stats::mean::<f64>);
        let bde_rms = averaged(&d1, &d2, |v| {
            let sq: Vec<f64> = v.iter().map(|x| x * x).collect();
            stats::mean(&sq)
        })
        .sqrt();
        let bde_hd95 = averaged(&d1, &d2, |v| stats::quantile(v, HD_QUANTILE));
        let bde_hd = match (stats::max(&d1), stats::max(&d2)) {
            (Some(a), Some(b)) => a.max(b),
            _ => f64::NAN,
        };

        Self {
            label: None,
            bde_median,
            bde_mad,
            bde_rms,
            bde_hd95,
            bde_hd,
            frechet,
        }
    }

    /// 在同一对曲线上计算全部指标.
    pub fn compute(p: &[Idx2dF], q: &[Idx2dF]) -> Self {
        let d = pairwise_distances(p, q);
        Self::from_distances(d.view(), frechet(p, q))
    }

    /// 附上标签.
    #[inline]
    pub fn with_label(mut self, label: i64) -> Self {
        self.label = Some(label);
        self
    }
}
