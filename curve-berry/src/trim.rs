//! 对应关系修剪.
//!
//! 两条曲线覆盖的解剖范围往往不同. 曲线 1 超出曲线 2 的部分, 其最近点会
//! 集中落在曲线 2 的端点上, 反之亦然. 修剪从两端剥离这些 "失控" 的点,
//! 直到遇到一个最近点不在对方端点上的点为止.
//!
//! 距离矩阵的行对应曲线 1 (MRI), 列对应曲线 2 (组织学).

use std::ops::RangeInclusive;

use itertools::Itertools;
use ndarray::{ArrayView1, ArrayView2, Axis};

/// 两条曲线各自保留的闭区间下标范围 `[am, bm]`, `[ah, bh]`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TrimBounds {
    /// 曲线 1 保留范围起点.
    pub am: usize,
    /// 曲线 1 保留范围终点 (含).
    pub bm: usize,
    /// 曲线 2 保留范围起点.
    pub ah: usize,
    /// 曲线 2 保留范围终点 (含).
    pub bh: usize,
}

/// 最小值下标, 并列时取第一个.
#[inline]
fn argmin(lane: ArrayView1<f64>) -> usize {
    lane.iter()
        .copied()
        .position_min_by(|a, b| a.total_cmp(b))
        .unwrap_or(0)
}

/// 从两端剥离最近点落在 `{0, last}` 上的点.
fn peel(nn: &[usize], last: usize) -> (usize, usize) {
    let is_end = |k: usize| nn[k] == 0 || nn[k] == last;
    let mut a = 0;
    let mut b = nn.len().saturating_sub(1);
    while a < b && is_end(a) {
        a += 1;
    }
    while b > a && is_end(b) {
        b -= 1;
    }
    (a, b)
}

/// 由距离矩阵计算修剪范围.
///
/// 纯函数, 不修改任何输入. 保留范围可能退化为单个点.
pub fn trim_bounds(d: ArrayView2<f64>) -> TrimBounds {
    let (n, m) = d.dim();
    if n == 0 || m == 0 {
        return TrimBounds {
            am: 0,
            bm: n.saturating_sub(1),
            ah: 0,
            bh: m.saturating_sub(1),
        };
    }

    let nn1: Vec<usize> = d.lanes(Axis(1)).into_iter().map(argmin).collect();
    let nn2: Vec<usize> = d.lanes(Axis(0)).into_iter().map(argmin).collect();
    let (am, bm) = peel(&nn1, m - 1);
    let (ah, bh) = peel(&nn2, n - 1);

    let bounds = TrimBounds { am, bm, ah, bh };
    log::info!("trim bounds: {bounds:?} for {n} x {m} points");
    if am == bm || ah == bh {
        log::warn!("trimming left a single point on one curve: {bounds:?}");
    }
    bounds
}

impl TrimBounds {
    /// 曲线 1 的保留范围.
    #[inline]
    pub fn mri_range(&self) -> RangeInclusive<usize> {
        self.am..=self.bm
    }

    /// 曲线 2 的保留范围.
    #[inline]
    pub fn hist_range(&self) -> RangeInclusive<usize> {
        self.ah..=self.bh
    }

    /// 截取两条曲线的保留部分. 范围越界时得到空切片.
    pub fn apply<'a, T>(&self, c1: &'a [T], c2: &'a [T]) -> (&'a [T], &'a [T]) {
        (
            c1.get(self.mri_range()).unwrap_or(&[]),
            c2.get(self.hist_range()).unwrap_or(&[]),
        )
    }

    /// 长度分别为 `n`, `m` 的两条曲线各被剪掉的点数.
    pub fn trimmed_count(&self, n: usize, m: usize) -> (usize, usize) {
        let kept = |r: RangeInclusive<usize>| r.count();
        (
            n.saturating_sub(kept(self.mri_range())),
            m.saturating_sub(kept(self.hist_range())),
        )
    }

    /// 线段 `(i, i + 1)` 是否整体位于 `range` 内.
    #[inline]
    pub fn segment_kept(range: &RangeInclusive<usize>, i: usize) -> bool {
        range.contains(&i) && range.contains(&(i + 1))
    }
}
