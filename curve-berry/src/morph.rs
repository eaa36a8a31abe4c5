//! 二值形态学操作.
//!
//! 结构元素均为离散圆盘. 腐蚀时图像外部视作前景, 膨胀时图像外部视作背景,
//! 这样贴着图像边缘的组织不会被腐蚀掉.

use ndarray::{Array2, ArrayView2};

use crate::{Idx2d, Mask};

/// 有符号偏移.
type Offset = (isize, isize);

/// 半径为 `radius` 的圆盘结构元素: 所有满足 `dh² + dw² <= radius²` 的偏移.
///
/// 按行优先顺序返回, `radius == 0` 时只有原点.
pub fn disk(radius: usize) -> Vec<Offset> {
    let r = radius as isize;
    (-r..=r)
        .flat_map(move |dh| (-r..=r).map(move |dw| (dh, dw)))
        .filter(|&(dh, dw)| dh * dh + dw * dw <= r * r)
        .collect()
}

/// `pos + off`. 越界时返回 `None`.
#[inline]
fn shifted((h, w): Idx2d, (dh, dw): Offset, (h_len, w_len): Idx2d) -> Option<Idx2d> {
    let h = h.checked_add_signed(dh)?;
    let w = w.checked_add_signed(dw)?;
    (h < h_len && w < w_len).then_some((h, w))
}

/// 以半径为 `radius` 的圆盘腐蚀 `mask`.
///
/// 当且仅当结构元素覆盖的所有图像内像素都为前景时, 结果像素为前景.
pub fn erode(mask: ArrayView2<bool>, radius: usize) -> Mask {
    let fp = disk(radius);
    let dim = mask.dim();
    Array2::from_shape_fn(dim, |pos| {
        fp.iter()
            .all(|&off| shifted(pos, off, dim).map_or(true, |p| mask[p]))
    })
}

/// 以半径为 `radius` 的圆盘膨胀 `mask`.
///
/// 当且仅当结构元素覆盖的图像内像素中存在前景时, 结果像素为前景.
pub fn dilate(mask: ArrayView2<bool>, radius: usize) -> Mask {
    let fp = disk(radius);
    let dim = mask.dim();
    Array2::from_shape_fn(dim, |pos| {
        fp.iter()
            .any(|&off| shifted(pos, off, dim).map_or(false, |p| mask[p]))
    })
}

/// 逐像素求交, 结果写回 `lhs`. 两者形状必须相同, 否则 panic.
pub fn intersect_with(lhs: &mut Mask, rhs: ArrayView2<bool>) {
    assert_eq!(lhs.dim(), rhs.dim(), "掩膜形状不一致");
    lhs.zip_mut_with(&rhs, |a, &b| *a &= b);
}
