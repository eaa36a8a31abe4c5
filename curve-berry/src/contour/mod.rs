//! 等值线提取.
//!
//! 使用 marching squares 在二维图像上提取给定强度的等值线, 结果为亚像素精度的
//! `(行, 列)` 点列. 点列顺序就是沿边界行走的顺序.

use std::collections::{BTreeMap, HashMap, VecDeque};

use ndarray::ArrayView2;

use crate::{Curve, Idx2dF};

mod extract;
mod select;

pub use extract::{HistParams, MriLabelParams, MriSingleParams};
pub use select::{ContourSelect, Selection};

/// 像素空间中的一条轮廓.
pub type Contour = Curve;

/// 线段, 从第一个点指向第二个点.
type Segment = (Idx2dF, Idx2dF);

/// 点的精确哈希键. 只有坐标逐位相同的点才会被视为同一个点.
type PointKey = (u64, u64);

#[inline]
fn key((h, w): Idx2dF) -> PointKey {
    // `+ 0.0` 将 -0.0 规范为 0.0.
    ((h + 0.0).to_bits(), (w + 0.0).to_bits())
}

/// 线性插值系数: `level` 在 `from` 和 `to` 之间的位置.
#[inline]
fn frac(from: f64, to: f64, level: f64) -> f64 {
    (level - from) / (to - from)
}

/// 提取 `image` 上强度为 `level` 的所有等值线.
///
/// 若给出 `mask`, 只有四个角全部位于掩膜内的单元格参与计算. 任意角为 NaN
/// 的单元格同样被跳过. 闭合轮廓的首尾两点相同.
///
/// 返回值按轮廓被创建的先后排序.
///
/// # Panics
///
/// `mask` 与 `image` 形状不一致时 panic.
pub fn find_contours(
    image: ArrayView2<f32>,
    level: f32,
    mask: Option<ArrayView2<bool>>,
) -> Vec<Contour> {
    if let Some(m) = &mask {
        assert_eq!(m.dim(), image.dim(), "掩膜与图像形状不一致");
    }
    let segments = marching_squares(image, level as f64, mask);
    log::debug!("marching squares: {} segments", segments.len());
    assemble(segments)
}

/// 逐单元格 (行优先) 生成线段.
///
/// 角点严格大于 `level` 时记为 "高". 鞍点单元格按低连通处理:
/// 两个高角不相连.
fn marching_squares(
    image: ArrayView2<f32>,
    level: f64,
    mask: Option<ArrayView2<bool>>,
) -> Vec<Segment> {
    let (rows, cols) = image.dim();
    let mut segments = Vec::new();
    if rows < 2 || cols < 2 {
        return segments;
    }

    for r0 in 0..rows - 1 {
        for c0 in 0..cols - 1 {
            let (r1, c1) = (r0 + 1, c0 + 1);
            if let Some(m) = &mask {
                if !(m[(r0, c0)] && m[(r0, c1)] && m[(r1, c0)] && m[(r1, c1)]) {
                    continue;
                }
            }

            let ul = image[(r0, c0)] as f64;
            let ur = image[(r0, c1)] as f64;
            let ll = image[(r1, c0)] as f64;
            let lr = image[(r1, c1)] as f64;
            if ul.is_nan() || ur.is_nan() || ll.is_nan() || lr.is_nan() {
                continue;
            }

            let case = u8::from(ul > level)
                | u8::from(ur > level) << 1
                | u8::from(ll > level) << 2
                | u8::from(lr > level) << 3;

            let (r0f, c0f, r1f, c1f) = (r0 as f64, c0 as f64, r1 as f64, c1 as f64);
            let top = || (r0f, c0f + frac(ul, ur, level));
            let bottom = || (r1f, c0f + frac(ll, lr, level));
            let left = || (r0f + frac(ul, ll, level), c0f);
            let right = || (r0f + frac(ur, lr, level), c1f);

            match case {
                1 => segments.push((top(), left())),
                2 => segments.push((right(), top())),
                3 => segments.push((right(), left())),
                4 => segments.push((left(), bottom())),
                5 => segments.push((top(), bottom())),
                6 => {
                    segments.push((right(), top()));
                    segments.push((left(), bottom()));
                }
                7 => segments.push((right(), bottom())),
                8 => segments.push((bottom(), right())),
                9 => {
                    segments.push((top(), left()));
                    segments.push((bottom(), right()));
                }
                10 => segments.push((bottom(), top())),
                11 => segments.push((bottom(), left())),
                12 => segments.push((left(), right())),
                13 => segments.push((top(), right())),
                14 => segments.push((left(), top())),
                // 0 和 15: 单元格内没有等值线.
                _ => {}
            }
        }
    }
    segments
}

/// 将有向线段首尾相接成轮廓.
///
/// `starts` / `ends` 记录每条未闭合轮廓的首点 / 尾点. 新线段可能延长一条轮廓,
/// 也可能把两条轮廓连成一条; 合并时较晚创建的轮廓并入较早创建的轮廓.
fn assemble(segments: Vec<Segment>) -> Vec<Contour> {
    let mut contours: BTreeMap<usize, VecDeque<Idx2dF>> = BTreeMap::new();
    let mut starts: HashMap<PointKey, usize> = HashMap::new();
    let mut ends: HashMap<PointKey, usize> = HashMap::new();
    let mut next_index = 0usize;

    for (from, to) in segments {
        // 退化线段 (等值线恰好经过角点).
        if key(from) == key(to) {
            continue;
        }

        let tail = starts.remove(&key(to));
        let head = ends.remove(&key(from));

        match (tail, head) {
            (Some(t), Some(h)) if t == h => {
                // 闭合.
                if let Some(c) = contours.get_mut(&h) {
                    c.push_back(to);
                }
            }
            (Some(t), Some(h)) if t > h => {
                // 尾部轮廓较晚创建, 接到头部轮廓后面.
                let Some(tail_pts) = contours.remove(&t) else {
                    continue;
                };
                if let Some(head_pts) = contours.get_mut(&h) {
                    head_pts.extend(tail_pts);
                    if let (Some(&first), Some(&last)) = (head_pts.front(), head_pts.back()) {
                        starts.insert(key(first), h);
                        ends.insert(key(last), h);
                    }
                }
            }
            (Some(t), Some(h)) => {
                // 头部轮廓较晚创建, 接到尾部轮廓前面.
                let Some(head_pts) = contours.remove(&h) else {
                    continue;
                };
                if let Some(tail_pts) = contours.get_mut(&t) {
                    for p in head_pts.into_iter().rev() {
                        tail_pts.push_front(p);
                    }
                    if let (Some(&first), Some(&last)) = (tail_pts.front(), tail_pts.back()) {
                        starts.insert(key(first), t);
                        ends.insert(key(last), t);
                    }
                }
            }
            (Some(t), None) => {
                if let Some(c) = contours.get_mut(&t) {
                    c.push_front(from);
                    starts.insert(key(from), t);
                }
            }
            (None, Some(h)) => {
                if let Some(c) = contours.get_mut(&h) {
                    c.push_back(to);
                    ends.insert(key(to), h);
                }
            }
            (None, None) => {
                contours.insert(next_index, VecDeque::from([from, to]));
                starts.insert(key(from), next_index);
                ends.insert(key(to), next_index);
                next_index += 1;
            }
        }
    }

    contours.into_values().map(Vec::from).collect()
}

/// 轮廓是否闭合 (首尾为同一点).
#[inline]
pub fn is_closed(contour: &[Idx2dF]) -> bool {
    contour.len() > 2 && contour.first() == contour.last()
}

/// 折线总长度.
pub fn arc_length(contour: &[Idx2dF]) -> f64 {
    contour
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// 中心 `size × size` 的方块为 1, 其余为 0.
    fn square(n: usize, lo: usize, size: usize) -> Array2<f32> {
        Array2::from_shape_fn((n, n), |(h, w)| {
            let inside = (lo..lo + size).contains(&h) && (lo..lo + size).contains(&w);
            if inside {
                1.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn test_single_square_is_closed() {
        let img = square(8, 2, 4);
        let cs = find_contours(img.view(), 0.5, None);
        assert_eq!(cs.len(), 1);
        let c = &cs[0];
        assert!(is_closed(c));
        // 4×4 方块: 每边 4 个像素中点 + 4 个斜切角, 共 16 个不同点.
        assert_eq!(c.len(), 17);
        for &(h, w) in c.iter() {
            let on_row = h == 1.5 || h == 5.5;
            let on_col = w == 1.5 || w == 5.5;
            assert!(on_row || on_col, "({h}, {w}) 不在方块边界上");
        }
    }

    #[test]
    fn test_interpolation() {
        // 0 -> 4 的水平渐变, level = 1 位于第 0 列与第 1 列之间的 1/4 处.
        let img = Array2::from_shape_fn((3, 2), |(_, w)| if w == 0 { 0.0 } else { 4.0 });
        let cs = find_contours(img.view(), 1.0, None);
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].len(), 3);
        assert!(cs[0].iter().all(|&(_, w)| w == 0.25));
        // 单元格编号 10: 线段从下指向上.
        assert_eq!(cs[0].first(), Some(&(2.0, 0.25)));
        assert_eq!(cs[0].last(), Some(&(0.0, 0.25)));
    }

    #[test]
    fn test_two_separate_squares() {
        let mut img = square(12, 1, 3);
        img.slice_mut(ndarray::s![7..10, 7..10]).fill(1.0);
        let cs = find_contours(img.view(), 0.5, None);
        assert_eq!(cs.len(), 2);
        // 行优先扫描, 左上角的方块先被创建.
        assert!(cs[0].iter().all(|&(h, _)| h < 5.0));
        assert!(cs[1].iter().all(|&(h, _)| h > 5.0));
    }

    #[test]
    fn test_mask_opens_contour() {
        let img = square(8, 2, 4);
        let mut mask = Array2::from_elem((8, 8), true);
        // 屏蔽右半边.
        mask.slice_mut(ndarray::s![.., 5..]).fill(false);
        let cs = find_contours(img.view(), 0.5, Some(mask.view()));
        assert_eq!(cs.len(), 1);
        assert!(!is_closed(&cs[0]));
        assert!(cs[0].iter().all(|&(_, w)| w <= 4.5));
    }

    #[test]
    fn test_nan_and_flat() {
        let flat = Array2::from_elem((4, 4), 3.0f32);
        assert!(find_contours(flat.view(), 1.0, None).is_empty());

        let mut img = square(6, 1, 4);
        img.fill(f32::NAN);
        assert!(find_contours(img.view(), 0.5, None).is_empty());

        let tiny = Array2::from_elem((1, 5), 3.0f32);
        assert!(find_contours(tiny.view(), 1.0, None).is_empty());
    }

    #[test]
    fn test_saddle_low_connectivity() {
        // 对角两个高角不相连, 得到两条短线段.
        let img = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let cs = find_contours(img.view(), 0.5, None);
        assert_eq!(cs.len(), 2);
        assert_eq!(cs[0], vec![(0.0, 0.5), (0.5, 0.0)]);
        assert_eq!(cs[1], vec![(1.0, 0.5), (0.5, 1.0)]);
    }

    #[test]
    fn test_arc_length() {
        assert_eq!(arc_length(&[(0.0, 0.0), (3.0, 4.0), (3.0, 5.0)]), 6.0);
        assert_eq!(arc_length(&[(1.0, 1.0)]), 0.0);
    }
}
