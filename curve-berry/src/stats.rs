//! 简单统计量.
//!
//! 分位数采用相邻次序统计量之间的线性插值, 位置为 `(n - 1) * q`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use num::Float;
use ordered_float::OrderedFloat;

/// 算术平均值. 空样本返回 `None`.
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    Some(sum / T::from(values.len())?)
}

/// 中位数. 空样本返回 `None`.
#[inline]
pub fn median<T: Float>(values: &[T]) -> Option<T> {
    quantile(values, 0.5)
}

/// `q` 分位数 (`0 <= q <= 1`). 空样本返回 `None`.
pub fn quantile<T: Float>(values: &[T], q: f64) -> Option<T> {
    debug_assert!((0.0..=1.0).contains(&q));
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = T::from(pos - lo as f64)?;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// 最大值. 空样本返回 `None`.
#[inline]
pub fn max<T: Float>(values: &[T]) -> Option<T> {
    values.iter().copied().reduce(T::max)
}

/// 众数: 出现次数最多的值. 次数相同时取最小的值. 空样本返回 `None`.
///
/// 比较按位精确进行, 适合标签图或量化后的强度.
pub fn mode<I: IntoIterator<Item = f32>>(values: I) -> Option<f32> {
    let mut book: BTreeMap<OrderedFloat<f32>, usize> = BTreeMap::new();
    for v in values.into_iter().filter(|v| !v.is_nan()) {
        *book.entry(OrderedFloat(v)).or_default() += 1;
    }
    // 升序遍历, 只在严格更多时替换, 因此平局时保留较小值.
    book.into_iter()
        .fold(None, |best: Option<(f32, usize)>, (OrderedFloat(v), cnt)| match best {
            Some((_, top)) if top >= cnt => best,
            _ => Some((v, cnt)),
        })
        .map(|(v, _)| v)
}
