//! 代表轮廓的选取策略.
//!
//! 默认的 "点数最多" 规则假设真实的解剖边界总是压过噪声产生的小轮廓.
//! 这是一个已知的弱启发式: 真实边界本身不连通时就会失效.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use super::{arc_length, is_closed, Contour};

/// 从一组轮廓中选出一条作为代表边界.
pub trait ContourSelect {
    /// 返回代表轮廓在 `contours` 中的下标. 输入为空时返回 `None`.
    fn select_representative(&self, contours: &[Contour]) -> Option<usize>;
}

/// 内置的选取策略.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// 点数最多; 并列时取提取顺序中的第一条.
    #[default]
    Longest,

    /// 折线长度最长; 并列时取第一条.
    LongestArc,

    /// 在闭合轮廓中取点数最多的; 没有闭合轮廓时退化为 [`Selection::Longest`].
    PreferClosed,
}

/// 第一个键值最大的下标.
///
/// `Iterator::max_by_key` 在并列时返回最后一个, 所以这里反过来用 `min_by_key`.
fn first_max_by_key<K: Ord + Copy>(it: impl Iterator<Item = (usize, K)>) -> Option<usize> {
    it.min_by_key(|&(_, k)| Reverse(k)).map(|(idx, _)| idx)
}

impl ContourSelect for Selection {
    fn select_representative(&self, contours: &[Contour]) -> Option<usize> {
        match self {
            Self::Longest => first_max_by_key(contours.iter().map(Vec::len).enumerate()),
            Self::LongestArc => first_max_by_key(
                contours
                    .iter()
                    .map(|c| OrderedFloat(arc_length(c)))
                    .enumerate(),
            ),
            Self::PreferClosed => first_max_by_key(
                contours
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| is_closed(c))
                    .map(|(idx, c)| (idx, c.len())),
            )
            .or_else(|| Self::Longest.select_representative(contours)),
        }
    }
}
