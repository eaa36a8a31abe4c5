//! 离散 Fréchet 距离.

use super::point_distance;
use crate::Idx2dF;

/// 两条折线 `p`, `q` 之间的离散 Fréchet 距离.
///
/// 逐行迭代的动态规划, 只保留两行状态:
/// `ca[i][j] = max(min(ca[i-1][j], ca[i-1][j-1], ca[i][j-1]), |p_i - q_j|)`.
/// 任一曲线为空时返回 NaN.
pub fn frechet(p: &[Idx2dF], q: &[Idx2dF]) -> f64 {
    if p.is_empty() || q.is_empty() {
        return f64::NAN;
    }
    let mut prev = vec![0.0f64; q.len()];
    let mut cur = vec![0.0f64; q.len()];

    for (i, &pi) in p.iter().enumerate() {
        for (j, &qj) in q.iter().enumerate() {
            let d = point_distance(pi, qj);
            cur[j] = match (i, j) {
                (0, 0) => d,
                (0, _) => cur[j - 1].max(d),
                (_, 0) => prev[0].max(d),
                _ => prev[j].min(prev[j - 1]).min(cur[j - 1]).max(d),
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[q.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    /// 教科书式的递归定义, 仅用于对照.
    fn frechet_naive(p: &[Idx2dF], q: &[Idx2dF]) -> f64 {
        fn c(p: &[Idx2dF], q: &[Idx2dF], i: usize, j: usize) -> f64 {
            let d = point_distance(p[i], q[j]);
            match (i, j) {
                (0, 0) => d,
                (0, _) => c(p, q, 0, j - 1).max(d),
                (_, 0) => c(p, q, i - 1, 0).max(d),
                _ => c(p, q, i - 1, j)
                    .min(c(p, q, i - 1, j - 1))
                    .min(c(p, q, i, j - 1))
                    .max(d),
            }
        }
        c(p, q, p.len() - 1, q.len() - 1)
    }

    fn wobble(n: usize, phase: f64) -> Vec<Idx2dF> {
        (0..n)
            .map(|i| {
                let t = i as f64 * 0.7 + phase;
                (i as f64 + t.sin(), (2.0 * t).cos() * 1.5)
            })
            .collect()
    }

    #[test]
    fn test_identical_is_zero() {
        let p = wobble(9, 0.0);
        assert_eq!(frechet(&p, &p), 0.0);
    }

    #[test]
    fn test_small_known() {
        let p = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];
        let q = [(0.0, 1.0), (2.0, 1.0)];
        assert!(f64_eq(frechet(&p, &q), 2f64.sqrt()));
        assert!(f64_eq(frechet(&q, &p), 2f64.sqrt()));
    }

    #[test]
    fn test_parallel_offset() {
        let p: Vec<_> = (0..20).map(|i| (f64::from(i), 0.0)).collect();
        let q: Vec<_> = (0..20).map(|i| (f64::from(i), 1.0)).collect();
        assert!(f64_eq(frechet(&p, &q), 1.0));
    }

    #[test]
    fn test_against_recursion() {
        let p = wobble(7, 0.3);
        let q = wobble(6, 1.9);
        let expected = frechet_naive(&p, &q);
        assert!(f64_eq(frechet(&p, &q), expected));
        assert!(f64_eq(frechet(&q, &p), expected));
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(frechet(&[], &[(0.0, 0.0)]).is_nan());
        assert!(frechet(&[(0.0, 0.0)], &[]).is_nan());
    }
}
