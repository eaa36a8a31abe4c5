//! 像素索引 → 物理坐标 (毫米) 的二维仿射变换.

use nifti::NiftiHeader;

use crate::{Curve, Idx2dF};

/// 二维仿射变换 `p ↦ M·p + t`. 只读.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine2d {
    /// 2×2 线性部分, 行优先.
    m: [[f64; 2]; 2],
    /// 平移部分.
    t: [f64; 2],
}

impl Default for Affine2d {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2d {
    /// 由线性部分 (行优先) 和平移部分直接构建.
    #[inline]
    pub const fn new(m: [[f64; 2]; 2], t: [f64; 2]) -> Self {
        Self { m, t }
    }

    /// 恒等变换.
    #[inline]
    pub const fn identity() -> Self {
        Self::new([[1.0, 0.0], [0.0, 1.0]], [0.0, 0.0])
    }

    /// 轴对齐的缩放 + 平移.
    #[inline]
    pub const fn from_scale_translation(scale: [f64; 2], t: [f64; 2]) -> Self {
        Self::new([[scale[0], 0.0], [0.0, scale[1]]], t)
    }

    /// 线性部分, 行优先.
    #[inline]
    pub fn linear(&self) -> [[f64; 2]; 2] {
        self.m
    }

    /// 从 nii header 中取出最佳 4×4 仿射, 并截取前两行前两列 + 平移.
    ///
    /// 选取顺序: `sform_code > 0` 时用 sform, 否则 `qform_code > 0` 时用四元数 qform,
    /// 都没有时用以体素网格中心为原点、x 轴翻转的基础仿射.
    pub fn from_header(h: &NiftiHeader) -> Self {
        if h.sform_code > 0 {
            let [a, b, _, tx] = h.srow_x.map(f64::from);
            let [c, d, _, ty] = h.srow_y.map(f64::from);
            Self::new([[a, b], [c, d]], [tx, ty])
        } else if h.qform_code > 0 {
            Self::from_qform(h)
        } else {
            Self::from_base(h)
        }
    }

    /// 四元数 qform. 第三列对二维切片没有影响, 这里直接忽略.
    fn from_qform(h: &NiftiHeader) -> Self {
        let (b, c, d) = (
            f64::from(h.quatern_b),
            f64::from(h.quatern_c),
            f64::from(h.quatern_d),
        );
        let a = (1.0 - (b * b + c * c + d * d)).max(0.0).sqrt();
        let (dx, dy) = (f64::from(h.pixdim[1]), f64::from(h.pixdim[2]));

        let r11 = a * a + b * b - c * c - d * d;
        let r12 = 2.0 * (b * c - a * d);
        let r21 = 2.0 * (b * c + a * d);
        let r22 = a * a + c * c - b * b - d * d;

        Self::new(
            [[r11 * dx, r12 * dy], [r21 * dx, r22 * dy]],
            [f64::from(h.quatern_x), f64::from(h.quatern_y)],
        )
    }

    /// 没有任何方向信息时的基础仿射.
    fn from_base(h: &NiftiHeader) -> Self {
        let ndim = h.dim[0] as usize;
        let axis = |k: usize| -> (f64, f64) {
            if k <= ndim {
                (f64::from(h.dim[k]), f64::from(h.pixdim[k]))
            } else {
                (1.0, 1.0)
            }
        };
        let (nx, dx) = axis(1);
        let (ny, dy) = axis(2);
        Self::new(
            [[-dx, 0.0], [0.0, dy]],
            [(nx - 1.0) / 2.0 * dx, -(ny - 1.0) / 2.0 * dy],
        )
    }

    /// 线性部分的行列式.
    #[inline]
    pub fn det(&self) -> f64 {
        let [[a, b], [c, d]] = self.m;
        a * d - b * c
    }

    /// 逆变换. 线性部分奇异时返回 `None`.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.det();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let [[a, b], [c, d]] = self.m;
        let m = [[d / det, -b / det], [-c / det, a / det]];
        let [tx, ty] = self.t;
        let t = [
            -(m[0][0] * tx + m[0][1] * ty),
            -(m[1][0] * tx + m[1][1] * ty),
        ];
        Some(Self::new(m, t))
    }

    /// 计算 `M·p + t`.
    #[inline]
    pub fn apply(&self, (p0, p1): Idx2dF) -> Idx2dF {
        let [[a, b], [c, d]] = self.m;
        let [tx, ty] = self.t;
        (a * p0 + b * p1 + tx, c * p0 + d * p1 + ty)
    }

    /// 将像素空间轮廓逐点映射为物理曲线. 长度与顺序保持不变.
    pub fn map_contour(&self, contour: &[Idx2dF]) -> Curve {
        contour.iter().map(|&p| self.apply(p)).collect()
    }
}
