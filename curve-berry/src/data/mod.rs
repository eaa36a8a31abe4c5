use std::fmt;
use std::path::Path;

use ndarray::{Array2, ArrayD, ArrayView2, Axis, Ix2};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use crate::{Error, Idx2d, Result};

mod affine;

pub use affine::Affine2d;

/// 图像来源.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Modality {
    /// MRI 切片 (标签图或强度图).
    Mri,

    /// 组织学切片.
    Histology,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mri => f.write_str("MRI"),
            Self::Histology => f.write_str("histology"),
        }
    }
}

/// 二维切片, 包括像素数据和 "像素索引 → 毫米" 的仿射变换.
///
/// 数据按 nii 文件自身的轴序存储: 第一维是 nifti 的 `i` 轴, 第二维是 `j` 轴.
/// 因此从中提取的轮廓点 `(行, 列)` 可以直接送入仿射变换.
#[derive(Debug, Clone)]
pub struct Volume {
    data: Array2<f32>,
    affine: Affine2d,
}

impl Volume {
    /// 打开 nii 文件格式的切片. `path` 为 nii 文件的本地路径.
    ///
    /// 所有长度为 1 的维度都会被移除. 若剩下的不是恰好两个维度,
    /// 返回 `Err(Error::NotPlanar)`; 文件本身无法解析时返回 `Err(Error::Nifti)`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let obj = ReaderOptions::new().read_file(path.as_ref())?;
        let affine = Affine2d::from_header(obj.header());

        // [i, j, 1, ...]. 缩放 (scl_slope/scl_inter) 由读取器完成.
        let data = obj.into_volume().into_ndarray::<f32>()?;
        let data = squeeze(data)?;
        log::debug!(
            "loaded {:?}: shape {:?}, affine {:?}",
            path.as_ref(),
            data.dim(),
            affine
        );

        Ok(Self { data, affine })
    }

    /// 根据已有的二维数组和仿射变换直接创建切片.
    #[inline]
    pub fn from_parts(data: Array2<f32>, affine: Affine2d) -> Self {
        Self { data, affine }
    }

    /// 获得数据的一份不可变 shallow copy.
    #[inline]
    pub fn data(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// 像素索引到物理坐标的仿射变换.
    #[inline]
    pub fn affine(&self) -> &Affine2d {
        &self.affine
    }

    /// 图像的形状 (行, 列).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }
}

/// 移除所有长度为 1 的维度, 要求剩下恰好两个维度.
fn squeeze(data: ArrayD<f32>) -> Result<Array2<f32>> {
    let shape = data.shape().to_vec();
    if shape.iter().filter(|&&n| n != 1).count() != 2 {
        return Err(Error::NotPlanar(shape));
    }
    // 从后往前删, 保证剩余轴的编号不变.
    let data = (0..shape.len())
        .rev()
        .filter(|&axis| shape[axis] == 1)
        .fold(data, |acc, axis| acc.index_axis_move(Axis(axis), 0));
    data.into_dimensionality::<Ix2>()
        .map_err(|_| Error::NotPlanar(shape))
}
