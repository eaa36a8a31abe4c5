//! 运行时错误.

use crate::Modality;

/// 流水线各阶段的运行时错误. 所有错误对本次运行都是致命的.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// nii 文件无法读取或解码.
    #[error("failed to read NIfTI volume: {0}")]
    Nifti(#[from] nifti::NiftiError),

    /// 挤压单例维度后不是二维图像. 参数为原始形状.
    #[error("volume is not planar after squeezing singleton axes, shape {0:?}")]
    NotPlanar(Vec<usize>),

    /// 众数统计区间内没有任何体素.
    #[error("no {modality} intensity within [{low}, {high}]")]
    EmptyIntensityBand {
        /// 图像来源.
        modality: Modality,
        /// 区间下限.
        low: f32,
        /// 区间上限.
        high: f32,
    },

    /// 没有提取到任何等值线.
    #[error("No contours in {modality}: {count}")]
    NoContour {
        /// 图像来源.
        modality: Modality,
        /// 提取到的轮廓个数.
        count: usize,
    },

    /// 配置文件格式错误.
    #[cfg(feature = "serde")]
    #[error("malformed configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// 指标序列化失败.
    #[cfg(feature = "serde")]
    #[error("failed to serialize metrics: {0}")]
    Json(#[from] serde_json::Error),

    /// 读写配置或输出文件失败.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// 流水线运行结果.
pub type Result<T> = std::result::Result<T, Error>;
