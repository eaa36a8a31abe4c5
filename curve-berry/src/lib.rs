#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 计算组织学切片与 MRI 切片 (已预先配准) 之间组织边界曲线的距离指标.
//!
//! 每次运行只处理一对文件, 流程严格线性:
//! 加载 → 提取轮廓 → 映射到物理坐标 → (修剪) → 计算指标 → 输出.
//!
//! # 注意
//!
//! 1. 所有输入文件都应为 NIfTI 格式, 去除长度为 1 的维度后必须是二维的.
//! 2. 任何一个阶段失败都会直接返回 `Err`, 不存在部分结果.
//!
//! # 模块概览
//!
//! ### 图像加载 ✅
//!
//! 读取 nii 文件, 挤压单例维度, 并解析 sform/qform 仿射变换.
//!
//! 实现位于 `curve-berry/src/data`.
//!
//! ### 二值形态学 ✅
//!
//! 圆盘结构元素的腐蚀与膨胀.
//!
//! 实现位于 `curve-berry/src/morph.rs`.
//!
//! ### 等值线提取与代表轮廓选取 ✅
//!
//! marching squares 提取等值线, 可插拔的代表轮廓选取策略.
//! 组织学切片和 MRI 切片 (单组织 / 带标签两种) 的掩膜与阈值规则.
//!
//! 实现位于 `curve-berry/src/contour`.
//!
//! ### 对应关系修剪 ✅
//!
//! 剥离曲线两端与对方端点错误配对的 "失控" 片段.
//!
//! 实现位于 `curve-berry/src/trim.rs`.
//!
//! ### 距离指标 ✅
//!
//! BDE 系列统计量与离散 Fréchet 距离.
//!
//! 实现位于 `curve-berry/src/metric`.
//!
//! ### 可视化 ✅
//!
//! 以 SVG 形式标出修剪前后的曲线片段.
//!
//! 实现位于 `curve-berry/src/svg.rs`.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 高精度二维点. 在像素空间中为 `(行, 列)`, 在物理空间中为 `(x, y)` 毫米.
pub type Idx2dF = (f64, f64);

/// 有序点列. 轮廓 (像素空间) 和物理曲线共用该表示.
pub type Curve = Vec<Idx2dF>;

/// 二值掩膜.
pub type Mask = ndarray::Array2<bool>;

pub mod consts;

mod error;

pub use error::{Error, Result};

/// nii 文件基础数据结构.
mod data;

pub use data::{Affine2d, Modality, Volume};

pub mod morph;

pub mod stats;

pub mod contour;

pub mod config;

pub mod metric;

pub mod trim;

pub mod svg;

pub mod pipeline;

pub mod prelude;
