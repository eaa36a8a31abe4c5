//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Curve, Idx2d, Idx2dF, Mask};

pub use crate::{Affine2d, Error, Modality, Result, Volume};

pub use crate::config::CurveMetricConfig;

pub use crate::contour::{
    find_contours, Contour, ContourSelect, HistParams, MriLabelParams, MriSingleParams, Selection,
};

pub use crate::metric::{frechet, pairwise_distances, MetricRecord};

pub use crate::pipeline::{CurvePair, Variant};

pub use crate::svg::TrimPlot;

pub use crate::trim::{trim_bounds, TrimBounds};
