//! 修剪结果的 SVG 可视化.
//!
//! 两条物理曲线都以逐段 `<line>` 绘制. 两端点都在保留范围内的线段用
//! [`color::KEPT_MRI`] / [`color::KEPT_HIST`], 其余用 [`color::TRIMMED`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::Path;

use crate::consts::color;
use crate::trim::TrimBounds;
use crate::{Idx2dF, Result};

/// 视口四周留白 (毫米).
const MARGIN: f64 = 1.0;

/// 修剪结果图.
#[derive(Debug, Clone)]
pub struct TrimPlot<'a> {
    /// 画布宽度, 即 MRI 切片的列数.
    width: usize,
    /// 画布高度, 即 MRI 切片的行数.
    height: usize,
    mri: &'a [Idx2dF],
    hist: &'a [Idx2dF],
    bounds: TrimBounds,
}

impl<'a> TrimPlot<'a> {
    /// `shape` 为 MRI 切片的形状 `(行, 列)`, 两条曲线均为物理坐标.
    pub fn new(
        shape: (usize, usize),
        mri: &'a [Idx2dF],
        hist: &'a [Idx2dF],
        bounds: TrimBounds,
    ) -> Self {
        let (height, width) = shape;
        Self {
            width,
            height,
            mri,
            hist,
            bounds,
        }
    }

    /// 两条曲线的包围盒 `(min_x, min_y, width, height)`, 含留白.
    /// 没有任何点时退化为画布大小.
    fn view_box(&self) -> (f64, f64, f64, f64) {
        let pts = self.mri.iter().chain(self.hist.iter());
        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in pts {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        if x0 > x1 {
            return (0.0, 0.0, self.width as f64, self.height as f64);
        }
        (
            x0 - MARGIN,
            y0 - MARGIN,
            x1 - x0 + 2.0 * MARGIN,
            y1 - y0 + 2.0 * MARGIN,
        )
    }

    /// 逐段写出一条曲线.
    fn write_curve<W: Write>(
        w: &mut W,
        curve: &[Idx2dF],
        kept: RangeInclusive<usize>,
        kept_color: &str,
    ) -> io::Result<()> {
        for (i, seg) in curve.windows(2).enumerate() {
            let ((x1, y1), (x2, y2)) = (seg[0], seg[1]);
            let stroke = if TrimBounds::segment_kept(&kept, i) {
                kept_color
            } else {
                color::TRIMMED
            };
            writeln!(
                w,
                r#"  <line x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}" stroke="{stroke}" />"#
            )?;
        }
        Ok(())
    }

    /// 写出完整的 SVG 文档.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        let (vx, vy, vw, vh) = self.view_box();
        writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            w,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}" viewBox="{vx:.3} {vy:.3} {vw:.3} {vh:.3}">"#,
            self.width, self.height
        )?;
        writeln!(
            w,
            r#"<g fill="none" stroke-width="1" stroke-linecap="round" vector-effect="non-scaling-stroke">"#
        )?;
        Self::write_curve(&mut w, self.mri, self.bounds.mri_range(), color::KEPT_MRI)?;
        Self::write_curve(&mut w, self.hist, self.bounds.hist_range(), color::KEPT_HIST)?;
        writeln!(w, "</g>")?;
        writeln!(w, "</svg>")?;
        w.flush()
    }

    /// 保存到 `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_to(BufWriter::new(File::create(path)?))?;
        log::debug!("trim plot saved to {}", path.display());
        Ok(())
    }
}
