//! # XES 谱图绘制
//!
//! 使用 `plotters` 库生成谱图，多条谱线叠加并带图例。
//!
//! ## 功能
//! - 多样品 / 多次扫描叠加
//! - 原始强度或积分归一化强度
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/spectrum.rs`
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XesError};
use crate::models::Spectrum;

use plotters::prelude::*;
use std::path::Path;

/// 谱线颜色循环
const PALETTE: [RGBColor; 8] = [
    RGBColor(0, 102, 204),
    RGBColor(214, 39, 40),
    RGBColor(44, 160, 44),
    RGBColor(255, 127, 14),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(23, 190, 207),
];

/// 绘图选项
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// 强度是否已归一化（影响 y 轴标题）
    pub normalized: bool,
    pub use_svg: bool,
}

/// 绘制带标签的谱线
pub fn plot_spectra(
    series: &[(String, Spectrum)],
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    if series.iter().all(|(_, s)| s.is_empty()) {
        return Err(XesError::PlotError("Nothing to plot".to_string()));
    }

    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_spectra_chart(&root, series, options)?;
        root.present()
            .map_err(|e| XesError::PlotError(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_spectra_chart(&root, series, options)?;
        root.present()
            .map_err(|e| XesError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 所有谱线的坐标范围
fn axis_ranges(series: &[(String, Spectrum)]) -> ((f64, f64), (f64, f64)) {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (0.0_f64, f64::NEG_INFINITY);

    for (_, spectrum) in series {
        for (e, i) in spectrum.points() {
            x = (x.0.min(e), x.1.max(e));
            y = (y.0.min(i), y.1.max(i));
        }
    }

    if x.1 - x.0 <= 0.0 {
        x = (x.0 - 1.0, x.1 + 1.0);
    }
    if y.1 <= y.0 {
        y.1 = y.0 + 1.0;
    }
    // 顶部留白
    let pad = (y.1 - y.0) * 0.05;

    (x, (y.0, y.1 + pad))
}

/// 绘制谱图的核心逻辑
fn draw_spectra_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &[(String, Spectrum)],
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| XesError::PlotError(format!("{:?}", e)))?;

    let ((x_min, x_max), (y_min, y_max)) = axis_ranges(series);

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| XesError::PlotError(format!("{:?}", e)))?;

    let y_desc = if options.normalized {
        "Normalized intensity"
    } else {
        "Counts per live second"
    };

    chart
        .configure_mesh()
        .x_desc("Energy (eV)")
        .y_desc(y_desc)
        .x_label_style(("sans-serif", 14))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| XesError::PlotError(format!("{:?}", e)))?;

    for (i, (label, spectrum)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(spectrum.points(), color.stroke_width(2)))
            .map_err(|e| XesError::PlotError(format!("{:?}", e)))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| XesError::PlotError(format!("{:?}", e)))?;

    Ok(())
}
