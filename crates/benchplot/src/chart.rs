//! SVG chart drawing with `plotters`.
//!
//! Three chart layouts: the combined core-scaling chart (time and speedup
//! panels), the combined log-log performance chart, and the three-panel
//! chart of a single algorithm. Each function draws whatever datasets carry
//! the relevant table and ignores the rest.

#![allow(clippy::cast_precision_loss)]

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::prelude::*;

use crate::algorithm::Rgb;
use crate::dataset::AlgorithmDataset;

const TITLE_FONT_SIZE: u32 = 22;
const AXIS_LABEL_FONT_SIZE: u32 = 16;
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: u32 = 4;

/// Core axis used when no algorithm has scaling data.
const DEFAULT_MAX_CORES: f64 = 8.0;

type Panel<'a> = DrawingArea<SVGBackend<'a>, Shift>;

impl From<Rgb> for RGBColor {
    fn from(color: Rgb) -> Self {
        RGBColor(color.0, color.1, color.2)
    }
}

/// One plotted line.
struct Series<'a> {
    label: &'a str,
    color: RGBColor,
    points: Vec<(f64, f64)>,
}

/// Titles and decorations of one panel.
struct PanelStyle {
    title: String,
    x_desc: &'static str,
    y_desc: &'static str,
    integer_x: bool,
    /// Put the series names in the legend.
    label_series: bool,
    legend: Option<SeriesLabelPosition>,
    /// Draw the `speedup = cores` line up to this core count.
    perfect_scaling: Option<f64>,
}

fn time_vs_cores(dataset: &AlgorithmDataset) -> Option<Series<'_>> {
    let rows = dataset.scaling.as_ref()?;
    Some(Series {
        label: dataset.algorithm.display_name(),
        color: dataset.color.into(),
        points: rows
            .iter()
            .map(|r| (f64::from(r.core_count), r.user_time_ms as f64))
            .collect(),
    })
}

fn speedup_vs_cores(dataset: &AlgorithmDataset) -> Option<Series<'_>> {
    let rows = dataset.scaling.as_ref()?;
    Some(Series {
        label: dataset.algorithm.display_name(),
        color: dataset.color.into(),
        points: rows
            .iter()
            .map(|r| (f64::from(r.core_count), r.speedup))
            .collect(),
    })
}

fn time_vs_size(dataset: &AlgorithmDataset) -> Option<Series<'_>> {
    let rows = dataset.performance.as_ref()?;
    Some(Series {
        label: dataset.algorithm.display_name(),
        color: dataset.color.into(),
        points: rows
            .iter()
            .map(|r| (r.input_size as f64, r.user_time_ms as f64))
            .collect(),
    })
}

/// Drop points a logarithmic axis cannot show.
fn positive_only(mut series: Series<'_>, x: bool, y: bool) -> Series<'_> {
    series
        .points
        .retain(|&(px, py)| (!x || px > 0.0) && (!y || py > 0.0));
    series
}

fn max_of(series: &[Series<'_>], pick: impl Fn(&(f64, f64)) -> f64) -> Option<f64> {
    series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(pick)
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
}

fn min_of(series: &[Series<'_>], pick: impl Fn(&(f64, f64)) -> f64) -> Option<f64> {
    series
        .iter()
        .flat_map(|s| s.points.iter())
        .map(pick)
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
}

/// `0 ..= max` with headroom, never collapsing to an empty range.
///
/// The bound stays finite: axis tick generation does not terminate on an
/// infinite range.
fn linear_range(max: Option<f64>) -> std::ops::Range<f64> {
    0.0..(max.unwrap_or(1.0) * 1.1).clamp(1.0, f64::MAX)
}

/// A decade-padded logarithmic range around the data.
fn log_range(min: Option<f64>, max: Option<f64>) -> std::ops::Range<f64> {
    match (min, max) {
        (Some(lo), Some(hi)) => (lo / 2.0)..(hi * 2.0).min(f64::MAX),
        _ => 1.0..10.0,
    }
}

fn cores_range(series: &[Series<'_>]) -> (std::ops::Range<f64>, f64) {
    let max_cores = max_of(series, |p| p.0).unwrap_or(DEFAULT_MAX_CORES);
    (0.0..max_cores + 1.0, max_cores)
}

fn integer_tick(x: &f64) -> String {
    if (x - x.round()).abs() < 1e-9 {
        format!("{x:.0}")
    } else {
        String::new()
    }
}

fn draw_panel<X, Y>(
    area: &Panel<'_>,
    style: PanelStyle,
    x_range: X,
    y_range: Y,
    series: &[Series<'_>],
) -> Result<()>
where
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(area)
        .caption(&style.title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_desc)
        .y_desc(style.y_desc)
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE));
    if style.integer_x {
        mesh.x_label_formatter(&integer_tick);
    }
    mesh.draw()?;

    for s in series {
        let color = s.color;
        let line = chart.draw_series(LineSeries::new(
            s.points.iter().copied(),
            color.stroke_width(LINE_WIDTH),
        ))?;
        if style.label_series {
            line.label(s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
            });
        }
        chart.draw_series(
            s.points
                .iter()
                .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
        )?;
    }

    if let Some(max_cores) = style.perfect_scaling {
        let reference = chart.draw_series(DashedLineSeries::new(
            vec![(0.0, 0.0), (max_cores, max_cores)],
            10,
            6,
            BLACK.stroke_width(1),
        ))?;
        if style.legend.is_some() {
            reference.label("Perfect Scaling").legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(1))
            });
        }
    }

    if let Some(position) = style.legend {
        chart
            .configure_series_labels()
            .position(position)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", AXIS_LABEL_FONT_SIZE))
            .draw()?;
    }

    Ok(())
}

fn draw_time_vs_cores(area: &Panel<'_>, title: String, series: &[Series<'_>], legend: bool) -> Result<()> {
    let (x_range, _) = cores_range(series);
    draw_panel(
        area,
        PanelStyle {
            title,
            x_desc: "Number of Cores",
            y_desc: "Execution Time (ms)",
            integer_x: true,
            label_series: legend,
            legend: (legend && !series.is_empty()).then_some(SeriesLabelPosition::UpperRight),
            perfect_scaling: None,
        },
        x_range,
        linear_range(max_of(series, |p| p.1)),
        series,
    )
}

fn draw_speedup_vs_cores(area: &Panel<'_>, title: String, series: &[Series<'_>], legend: bool) -> Result<()> {
    let (x_range, max_cores) = cores_range(series);
    let max_speedup = max_of(series, |p| p.1).unwrap_or(0.0).max(max_cores);
    draw_panel(
        area,
        PanelStyle {
            title,
            x_desc: "Number of Cores",
            y_desc: "Speedup",
            integer_x: true,
            label_series: legend,
            legend: Some(SeriesLabelPosition::UpperLeft),
            perfect_scaling: Some(max_cores),
        },
        x_range,
        linear_range(Some(max_speedup)),
        series,
    )
}

/// Draw the combined scaling chart: time and speedup against core count.
pub fn draw_scaling_chart(path: &Path, datasets: &[&AlgorithmDataset]) -> Result<()> {
    let times: Vec<Series<'_>> = datasets.iter().filter_map(|d| time_vs_cores(d)).collect();
    let speedups: Vec<Series<'_>> = datasets.iter().filter_map(|d| speedup_vs_cores(d)).collect();

    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));

    draw_time_vs_cores(
        &panels[0],
        "Execution Time vs. Number of Cores".into(),
        &times,
        true,
    )?;
    draw_speedup_vs_cores(
        &panels[1],
        "Speedup vs. Number of Cores".into(),
        &speedups,
        true,
    )?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Draw the combined performance chart: time against input size, log-log.
pub fn draw_performance_chart(path: &Path, datasets: &[&AlgorithmDataset]) -> Result<()> {
    let series: Vec<Series<'_>> = datasets
        .iter()
        .filter_map(|d| time_vs_size(d))
        .map(|s| positive_only(s, true, true))
        .collect();

    let root = SVGBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = log_range(min_of(&series, |p| p.0), max_of(&series, |p| p.0));
    let y_range = log_range(min_of(&series, |p| p.1), max_of(&series, |p| p.1));
    draw_panel(
        &root,
        PanelStyle {
            title: "Execution Time vs. Input Size".into(),
            x_desc: "Input Size",
            y_desc: "Execution Time (ms)",
            integer_x: false,
            label_series: true,
            legend: (!series.is_empty()).then_some(SeriesLabelPosition::UpperLeft),
            perfect_scaling: None,
        },
        x_range.log_scale(),
        y_range.log_scale(),
        &series,
    )?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Draw the three-panel chart of a single algorithm.
///
/// Panels whose table is missing are left blank.
pub fn draw_algorithm_chart(path: &Path, dataset: &AlgorithmDataset) -> Result<()> {
    let name = dataset.algorithm.display_name();

    let root = SVGBackend::new(path, (1200, 1000)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    if let (Some(time), Some(speedup)) = (time_vs_cores(dataset), speedup_vs_cores(dataset)) {
        draw_time_vs_cores(
            &panels[0],
            format!("{name} - Execution Time vs. Number of Cores"),
            std::slice::from_ref(&time),
            false,
        )?;
        draw_speedup_vs_cores(
            &panels[1],
            format!("{name} - Speedup vs. Number of Cores"),
            std::slice::from_ref(&speedup),
            false,
        )?;
    }

    if let Some(series) = time_vs_size(dataset).map(|s| positive_only(s, true, false)) {
        let x_range = log_range(
            min_of(std::slice::from_ref(&series), |p| p.0),
            max_of(std::slice::from_ref(&series), |p| p.0),
        );
        let y_range = linear_range(max_of(std::slice::from_ref(&series), |p| p.1));
        draw_panel(
            &panels[2],
            PanelStyle {
                title: format!("{name} - Execution Time vs. Input Size"),
                x_desc: "Input Size",
                y_desc: "Execution Time (ms)",
                integer_x: false,
                label_series: false,
                legend: None,
                perfect_scaling: None,
            },
            x_range.log_scale(),
            y_range,
            std::slice::from_ref(&series),
        )?;
    }

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
