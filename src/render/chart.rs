//! SVG drawing of [`ScatterChart`]s with plotters.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use super::ScatterChart;
use crate::error::{KeplerError, Result};

pub const DEFAULT_SIZE: (u32, u32) = (960, 600);

const MARKER_SIZE: i32 = 6;

/// Marker shapes cycled through so neighbouring planets stay distinguishable
/// even where the palette colours are close.
#[derive(Debug, Clone, Copy)]
enum Marker {
    Circle,
    Triangle,
    Cross,
}

impl Marker {
    fn for_series(index: usize) -> Self {
        match index % 3 {
            0 => Self::Circle,
            1 => Self::Triangle,
            _ => Self::Cross,
        }
    }
}

fn chart_error(e: impl std::fmt::Display) -> KeplerError {
    KeplerError::Chart(e.to_string())
}

/// Axis range covering every value with 5% padding on each side.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        max.abs().max(1.0) * 0.05
    };
    (min - pad)..(max + pad)
}

impl ScatterChart {
    fn bounds(&self) -> (Range<f64>, Range<f64>) {
        let points = || self.series.iter().flat_map(|s| s.points.iter());
        (
            padded_range(points().map(|p| p.0)),
            padded_range(points().map(|p| p.1)),
        )
    }
}

/// Draw `chart` and return the SVG document.
pub fn draw_svg(chart: &ScatterChart, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let (x_range, y_range) = chart.bounds();
        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(90)
            .build_cartesian_2d(x_range, y_range)
            .map_err(chart_error)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|v| format!("{:.2e}", v))
            .y_label_formatter(&|v| format!("{:.2e}", v))
            .axis_desc_style(("sans-serif", 16))
            .label_style(("sans-serif", 12))
            .draw()
            .map_err(chart_error)?;

        for (index, series) in chart.series.iter().enumerate() {
            let style = Palette99::pick(index).filled();
            let points = series.points.iter().copied();
            let name = series.name.as_str();

            match Marker::for_series(index) {
                Marker::Circle => {
                    ctx.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, style)))
                        .map_err(chart_error)?
                        .label(name)
                        .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, style));
                }
                Marker::Triangle => {
                    ctx.draw_series(points.map(|p| TriangleMarker::new(p, MARKER_SIZE, style)))
                        .map_err(chart_error)?
                        .label(name)
                        .legend(move |(x, y)| TriangleMarker::new((x, y), MARKER_SIZE, style));
                }
                Marker::Cross => {
                    ctx.draw_series(points.map(|p| Cross::new(p, MARKER_SIZE, style)))
                        .map_err(chart_error)?
                        .label(name)
                        .legend(move |(x, y)| Cross::new((x, y), MARKER_SIZE, style));
                }
            }
        }

        if !chart.series.is_empty() {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 14))
                .draw()
                .map_err(chart_error)?;
        }

        root.present().map_err(chart_error)?;
    }
    Ok(svg)
}

/// Draw `chart` into an SVG file at `path`.
pub fn write_svg(chart: &ScatterChart, size: (u32, u32), path: &Path) -> Result<()> {
    let svg = draw_svg(chart, size)?;
    std::fs::write(path, svg)?;
    tracing::info!("Wrote chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ScatterSeries;

    fn chart(names: &[&str]) -> ScatterChart {
        ScatterChart {
            title: "Kepler's third law: Sol".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: names
                .iter()
                .enumerate()
                .map(|(i, name)| ScatterSeries {
                    name: name.to_string(),
                    points: vec![(i as f64, (i * i) as f64)],
                })
                .collect(),
        }
    }

    #[test]
    fn padded_range_pads_both_sides() {
        let range = padded_range([0.0, 10.0].into_iter());
        assert!((range.start + 0.5).abs() < 1e-9);
        assert!((range.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn padded_range_handles_single_value_and_empty_input() {
        let range = padded_range([100.0].into_iter());
        assert!(range.start < 100.0 && range.end > 100.0);

        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
    }

    #[test]
    fn svg_has_a_legend_entry_per_planet() {
        let svg = draw_svg(&chart(&["Mercury", "Venus", "Earth", "Mars"]), DEFAULT_SIZE).unwrap();

        assert!(svg.contains("<svg"));
        for name in ["Mercury", "Venus", "Earth", "Mars"] {
            assert!(svg.contains(name), "missing legend entry for {}", name);
        }
    }

    #[test]
    fn write_svg_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sol.svg");

        write_svg(&chart(&["Earth"]), DEFAULT_SIZE, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Earth"));
    }

    #[test]
    fn empty_chart_still_draws() {
        let svg = draw_svg(&chart(&[]), DEFAULT_SIZE).unwrap();
        assert!(svg.contains("</svg>"));
    }
}
