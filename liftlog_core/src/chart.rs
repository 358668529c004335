//! SVG rendering of progression series.

use crate::ledger::capitalize;
use crate::projection::{DataPoint, Metric};
use crate::{Error, Result};
use chrono::Duration;
use plotters::prelude::*;

const BACKGROUND: RGBColor = RGBColor(0x0d, 0x0d, 0x0d);
const LINE: RGBColor = RGBColor(0x00, 0xbf, 0xff);
const GRID: RGBColor = RGBColor(0xbf, 0xbf, 0xbf);

const FONT: &str = "sans-serif";

/// Render a progression series as an SVG document
///
/// Returns `None` for an empty series. The y axis starts at zero and leaves
/// 10% headroom above the largest value; a single-day series is padded by a
/// day on both sides so the x axis has a width.
pub fn render_svg(
    title: &str,
    metric: Metric,
    series: &[DataPoint],
    (width, height): (u32, u32),
) -> Result<Option<String>> {
    if series.is_empty() {
        return Ok(None);
    }

    draw(title, metric, series, (width, height))
        .map(Some)
        .map_err(|e| Error::Chart(e.to_string()))
}

fn draw(
    title: &str,
    metric: Metric,
    series: &[DataPoint],
    size: (u32, u32),
) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let first = series.iter().map(|p| p.date).fold(series[0].date, std::cmp::min);
    let last = series.iter().map(|p| p.date).fold(series[0].date, std::cmp::max);
    let (first, last) = if first == last {
        (first - Duration::days(1), last + Duration::days(1))
    } else {
        (first, last)
    };

    let max = series.iter().map(|p| p.value).fold(0.0, f64::max);
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

    let mut result = String::new();
    {
        let root = SVGBackend::with_string(&mut result, size).into_drawing_area();
        root.fill(&BACKGROUND)?;

        let metric_label = capitalize(metric.as_str());
        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} Progression ({})", capitalize(title), metric_label),
                (FONT, 20).into_font().color(&WHITE),
            )
            .margin(10)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d(first..last, 0.0..y_max)?;

        chart
            .configure_mesh()
            .bold_line_style(GRID.mix(0.3))
            .light_line_style(GRID.mix(0.0))
            .axis_style(WHITE.mix(0.6))
            .label_style((FONT, 12).into_font().color(&WHITE))
            .x_desc("Date")
            .y_desc(metric_label)
            .x_label_formatter(&|d| d.format("%Y-%m-%d").to_string())
            .x_labels(series.len().clamp(2, 12))
            .draw()?;

        chart.draw_series(LineSeries::new(
            series.iter().map(|p| (p.date, p.value)),
            LINE.stroke_width(2),
        ))?;
        chart.draw_series(
            series
                .iter()
                .map(|p| Circle::new((p.date, p.value), 4, LINE.filled())),
        )?;

        root.present()?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(d: u32, value: f64) -> DataPoint {
        DataPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            value,
        }
    }

    #[test]
    fn test_empty_series_renders_nothing() {
        let svg = render_svg("chest", Metric::Volume, &[], (800, 480)).unwrap();
        assert!(svg.is_none());
    }

    #[test]
    fn test_renders_svg_document() {
        let series = vec![point(1, 1540.0), point(3, 1600.0), point(8, 1720.5)];
        let svg = render_svg("chest", Metric::Volume, &series, (800, 480))
            .unwrap()
            .unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Chest Progression (Volume)"));
    }

    #[test]
    fn test_single_point_series() {
        let svg = render_svg("squat", Metric::Weight, &[point(5, 100.0)], (400, 300)).unwrap();
        assert!(svg.is_some());
    }
}
