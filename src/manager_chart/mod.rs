use std::path::Path;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;
use crate::rain::{format_mm, DailyRain};

const WIDTH_PX: u32 = 400;
const HEIGHT_PX: u32 = 300;
const FONT_FAMILY: &str = "sans-serif";
const LABEL_FONT_SIZE: i32 = 12;
const BAR_MARGIN_PX: u32 = 10;

/// Seaborn's pastel palette, first four entries
const PALETTE: [RGBColor; 4] = [
    RGBColor(161, 201, 244),
    RGBColor(255, 180, 130),
    RGBColor(141, 229, 161),
    RGBColor(255, 159, 155),
];

/// Renders a bar chart of daily rain and writes it as PNG to the given path
///
/// # Arguments
///
/// * 'daily' - rain totals per day, oldest first
/// * 'path' - path of the PNG file to write
pub fn render_rain_chart(daily: &[DailyRain], path: &Path) -> Result<(), ChartError> {
    if daily.is_empty() {
        return Err(ChartError::NoData);
    }

    let labels = daily.iter()
        .map(|d| d.date.format("%b %-d").to_string())
        .collect::<Vec<String>>();
    let last = daily.len() - 1;

    let root = BitMapBackend::new(path, (WIDTH_PX, HEIGHT_PX)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawError(format!("background fill: {:?}", e)))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d((0usize..last).into_segmented(), 0f64..y_upper_bound(daily))
        .map_err(|e| ChartError::DrawError(format!("chart build: {:?}", e)))?;

    chart.configure_mesh()
        .disable_x_mesh()
        .x_labels(daily.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Rain (mm)")
        .draw()
        .map_err(|e| ChartError::DrawError(format!("mesh: {:?}", e)))?;

    chart.draw_series(daily.iter().enumerate().map(|(i, d)| {
        let right = if i < last { SegmentValue::Exact(i + 1) } else { SegmentValue::Last };
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (right, d.total)],
            PALETTE[i % PALETTE.len()].filled(),
        );
        bar.set_margin(0, 0, BAR_MARGIN_PX, BAR_MARGIN_PX);
        bar
    }))
        .map_err(|e| ChartError::DrawError(format!("bars: {:?}", e)))?;

    let label_style = TextStyle::from((FONT_FAMILY, LABEL_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    chart.draw_series(daily.iter().enumerate().map(|(i, d)| {
        Text::new(bar_label(d.total), (SegmentValue::CenterOf(i), label_height(d.total)), label_style.clone())
    }))
        .map_err(|e| ChartError::DrawError(format!("bar labels: {:?}", e)))?;

    root.present()
        .map_err(|e| ChartError::DrawError(format!("write {}: {:?}", path.display(), e)))?;

    Ok(())
}

/// Returns the y-axis upper bound, leaving some headroom above the highest bar
///
/// # Arguments
///
/// * 'daily' - rain totals per day
fn y_upper_bound(daily: &[DailyRain]) -> f64 {
    let max = daily.iter().map(|d| d.total).fold(0f64, f64::max);

    f64::max(5.0, max + 2.0)
}

/// Returns where to put the value label of a bar, inside tall bars and above short ones
///
/// # Arguments
///
/// * 'total' - height of the bar
fn label_height(total: f64) -> f64 {
    if total > 3.0 {
        total - 0.8
    } else {
        total + 0.2
    }
}

/// Bar value as text, cut to at most four characters
///
/// # Arguments
///
/// * 'total' - the value to print
fn bar_label(total: f64) -> String {
    format_mm(total).chars().take(4).collect()
}

/// Error depicting errors that occur while rendering the rain chart
///
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("NoData: nothing to draw")]
    NoData,
    #[error("DrawError: {0}")]
    DrawError(String),
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use super::*;

    fn daily(totals: &[f64]) -> Vec<DailyRain> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        totals.iter()
            .zip(start.iter_days())
            .map(|(total, date)| DailyRain { date, total: *total })
            .collect()
    }

    #[test]
    fn y_bound_is_at_least_five() {
        assert_eq!(y_upper_bound(&daily(&[0.0, 0.0, 0.0, 0.0])), 5.0);
        assert_eq!(y_upper_bound(&daily(&[1.0, 2.5, 0.0, 0.0])), 5.0);
    }

    #[test]
    fn y_bound_leaves_headroom_above_max() {
        assert_eq!(y_upper_bound(&daily(&[1.0, 4.0, 0.0, 0.0])), 6.0);
        assert_eq!(y_upper_bound(&daily(&[12.5, 4.0, 0.0, 0.0])), 14.5);
    }

    #[test]
    fn label_goes_inside_tall_bars() {
        assert!((label_height(10.0) - 9.2).abs() < 1e-9);
        assert!((label_height(3.0) - 3.2).abs() < 1e-9);
        assert!((label_height(0.0) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn label_is_cut_to_four_characters() {
        assert_eq!(bar_label(0.0), "0");
        assert_eq!(bar_label(1.0), "1.0");
        assert_eq!(bar_label(12.0), "12.0");
        assert_eq!(bar_label(120.0), "120.");
        assert_eq!(bar_label(1.25), "1.25");
        assert_eq!(bar_label(12.34), "12.3");
        assert_eq!(bar_label(123.45), "123.");
    }

    #[test]
    fn renders_png_for_four_days() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rain.png");

        render_rain_chart(&daily(&[1.0, 4.5, 0.0, 2.25]), &path).expect("chart should render");

        let bytes = std::fs::read(&path).expect("chart file");
        assert!(bytes.len() > 8);
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn empty_input_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = render_rain_chart(&[], &dir.path().join("rain.png"));
        assert!(matches!(result, Err(ChartError::NoData)));
    }
}
