use std::path::PathBuf;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use plotters::prelude::*;

use crate::models::DataPoint;
use crate::utils::format::format_grouped;
use crate::utils::{ChartError, ChartLayout};

const BAR_COLOR: RGBColor = RGBColor(0x33, 0xad, 0xff);

fn to_utc(date: NaiveDate) -> Result<DateTime<Utc>, ChartError> {
    let naive_dt = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ChartError::Render(format!("Invalid timestamp for {}", date)))?;
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive_dt, Utc))
}

/// Per-process, per-millisecond scratch path for the bitmap backend
fn temp_png_path() -> PathBuf {
    std::env::temp_dir().join(format!(
        "gdp_chart_{}_{}.png",
        std::process::id(),
        Utc::now().timestamp_millis()
    ))
}

/// Generate a raster preview of the bars as PNG bytes
pub fn render_png(dataset: &[DataPoint], layout: &ChartLayout) -> Result<Vec<u8>, ChartError> {
    if dataset.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let timestamps = dataset
        .iter()
        .map(|p| to_utc(p.timestamp))
        .collect::<Result<Vec<_>, _>>()?;

    let x_min = timestamps.iter().min().copied().unwrap_or_else(Utc::now);
    let last = timestamps.iter().max().copied().unwrap_or(x_min);
    // Last bar spans one average gap, or a day for a single point
    let gap = if timestamps.len() > 1 {
        (last - x_min) / (timestamps.len() as i32 - 1)
    } else {
        Duration::days(1)
    };
    let x_max = last + gap;

    let max_value = dataset.iter().map(|p| p.value).fold(0.0, f64::max);
    let y_max = if max_value > 0.0 { max_value * 1.05 } else { 1.0 };

    let temp_file = temp_png_path();

    {
        let backend = BitMapBackend::new(&temp_file, (layout.width as u32, layout.height as u32));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("United States GDP", ("sans-serif", 24.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(layout.padding as u32)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(10)
            .x_label_formatter(&|t| t.format("%Y").to_string())
            .y_label_formatter(&|v| format_grouped(*v, 0))
            .y_desc("Gross Domestic Product (billions)")
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

        let bars = timestamps.iter().enumerate().map(|(i, start)| {
            let end = timestamps.get(i + 1).copied().unwrap_or(x_max);
            Rectangle::new([(*start, 0.0), (end, dataset[i].value)], BAR_COLOR.filled())
        });
        chart
            .draw_series(bars)
            .map_err(|e| ChartError::Render(format!("Failed to draw bars: {}", e)))?;

        root.present()
            .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;
    }

    let image_data = std::fs::read(&temp_file);
    let _ = std::fs::remove_file(&temp_file);

    Ok(image_data?)
}
