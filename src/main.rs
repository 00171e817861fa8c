use std::fs;
use std::process::ExitCode;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

mod api;
mod models;
mod services;
mod utils;

use services::{preview_service, ChartRenderer, RenderedChart};
use utils::{ChartConfig, ChartError};

/// Write `chart.svg`, `index.html` and optionally `chart.png` into the output directory
fn write_artifacts(config: &ChartConfig, chart: &RenderedChart) -> Result<(), ChartError> {
    fs::create_dir_all(&config.output_dir)?;

    let svg_path = config.output_dir.join("chart.svg");
    fs::write(&svg_path, chart.to_svg())?;
    info!("Wrote {}", svg_path.display());

    let html_path = config.output_dir.join("index.html");
    fs::write(&html_path, chart.to_html())?;
    info!("Wrote {}", html_path.display());

    if config.png_preview {
        // Preview is best-effort; the chart itself is already written
        match preview_service::render_png(&chart.dataset, &chart.layout) {
            Ok(bytes) => {
                let png_path = config.output_dir.join("chart.png");
                fs::write(&png_path, bytes)?;
                info!("Wrote {}", png_path.display());
            }
            Err(e) => warn!("Skipping PNG preview: {}", e),
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["gdp_chart=debug", "reqwest=warn", "hyper=warn"] {
        match directive.parse::<tracing_subscriber::filter::Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("Invalid log directive '{}': {}", directive, e),
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📊 Starting gdp-chart...");
    let config = ChartConfig::from_env();

    let renderer = ChartRenderer::new(config.layout);
    let chart = match renderer.load_and_render(&config.source_url).await {
        Ok(chart) => chart,
        Err(e) => {
            error!("Failed to render chart: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_artifacts(&config, &chart) {
        error!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    info!("✅ Rendered {} bars into {}", chart.bars.len(), config.output_dir.display());
    ExitCode::SUCCESS
}
