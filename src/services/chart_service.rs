use maud::{html, PreEscaped, Render, DOCTYPE};
use tracing::{debug, info, warn};

use crate::api::gdp::{GdpClient, GdpResponse};
use crate::models::{Bar, DataPoint, LinearScale, PointerEvent, Scales, TimeScale, TooltipState};
use crate::services::{axis_service, tooltip_service};
use crate::utils::format::format_number;
use crate::utils::{ChartError, ChartLayout, Element};

/// Stylesheet embedded in the standalone page
const PAGE_STYLE: &str = "\
body { font-family: sans-serif; }
#chart { position: relative; }
.bar { fill: #33adff; }
.bar:hover { fill: #0a0a23; }
#tooltip { position: absolute; opacity: 0; pointer-events: none; padding: 8px; \
background: #ffffcc; border: 1px solid #333; border-radius: 4px; font-size: 12px; }";

/// Turns a GDP dataset into an SVG chart with hover tooltip
pub struct ChartRenderer {
    layout: ChartLayout,
}

impl ChartRenderer {
    pub fn new(layout: ChartLayout) -> Self {
        ChartRenderer { layout }
    }

    /// Fetch the dataset from `source_url` and render it
    ///
    /// Fetch and parse failures propagate to the caller; there is no retry.
    pub async fn load_and_render(&self, source_url: &str) -> Result<RenderedChart, ChartError> {
        info!("📈 Loading dataset from {}", source_url);
        let response = GdpClient::new(source_url).fetch_dataset().await?;
        let dataset = parse_dataset(response)?;
        info!("Loaded {} data points", dataset.len());
        Ok(self.render(dataset))
    }

    /// x: [min date, max date] -> [padding, width - padding]
    /// y: [0, max value] -> [height - padding, padding]
    ///
    /// An empty dataset yields zero-width domains anchored at the epoch start and 0.
    pub fn compute_scales(&self, dataset: &[DataPoint]) -> Scales {
        let layout = &self.layout;

        let min_date = dataset.iter().map(|p| p.timestamp).min().unwrap_or_default();
        let max_date = dataset.iter().map(|p| p.timestamp).max().unwrap_or_default();
        let max_value = dataset
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_value = if max_value == f64::NEG_INFINITY { 0.0 } else { max_value };

        Scales {
            x: TimeScale::new(
                (min_date, max_date),
                (layout.padding, layout.width - layout.padding),
            ),
            y: LinearScale::new(
                (0.0, max_value),
                (layout.height - layout.padding, layout.padding),
            ),
        }
    }

    pub fn render_axes(&self, scales: &Scales) -> (Element, Element) {
        axis_service::render_axes(scales, &self.layout)
    }

    /// One bar per data point, laid out by index
    pub fn render_bars(&self, dataset: &[DataPoint], scales: &Scales) -> Vec<Bar> {
        let layout = &self.layout;
        let bar_width = (layout.width - 2.0 * layout.padding) / dataset.len() as f64;
        let baseline = layout.height - layout.padding;

        dataset
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let y = scales.y.apply(point.value);
                Bar {
                    date: point.date.clone(),
                    value: point.value,
                    x: layout.padding + i as f64 * bar_width,
                    y,
                    width: bar_width - layout.bar_padding,
                    height: baseline - y,
                }
            })
            .collect()
    }

    /// Scales, axes, bars, and a hidden tooltip
    pub fn render(&self, dataset: Vec<DataPoint>) -> RenderedChart {
        let scales = self.compute_scales(&dataset);
        debug!("x domain {:?}, y domain {:?}", scales.x.domain(), scales.y.domain());

        let (x_axis, y_axis) = self.render_axes(&scales);
        let bars = self.render_bars(&dataset, &scales);

        let mut svg = Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", format_number(self.layout.width))
            .attr("height", format_number(self.layout.height))
            .child(x_axis)
            .child(y_axis);
        for bar in &bars {
            svg.append(bar.element());
        }
        debug!("Rendered {} bars", bars.len());

        RenderedChart {
            layout: self.layout,
            dataset,
            scales,
            bars,
            svg,
            tooltip: TooltipState::new(),
        }
    }
}

/// Convert the raw response into data points, rejecting an empty dataset
pub fn parse_dataset(response: GdpResponse) -> Result<Vec<DataPoint>, ChartError> {
    if response.data.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    response
        .data
        .into_iter()
        .enumerate()
        .map(|(i, pair)| DataPoint::from_pair(i, pair))
        .collect()
}

/// A finished chart. Owns the tooltip that pointer events mutate.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub layout: ChartLayout,
    pub dataset: Vec<DataPoint>,
    pub scales: Scales,
    pub bars: Vec<Bar>,
    pub svg: Element,
    pub tooltip: TooltipState,
}

impl RenderedChart {
    /// Route a pointer event to its handler
    pub fn dispatch(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Over(index) => match self.bars.get(index) {
                Some(bar) => tooltip_service::on_hover(&mut self.tooltip, bar),
                None => warn!("Pointer over unknown bar {}", index),
            },
            PointerEvent::Move(pointer) => tooltip_service::on_move(&mut self.tooltip, pointer),
            PointerEvent::Out => tooltip_service::on_leave(&mut self.tooltip),
        }
    }

    pub fn to_svg(&self) -> String {
        self.svg.render().into_string()
    }

    /// Standalone page with the chart and the tooltip in its current state
    pub fn to_html(&self) -> String {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { "United States GDP" }
                    style { (PreEscaped(PAGE_STYLE)) }
                }
                body {
                    div id="chart" { (self.svg) }
                    (self.tooltip.element())
                }
            }
        }
        .into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pointer;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn dataset(pairs: &[(&str, f64)]) -> Vec<DataPoint> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (d, v))| DataPoint::from_pair(i, (d.to_string(), *v)).expect("valid pair"))
            .collect()
    }

    fn renderer() -> ChartRenderer {
        ChartRenderer::new(ChartLayout::default())
    }

    /// Serve one canned HTTP response on a local port and return its URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/GDP-data.json", addr)
    }

    #[test]
    fn test_two_point_example() {
        let data = dataset(&[("1947-01-01", 243.1), ("1947-04-01", 246.3)]);
        let renderer = renderer();
        let scales = renderer.compute_scales(&data);
        let bars = renderer.render_bars(&data, &scales);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].x, 60.0);
        assert_eq!(bars[1].x, 400.0);
        assert_eq!(bars[0].width, 339.0);
        assert_eq!(scales.y.apply(0.0), 340.0);
        assert!((scales.y.apply(246.3) - 60.0).abs() < 1e-9);
        assert!((bars[1].height - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_domains_follow_dataset() {
        let data = dataset(&[("1950-01-01", 300.0), ("1947-01-01", 243.1), ("1960-07-01", 540.2)]);
        let scales = renderer().compute_scales(&data);

        assert_eq!(scales.x.domain().0, data[1].timestamp);
        assert_eq!(scales.x.domain().1, data[2].timestamp);
        assert_eq!(scales.y.domain(), (0.0, 540.2));
        assert_eq!(scales.x.range(), (60.0, 740.0));
        assert_eq!(scales.y.range(), (340.0, 60.0));
    }

    #[test]
    fn test_bars_match_dataset() {
        let data = dataset(&[
            ("1947-01-01", 243.1),
            ("1947-04-01", 246.3),
            ("1947-07-01", 250.1),
            ("1947-10-01", 260.3),
            ("1948-01-01", 266.2),
        ]);
        let chart = renderer().render(data.clone());

        let rects = chart.svg.select_all_by_class("bar");
        assert_eq!(rects.len(), data.len());
        assert_eq!(chart.bars.len(), data.len());

        for (rect, point) in rects.iter().zip(&data) {
            assert_eq!(rect.get_attr("data-date"), Some(point.date.as_str()));
            assert_eq!(rect.get_attr("data-gdp"), Some(format_number(point.value).as_str()));
            let parsed: f64 = rect.get_attr("data-gdp").and_then(|v| v.parse().ok()).expect("numeric");
            assert_eq!(parsed, point.value);
        }
    }

    #[test]
    fn test_heights_increase_with_value() {
        let data = dataset(&[
            ("1947-01-01", 0.0),
            ("1947-04-01", 100.0),
            ("1947-07-01", 50.0),
            ("1947-10-01", 400.0),
        ]);
        let renderer = renderer();
        let scales = renderer.compute_scales(&data);
        let mut bars = renderer.render_bars(&data, &scales);

        assert!(bars.iter().all(|b| b.height >= 0.0));
        bars.sort_by(|a, b| a.value.total_cmp(&b.value));
        for pair in bars.windows(2) {
            assert!(pair[1].height > pair[0].height);
            assert!(pair[1].y < pair[0].y);
        }
    }

    #[test]
    fn test_svg_structure() {
        let chart = renderer().render(dataset(&[("1947-01-01", 243.1), ("1947-04-01", 246.3)]));

        assert_eq!(chart.svg.get_attr("width"), Some("800"));
        assert_eq!(chart.svg.get_attr("height"), Some("400"));
        assert!(chart.svg.find_by_id("x-axis").is_some());
        assert!(chart.svg.find_by_id("y-axis").is_some());

        let html = chart.to_html();
        assert!(html.contains("<div id=\"chart\"><svg"));
        assert!(html.contains("<div id=\"tooltip\" style=\"opacity: 0;\"></div>"));
    }

    #[test]
    fn test_dispatch_pointer_events() {
        let mut chart = renderer().render(dataset(&[("1947-01-01", 243.1), ("2015-07-01", 18064.7)]));

        chart.dispatch(PointerEvent::Over(1));
        chart.dispatch(PointerEvent::Move(Pointer { page_x: 100.0, page_y: 100.0 }));
        assert_eq!(chart.tooltip.opacity, 1.0);
        assert!(chart.tooltip.content.contains("2015-07-01"));
        assert!(chart.tooltip.content.contains("$18,064.7 Billion"));
        assert_eq!(chart.tooltip.left, Some(110.0));
        assert_eq!(chart.tooltip.top, Some(60.0));

        chart.dispatch(PointerEvent::Out);
        assert_eq!(chart.tooltip.opacity, 0.0);

        // Out-of-range index is ignored
        chart.dispatch(PointerEvent::Over(7));
        assert_eq!(chart.tooltip.opacity, 0.0);
    }

    #[test]
    fn test_parse_dataset_errors() {
        let empty = GdpResponse { data: Vec::new() };
        assert!(matches!(parse_dataset(empty), Err(ChartError::EmptyDataset)));

        let bad = GdpResponse {
            data: vec![("1947-01-01".to_string(), 1.0), ("not a date".to_string(), 2.0)],
        };
        assert!(matches!(
            parse_dataset(bad),
            Err(ChartError::InvalidDate { index: 1, .. })
        ));
    }

    #[test]
    fn test_negative_values_keep_true_max() {
        let data = dataset(&[("1947-01-01", -5.0), ("1947-04-01", -2.0)]);
        let renderer = renderer();
        let scales = renderer.compute_scales(&data);
        let bars = renderer.render_bars(&data, &scales);

        assert_eq!(scales.y.domain(), (0.0, -2.0));
        assert_eq!(bars[1].y, 60.0);
        assert_ne!(bars[0].height, bars[1].height);
    }

    #[tokio::test]
    async fn test_load_and_render_reports_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let err = renderer()
            .load_and_render(&format!("http://{}/GDP-data.json", addr))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::Api(crate::api::gdp::ApiError::RequestError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_and_render_from_server() {
        let url = serve_once(
            "200 OK",
            r#"{"name":"GDP","data":[["1947-01-01",243.1],["1947-04-01",246.3]]}"#,
        )
        .await;

        let chart = renderer().load_and_render(&url).await.expect("chart renders");
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[1].x, 400.0);
    }

    #[tokio::test]
    async fn test_load_and_render_rejects_invalid_json() {
        let url = serve_once("200 OK", "<html>not json</html>").await;

        let err = renderer().load_and_render(&url).await.unwrap_err();
        assert!(matches!(
            err,
            ChartError::Api(crate::api::gdp::ApiError::DeserializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_load_and_render_reports_http_status() {
        let url = serve_once("404 Not Found", "missing").await;

        let err = renderer().load_and_render(&url).await.unwrap_err();
        assert!(matches!(
            err,
            ChartError::Api(crate::api::gdp::ApiError::HttpError(404, _))
        ));
    }
}
