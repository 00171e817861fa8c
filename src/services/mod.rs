pub mod axis_service;
pub mod chart_service;
pub mod preview_service;
pub mod tooltip_service;

pub use chart_service::{ChartRenderer, RenderedChart};
