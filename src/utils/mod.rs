pub mod svg;
pub mod format;
pub mod errors;
pub mod config;

pub use svg::Element;
pub use errors::ChartError;
pub use config::{ChartConfig, ChartLayout};
