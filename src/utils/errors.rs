use thiserror::Error;

use crate::api::gdp::ApiError;

/// Errors raised while loading or rendering the chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to load dataset: {0}")]
    Api(#[from] ApiError),
    #[error("Dataset is empty")]
    EmptyDataset,
    #[error("Invalid date '{date}' at index {index}")]
    InvalidDate { index: usize, date: String },
    #[error("Render error: {0}")]
    Render(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
