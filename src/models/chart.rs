//! Chart data models

use chrono::NaiveDate;

use crate::utils::format::format_number;
use crate::utils::{ChartError, Element};

/// One observation of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Date string exactly as received
    pub date: String,
    pub timestamp: NaiveDate,
    /// GDP in billions of dollars
    pub value: f64,
}

impl DataPoint {
    /// Build from a raw `[date, value]` pair; `index` is only used for error reporting
    pub fn from_pair(index: usize, (date, value): (String, f64)) -> Result<Self, ChartError> {
        let timestamp = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| ChartError::InvalidDate { index, date: date.clone() })?;
        Ok(DataPoint { date, timestamp, value })
    }
}

/// A rendered rectangle, one per data point
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bar {
    pub fn element(&self) -> Element {
        Element::new("rect")
            .attr("class", "bar")
            .attr("x", format_number(self.x))
            .attr("y", format_number(self.y))
            .attr("width", format_number(self.width))
            .attr("height", format_number(self.height))
            .attr("data-date", &self.date)
            .attr("data-gdp", format_number(self.value))
    }
}
