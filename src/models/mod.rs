//! Data models for the chart pipeline
//!
//! Plain data carried between the fetch, scale, render and event stages.

pub mod chart;
pub mod scale;
pub mod tooltip;

pub use chart::{Bar, DataPoint};
pub use scale::{LinearScale, TimeScale};
pub use tooltip::{Pointer, PointerEvent, TooltipState};

/// The two scales derived from a dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}
