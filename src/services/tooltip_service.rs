use maud::html;
use tracing::trace;

use crate::models::{Bar, Pointer, TooltipState};
use crate::utils::format::format_locale;

/// Horizontal offset of the tooltip from the pointer
pub const TOOLTIP_OFFSET_X: f64 = 10.0;
/// Vertical offset of the tooltip from the pointer
pub const TOOLTIP_OFFSET_Y: f64 = -40.0;

/// Tooltip markup for a bar: `<strong>DATE</strong><br>$VALUE Billion`
pub fn tooltip_text(bar: &Bar) -> String {
    html! {
        strong { (bar.date) }
        br;
        "$" (format_locale(bar.value)) " Billion"
    }
    .into_string()
}

/// Pointer entered a bar: show the tooltip with the bar's details
pub fn on_hover(tooltip: &mut TooltipState, bar: &Bar) {
    trace!("hover bar {}", bar.date);
    tooltip.opacity = 1.0;
    tooltip.data_date = Some(bar.date.clone());
    tooltip.content = tooltip_text(bar);
}

/// Pointer moved: keep the tooltip next to it
pub fn on_move(tooltip: &mut TooltipState, pointer: Pointer) {
    tooltip.left = Some(pointer.page_x + TOOLTIP_OFFSET_X);
    tooltip.top = Some(pointer.page_y + TOOLTIP_OFFSET_Y);
}

/// Pointer left the bar: hide the tooltip
pub fn on_leave(tooltip: &mut TooltipState) {
    tooltip.opacity = 0.0;
}
