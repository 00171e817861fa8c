//! Tooltip and pointer models

use crate::utils::format::format_number;
use crate::utils::Element;

/// Page coordinates of the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub page_x: f64,
    pub page_y: f64,
}

/// Pointer events a rendered chart reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer entered the bar with this index
    Over(usize),
    Move(Pointer),
    Out,
}

/// The single floating tooltip element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    pub opacity: f64,
    /// Inner markup
    pub content: String,
    /// Date of the last hovered bar
    pub data_date: Option<String>,
    pub left: Option<f64>,
    pub top: Option<f64>,
}

impl TooltipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// `<div id="tooltip">` in its current state
    pub fn element(&self) -> Element {
        let mut el = Element::new("div").attr("id", "tooltip");
        if let Some(date) = &self.data_date {
            el.set_attr("data-date", date);
        }
        el.set_style("opacity", format_number(self.opacity));
        if let Some(left) = self.left {
            el.set_style("left", format!("{}px", format_number(left)));
        }
        if let Some(top) = self.top {
            el.set_style("top", format!("{}px", format_number(top)));
        }
        el.set_html(&self.content);
        el
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maud::Render;

    #[test]
    fn test_initial_tooltip_is_hidden() {
        let tooltip = TooltipState::new();
        assert!(!tooltip.is_visible());
        assert_eq!(
            tooltip.element().render().into_string(),
            "<div id=\"tooltip\" style=\"opacity: 0;\"></div>"
        );
    }
}
