use crate::geometry::{css_px, Rect};

pub const TOOLTIP_ATTR: &str = "data-tooltip";
pub const TOOLTIP_SELECTOR: &str = "[data-tooltip]";
pub const TOOLTIP_CLASS: &str = "tooltip";

/// Anchors the tooltip's bottom-centre on the placement point.
pub const TOOLTIP_TRANSFORM: &str = "translate(-50%, -100%)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
}

impl TooltipPlacement {
    /// Horizontally centred over the trigger, `gap` pixels above its top edge.
    pub fn above(trigger: Rect, gap: f64) -> Self {
        Self {
            left: trigger.center_x(),
            top: trigger.top - gap,
        }
    }

    pub fn show_declarations(&self) -> [(&'static str, String); 4] {
        [
            ("left", css_px(self.left)),
            ("top", css_px(self.top)),
            ("transform", TOOLTIP_TRANSFORM.to_string()),
            ("opacity", "1".to_string()),
        ]
    }
}

pub fn hide_declaration() -> (&'static str, &'static str) {
    ("opacity", "0")
}
