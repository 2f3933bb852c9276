use crate::geometry::{css_px, Point, Rect};

pub const LESSON_CARD_SELECTOR: &str = ".lesson-card";
pub const MOUSE_X_PROPERTY: &str = "--mouse-x";
pub const MOUSE_Y_PROPERTY: &str = "--mouse-y";

/// Custom properties published on a card for a pointer at `client`.
pub fn pointer_properties(card: Rect, client: Point) -> [(&'static str, String); 2] {
    let offset = card.local_offset(client);
    [
        (MOUSE_X_PROPERTY, css_px(offset.x)),
        (MOUSE_Y_PROPERTY, css_px(offset.y)),
    ]
}
