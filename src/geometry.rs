#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Offset of a viewport point from this rect's top-left corner.
    pub fn local_offset(&self, point: Point) -> Point {
        Point {
            x: point.x - self.left,
            y: point.y - self.top,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_client(client_x: i32, client_y: i32) -> Self {
        Self {
            x: f64::from(client_x),
            y: f64::from(client_y),
        }
    }
}

/// Formats a length the way the browser prints a number: `100px`, `12.5px`,
/// never `-0px`.
pub fn css_px(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}
