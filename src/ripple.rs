use crate::{
    geometry::{css_px, Point, Rect},
    timer::{PendingTimers, Scheduler},
};

pub const RIPPLE_TRIGGER_SELECTOR: &str = ".btn, .action-btn";
pub const RIPPLE_CLASS: &str = "ripple";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl RippleGeometry {
    /// Square covering the control, centred on the click point.
    pub fn new(control: Rect, click: Point) -> Self {
        let size = control.longest_side();
        let local = control.local_offset(click);

        Self {
            size,
            left: local.x - size / 2.0,
            top: local.y - size / 2.0,
        }
    }

    pub fn style_declarations(&self) -> [(&'static str, String); 4] {
        [
            ("width", css_px(self.size)),
            ("height", css_px(self.size)),
            ("left", css_px(self.left)),
            ("top", css_px(self.top)),
        ]
    }
}

/// Owns the removal timers of every ripple still on screen.
pub struct RippleEffect<S: Scheduler> {
    timers: PendingTimers<S>,
    lifetime_ms: u32,
}

impl<S: Scheduler> Clone for RippleEffect<S> {
    fn clone(&self) -> Self {
        Self {
            timers: self.timers.clone(),
            lifetime_ms: self.lifetime_ms,
        }
    }
}

impl<S: Scheduler> RippleEffect<S> {
    pub fn new(scheduler: S, lifetime_ms: u32) -> Self {
        Self {
            timers: PendingTimers::new(scheduler),
            lifetime_ms,
        }
    }

    /// Schedules `remove` once the ripple's lifetime has elapsed. Earlier
    /// ripples are left alone.
    pub fn expire(&self, remove: impl FnOnce() + 'static) {
        self.timers.schedule(self.lifetime_ms, remove);
    }

    pub fn live(&self) -> usize {
        self.timers.len()
    }
}
