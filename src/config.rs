use crate::{
    attrs::parse_with_bounds,
    log::{LogLevel, Logger},
};

pub const DEFAULT_RIPPLE_LIFETIME_MS: u32 = 600;
pub const DEFAULT_COPY_FEEDBACK_MS: u32 = 2_000;
pub const DEFAULT_TOOLTIP_GAP_PX: f64 = 10.0;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const RIPPLE_LIFETIME_MS_BOUNDS: (u32, u32) = (1, 10_000);
const COPY_FEEDBACK_MS_BOUNDS: (u32, u32) = (1, 60_000);
const TOOLTIP_GAP_PX_BOUNDS: (f64, f64) = (0.0, 200.0);

pub const LOG_LEVEL_ATTR: &str = "data-fx-log-level";
pub const RIPPLE_LIFETIME_ATTR: &str = "data-fx-ripple-ms";
pub const COPY_FEEDBACK_ATTR: &str = "data-fx-copy-feedback-ms";
pub const TOOLTIP_GAP_ATTR: &str = "data-fx-tooltip-gap";

/// Page-wide knobs, read once from attributes on the root element.
#[derive(Clone, Debug, PartialEq)]
pub struct FxConfig {
    pub ripple_lifetime_ms: u32,
    pub copy_feedback_ms: u32,
    pub tooltip_gap_px: f64,
    pub log_level: LogLevel,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            ripple_lifetime_ms: DEFAULT_RIPPLE_LIFETIME_MS,
            copy_feedback_ms: DEFAULT_COPY_FEEDBACK_MS,
            tooltip_gap_px: DEFAULT_TOOLTIP_GAP_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl FxConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let ripple_lifetime_ms = parse_with_bounds(
            lookup(RIPPLE_LIFETIME_ATTR).as_deref(),
            DEFAULT_RIPPLE_LIFETIME_MS,
            RIPPLE_LIFETIME_MS_BOUNDS,
        );
        let copy_feedback_ms = parse_with_bounds(
            lookup(COPY_FEEDBACK_ATTR).as_deref(),
            DEFAULT_COPY_FEEDBACK_MS,
            COPY_FEEDBACK_MS_BOUNDS,
        );
        let tooltip_gap_px = parse_with_bounds(
            lookup(TOOLTIP_GAP_ATTR).as_deref(),
            DEFAULT_TOOLTIP_GAP_PX,
            TOOLTIP_GAP_PX_BOUNDS,
        );
        let log_level = lookup(LOG_LEVEL_ATTR)
            .as_deref()
            .and_then(LogLevel::from_str)
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            ripple_lifetime_ms,
            copy_feedback_ms,
            tooltip_gap_px,
            log_level,
        }
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }
}
