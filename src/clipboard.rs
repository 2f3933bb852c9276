use crate::{
    log::{LogLevel, Logger},
    timer::{PendingTimers, Scheduler},
};
use serde_json::json;

pub const COPY_GLOBAL_NAME: &str = "copyToClipboard";

pub const CONFIRMATION_MARKUP: &str = concat!(
    r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" "#,
    r#"stroke-width="2" stroke-linecap="round" stroke-linejoin="round">"#,
    r#"<path d="M20 6L9 17l-5-5" /></svg><span>Copied!</span>"#,
);

/// Anything whose markup can be read and swapped out, such as a button.
pub trait MarkupSurface {
    fn markup(&self) -> String;

    fn set_markup(&self, markup: &str);
}

/// Temporary "Copied!" state shown on a control after a successful write.
pub struct CopyFeedback<S: Scheduler> {
    timers: PendingTimers<S>,
    duration_ms: u32,
}

impl<S: Scheduler> Clone for CopyFeedback<S> {
    fn clone(&self) -> Self {
        Self {
            timers: self.timers.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

impl<S: Scheduler> CopyFeedback<S> {
    pub fn new(scheduler: S, duration_ms: u32) -> Self {
        Self {
            timers: PendingTimers::new(scheduler),
            duration_ms,
        }
    }

    /// Swaps in the confirmation and restores the captured markup once the
    /// feedback window closes.
    pub fn confirm<T>(&self, target: T)
    where
        T: MarkupSurface + 'static,
    {
        let original = target.markup();
        target.set_markup(CONFIRMATION_MARKUP);
        self.timers
            .schedule(self.duration_ms, move || target.set_markup(&original));
    }

    /// Applies the outcome of a clipboard write. A rejected write is logged
    /// and leaves the control as it was.
    pub fn settle<T>(&self, result: Result<(), String>, target: T, logger: &Logger)
    where
        T: MarkupSurface + 'static,
    {
        match result {
            Ok(()) => self.confirm(target),
            Err(error) => logger.event(
                LogLevel::Error,
                "clipboard_write_failed",
                json!({ "error": error }),
            ),
        }
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DEFAULT_COPY_FEEDBACK_MS, timer::ManualScheduler};
    use std::{cell::RefCell, rc::Rc};

    #[derive(Clone, Default)]
    struct FakeButton {
        markup: Rc<RefCell<String>>,
    }

    impl FakeButton {
        fn with(markup: &str) -> Self {
            Self {
                markup: Rc::new(RefCell::new(markup.to_string())),
            }
        }
    }

    impl MarkupSurface for FakeButton {
        fn markup(&self) -> String {
            self.markup.borrow().clone()
        }

        fn set_markup(&self, markup: &str) {
            *self.markup.borrow_mut() = markup.to_string();
        }
    }

    #[test]
    fn confirmation_shows_until_feedback_window_closes() {
        let scheduler = ManualScheduler::default();
        let feedback = CopyFeedback::new(scheduler.clone(), DEFAULT_COPY_FEEDBACK_MS);
        let button = FakeButton::with(r#"<i class="icon-copy"></i> Copy"#);

        feedback.confirm(button.clone());
        assert_eq!(button.markup(), CONFIRMATION_MARKUP);

        scheduler.advance(1_999);
        assert_eq!(button.markup(), CONFIRMATION_MARKUP);
        assert_eq!(feedback.pending(), 1);

        scheduler.advance(1);
        assert_eq!(button.markup(), r#"<i class="icon-copy"></i> Copy"#);
        assert_eq!(feedback.pending(), 0);
    }

    #[test]
    fn rejected_write_leaves_button_untouched() {
        let scheduler = ManualScheduler::default();
        let feedback = CopyFeedback::new(scheduler.clone(), DEFAULT_COPY_FEEDBACK_MS);
        let button = FakeButton::with("Copy");

        feedback.settle(
            Err("NotAllowedError: Write permission denied.".to_string()),
            button.clone(),
            &Logger::new(LogLevel::Error),
        );

        assert_eq!(button.markup(), "Copy");
        assert_eq!(feedback.pending(), 0);
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(5_000);
        assert_eq!(button.markup(), "Copy");
    }

    #[test]
    fn successful_write_shows_confirmation() {
        let scheduler = ManualScheduler::default();
        let feedback = CopyFeedback::new(scheduler.clone(), DEFAULT_COPY_FEEDBACK_MS);
        let button = FakeButton::with("Copy");

        feedback.settle(Ok(()), button.clone(), &Logger::new(LogLevel::Error));
        assert_eq!(button.markup(), CONFIRMATION_MARKUP);

        scheduler.advance(2_000);
        assert_eq!(button.markup(), "Copy");
    }

    #[test]
    fn second_copy_inside_window_ends_on_confirmation() {
        let scheduler = ManualScheduler::default();
        let feedback = CopyFeedback::new(scheduler.clone(), DEFAULT_COPY_FEEDBACK_MS);
        let button = FakeButton::with("Copy");

        feedback.confirm(button.clone());
        scheduler.advance(500);
        feedback.confirm(button.clone());

        scheduler.advance(1_500);
        assert_eq!(button.markup(), "Copy");

        scheduler.advance(500);
        assert_eq!(button.markup(), CONFIRMATION_MARKUP);
        assert_eq!(feedback.pending(), 0);
    }

    #[test]
    fn confirmation_markup_carries_label() {
        assert!(CONFIRMATION_MARKUP.starts_with("<svg"));
        assert!(CONFIRMATION_MARKUP.ends_with("<span>Copied!</span>"));
    }
}
