use crate::timer::{Scheduler, TimerHandle};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

pub const TYPEWRITER_SELECTOR: &str = "[data-typewriter]";
pub const TYPEWRITER_TEXT_ATTR: &str = "data-typewriter-text";
pub const TYPEWRITER_SPEED_ATTR: &str = "data-typewriter-speed";

pub trait TextSurface {
    fn set_text(&self, text: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterProgress {
    chars: Vec<char>,
    revealed: String,
    index: usize,
}

impl TypewriterProgress {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            revealed: String::with_capacity(text.len()),
            index: 0,
        }
    }

    /// Reveals one more character and returns the visible prefix, or `None`
    /// once everything is shown.
    pub fn advance(&mut self) -> Option<&str> {
        let next = *self.chars.get(self.index)?;
        self.revealed.push(next);
        self.index += 1;
        Some(&self.revealed)
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.chars.len()
    }

    pub fn revealed(&self) -> &str {
        &self.revealed
    }
}

pub struct Typewriter<S: Scheduler> {
    scheduler: S,
    pending: Rc<Cell<Option<TimerHandle>>>,
    progress: Rc<RefCell<TypewriterProgress>>,
}

impl<S: Scheduler> Typewriter<S> {
    pub fn start<T>(scheduler: S, surface: T, text: &str, speed_ms: u32) -> Self
    where
        T: TextSurface + 'static,
    {
        let progress = Rc::new(RefCell::new(TypewriterProgress::new(text)));
        let pending = Rc::new(Cell::new(None));

        surface.set_text("");
        reveal_next(
            scheduler.clone(),
            Rc::new(surface),
            progress.clone(),
            pending.clone(),
            speed_ms,
        );

        Self {
            scheduler,
            pending,
            progress,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress.borrow().is_complete()
    }

    pub fn revealed(&self) -> String {
        self.progress.borrow().revealed().to_string()
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

fn reveal_next<S, T>(
    scheduler: S,
    surface: Rc<T>,
    progress: Rc<RefCell<TypewriterProgress>>,
    pending: Rc<Cell<Option<TimerHandle>>>,
    speed_ms: u32,
) where
    S: Scheduler,
    T: TextSurface + 'static,
{
    pending.set(None);

    let complete = {
        let mut state = progress.borrow_mut();
        match state.advance() {
            Some(visible) => surface.set_text(visible),
            None => return,
        }
        state.is_complete()
    };

    if complete {
        return;
    }

    let next = {
        let scheduler = scheduler.clone();
        let pending = pending.clone();
        move || reveal_next(scheduler, surface, progress, pending, speed_ms)
    };
    pending.set(scheduler.schedule(speed_ms, Box::new(next)));
}
