use std::{cell::RefCell, collections::HashMap, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i64);

pub trait Scheduler: Clone + 'static {
    /// Returns `None` when the host refused to schedule the task.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Option<TimerHandle>;

    fn cancel(&self, handle: TimerHandle);
}

/// Timers owned by one component instance.
///
/// A timer leaves the set when it fires or is cancelled, so the set only ever
/// holds callbacks that have yet to run.
pub struct PendingTimers<S: Scheduler> {
    scheduler: S,
    next_key: Rc<RefCell<u64>>,
    pending: Rc<RefCell<HashMap<u64, TimerHandle>>>,
}

impl<S: Scheduler> Clone for PendingTimers<S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            next_key: self.next_key.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<S: Scheduler> PendingTimers<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            next_key: Rc::new(RefCell::new(0)),
            pending: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn schedule(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> Option<TimerHandle> {
        let key = {
            let mut next_key = self.next_key.borrow_mut();
            *next_key += 1;
            *next_key
        };

        let pending = self.pending.clone();
        let handle = self.scheduler.schedule(
            delay_ms,
            Box::new(move || {
                pending.borrow_mut().remove(&key);
                task();
            }),
        )?;

        self.pending.borrow_mut().insert(key, handle);
        Some(handle)
    }

    pub fn cancel_all(&self) {
        let handles: Vec<TimerHandle> = self.pending.borrow_mut().drain().map(|(_, handle)| handle).collect();
        for handle in handles {
            self.scheduler.cancel(handle);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;


#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn pending_timer_leaves_the_set_when_it_fires() {
        let scheduler = ManualScheduler::default();
        let timers = PendingTimers::new(scheduler.clone());
        let fired = Rc::new(Cell::new(false));

        let flag = fired.clone();
        timers.schedule(600, move || flag.set(true));
        assert_eq!(timers.len(), 1);

        scheduler.advance(599);
        assert!(!fired.get());
        assert_eq!(timers.len(), 1);

        scheduler.advance(1);
        assert!(fired.get());
        assert!(timers.is_empty());
    }

    #[test]
    fn cancel_all_drops_every_pending_task() {
        let scheduler = ManualScheduler::default();
        let timers = PendingTimers::new(scheduler.clone());
        let count = Rc::new(Cell::new(0));

        for delay in [10, 20, 30] {
            let count = count.clone();
            timers.schedule(delay, move || count.set(count.get() + 1));
        }
        scheduler.advance(10);
        timers.cancel_all();
        scheduler.advance(100);

        assert_eq!(count.get(), 1);
        assert!(timers.is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn manual_clock_runs_tasks_scheduled_during_advance() {
        let scheduler = ManualScheduler::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_scheduler = scheduler.clone();
        let inner_log = log.clone();
        scheduler.schedule(
            5,
            Box::new(move || {
                inner_log.borrow_mut().push(inner_scheduler.now());
                let nested_log = inner_log.clone();
                let clock = inner_scheduler.clone();
                inner_scheduler.schedule(
                    5,
                    Box::new(move || nested_log.borrow_mut().push(clock.now())),
                );
            }),
        );

        scheduler.advance(20);
        assert_eq!(*log.borrow(), vec![5, 10]);
        assert_eq!(scheduler.now(), 20);
    }
}
