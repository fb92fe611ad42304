use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gtk4 as gtk;
use gtk4::glib;
use gtk4::prelude::*;

/// Timeouts and frame callbacks that belong to one screen. `cancel_all`
/// removes whatever is still pending, and a cancelled owner refuses new
/// registrations, so nothing touches the screen after it is torn down.
#[derive(Clone, Default)]
pub struct ScreenTimers {
    inner: Rc<TimersInner>,
}

#[derive(Default)]
struct TimersInner {
    cancelled: Cell<bool>,
    next_key: Cell<u64>,
    pending: RefCell<Vec<(u64, glib::SourceId)>>,
    ticks: RefCell<Vec<gtk::TickCallbackId>>,
}

impl ScreenTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Runs `f` once after `delay_ms` unless the screen goes away first.
    pub fn schedule_once<F>(&self, delay_ms: u64, f: F)
    where
        F: FnOnce() + 'static,
    {
        if self.is_cancelled() {
            return;
        }
        let key = self.inner.next_key.get();
        self.inner.next_key.set(key.wrapping_add(1));

        let inner_weak = Rc::downgrade(&self.inner);
        let handle = glib::timeout_add_local_once(Duration::from_millis(delay_ms), move || {
            let Some(inner) = inner_weak.upgrade() else {
                return;
            };
            // The source is finished once this runs; drop its handle unremoved.
            inner.pending.borrow_mut().retain(|(k, _)| *k != key);
            if inner.cancelled.get() {
                return;
            }
            f();
        });
        self.inner.pending.borrow_mut().push((key, handle));
    }

    /// Registers a per-frame callback on `widget` for the lifetime of the screen.
    pub fn add_tick<W, F>(&self, widget: &W, f: F)
    where
        W: IsA<gtk::Widget>,
        F: Fn(&gtk::Widget, &gtk::gdk::FrameClock) -> glib::ControlFlow + 'static,
    {
        if self.is_cancelled() {
            return;
        }
        let id = widget.upcast_ref::<gtk::Widget>().add_tick_callback(f);
        self.inner.ticks.borrow_mut().push(id);
    }

    pub fn cancel_all(&self) {
        if self.inner.cancelled.replace(true) {
            return;
        }
        let pending: Vec<_> = self.inner.pending.borrow_mut().drain(..).collect();
        let ticks: Vec<_> = self.inner.ticks.borrow_mut().drain(..).collect();
        log::debug!(
            "cancelling {} pending timeouts and {} frame callbacks",
            pending.len(),
            ticks.len()
        );
        for (_, handle) in pending {
            handle.remove();
        }
        for tick in ticks {
            tick.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    // Tests share the thread-default main context; run them one at a time.
    static MAIN_CONTEXT_LOCK: Mutex<()> = Mutex::new(());

    fn spin_for(context: &glib::MainContext, millis: u64) {
        let deadline = Instant::now() + Duration::from_millis(millis);
        while Instant::now() < deadline {
            if !context.iteration(false) {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
    }

    fn spin_until(context: &glib::MainContext, done: &Cell<bool>, millis: u64) {
        let deadline = Instant::now() + Duration::from_millis(millis);
        while !done.get() && Instant::now() < deadline {
            if !context.iteration(false) {
                std::thread::sleep(Duration::from_millis(1));
            }
        }
    }

    #[test]
    fn cancelled_timeout_never_runs() {
        let _lock = MAIN_CONTEXT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let context = glib::MainContext::default();
        let _acquired = context.acquire().unwrap();

        let timers = ScreenTimers::new();
        let ran = Rc::new(Cell::new(false));
        timers.schedule_once(10, {
            let ran = ran.clone();
            move || ran.set(true)
        });
        timers.cancel_all();

        spin_for(&context, 60);
        assert!(!ran.get());
        assert!(timers.is_cancelled());
    }

    #[test]
    fn fired_timeout_is_not_removed_again() {
        let _lock = MAIN_CONTEXT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let context = glib::MainContext::default();
        let _acquired = context.acquire().unwrap();

        let timers = ScreenTimers::new();
        let ran = Rc::new(Cell::new(false));
        timers.schedule_once(0, {
            let ran = ran.clone();
            move || ran.set(true)
        });

        spin_until(&context, &ran, 500);
        assert!(ran.get());
        assert!(timers.inner.pending.borrow().is_empty());

        // Removing the finished source here would panic.
        timers.cancel_all();
    }

    #[test]
    fn scheduling_after_cancel_is_refused() {
        let _lock = MAIN_CONTEXT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let context = glib::MainContext::default();
        let _acquired = context.acquire().unwrap();

        let timers = ScreenTimers::new();
        timers.cancel_all();

        let ran = Rc::new(Cell::new(false));
        timers.schedule_once(0, {
            let ran = ran.clone();
            move || ran.set(true)
        });
        assert!(timers.inner.pending.borrow().is_empty());

        spin_for(&context, 30);
        assert!(!ran.get());
    }
}
