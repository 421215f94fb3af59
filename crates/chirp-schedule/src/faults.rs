//! Fault observer registration and dispatch.
//!
//! Runtime faults (a panic escaping an emission, for instance) are routed
//! through an explicit hub instead of process-global hooks: callers
//! register an observer and get back a guard that deregisters on drop.
//! Dispatch is unconditional — every registered observer sees every fault —
//! and never re-raises.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Observer = Box<dyn Fn(&str)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

/// A single-threaded registry of fault observers.
#[derive(Clone, Default)]
pub struct FaultHub {
    inner: Rc<RefCell<HubInner>>,
}

impl FaultHub {
    /// An empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; dropping the returned guard deregisters it.
    ///
    /// Observers must not call back into the hub.
    pub fn register(&self, observer: impl Fn(&str) + 'static) -> FaultGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Box::new(observer)));
        FaultGuard {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Report a fault to every registered observer.
    pub fn report(&self, cause: &str) {
        let inner = self.inner.borrow();
        for (_, observer) in &inner.observers {
            observer(cause);
        }
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }
}

/// Best-effort description of a panic payload, for reporting to a hub.
pub fn panic_cause(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown fault".to_string()
    }
}

/// Deregistration handle returned by [`FaultHub::register`].
pub struct FaultGuard {
    inner: Weak<RefCell<HubInner>>,
    id: u64,
}

impl Drop for FaultGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().observers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn observers_see_every_fault() {
        let hub = FaultHub::new();
        let seen = Rc::new(Cell::new(0));

        let seen_a = Rc::clone(&seen);
        let _guard_a = hub.register(move |_| seen_a.set(seen_a.get() + 1));
        let seen_b = Rc::clone(&seen);
        let _guard_b = hub.register(move |_| seen_b.set(seen_b.get() + 1));

        hub.report("boom");
        hub.report("boom again");
        assert_eq!(seen.get(), 4);
    }

    #[test]
    fn dropping_the_guard_deregisters() {
        let hub = FaultHub::new();
        let seen = Rc::new(Cell::new(0));

        let seen_obs = Rc::clone(&seen);
        let guard = hub.register(move |_| seen_obs.set(seen_obs.get() + 1));
        assert_eq!(hub.observer_count(), 1);

        hub.report("one");
        drop(guard);
        assert_eq!(hub.observer_count(), 0);

        hub.report("two");
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn guard_outliving_the_hub_is_harmless() {
        let hub = FaultHub::new();
        let guard = hub.register(|_| {});
        drop(hub);
        drop(guard);
    }

    #[test]
    fn observers_receive_the_cause() {
        let hub = FaultHub::new();
        let last = Rc::new(RefCell::new(String::new()));
        let last_obs = Rc::clone(&last);
        let _guard = hub.register(move |cause| *last_obs.borrow_mut() = cause.to_string());

        hub.report("division by teapot");
        assert_eq!(*last.borrow(), "division by teapot");
    }
}
