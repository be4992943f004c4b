//! A handle that undoes a registration when dropped.

use std::cell::RefCell;

type Cancel = Box<dyn FnOnce()>;

/// Returned by every `subscribe`/`watch` call.
///
/// Dropping it unsubscribes. [`Subscription::unsubscribe`] does the same
/// explicitly and may be called any number of times.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancels: RefCell<Vec<Cancel>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancels: RefCell::new(vec![Box::new(cancel)]),
        }
    }

    /// A subscription with nothing to undo.
    pub fn empty() -> Self {
        Self {
            cancels: RefCell::new(Vec::new()),
        }
    }

    /// One handle that cancels both.
    pub fn join(self, other: Subscription) -> Self {
        let mut cancels = self.cancels.take();
        cancels.extend(other.cancels.take());
        Self {
            cancels: RefCell::new(cancels),
        }
    }

    pub fn unsubscribe(&self) {
        let cancels = self.cancels.take();
        for cancel in cancels {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &!self.cancels.borrow().is_empty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn cancels_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = Subscription::new(move || c.set(c.get() + 1));
        sub.unsubscribe();
        sub.unsubscribe();
        drop(sub);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn joined_handles_cancel_together() {
        let count = Rc::new(Cell::new(0));
        let (a, b) = (count.clone(), count.clone());
        let joined = Subscription::new(move || a.set(a.get() + 1))
            .join(Subscription::new(move || b.set(b.get() + 10)));
        assert_eq!(count.get(), 0);
        drop(joined);
        assert_eq!(count.get(), 11);
    }
}
