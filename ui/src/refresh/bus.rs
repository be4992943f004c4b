//! The in-tab half of the refresh signal.

use super::RefreshToken;
use crate::storage::StoreError;
use crate::subscription::Subscription;
use std::cell::RefCell;
use std::rc::Rc;

pub type TokenCallback = Rc<dyn Fn(RefreshToken)>;

/// Somewhere refresh tokens can be published and observed.
pub trait RefreshChannel {
    fn publish(&self, token: RefreshToken) -> Result<(), StoreError>;

    fn subscribe(&self, on_token: TokenCallback) -> Subscription;

    /// The newest token this channel knows of.
    fn last_known(&self) -> Option<RefreshToken>;
}

#[derive(Default)]
struct BusState {
    latest: Option<RefreshToken>,
    next_id: u64,
    listeners: Vec<(u64, TokenCallback)>,
}

/// Process-wide bus. `publish` calls every subscriber before it returns.
#[derive(Clone, Default)]
pub struct LocalBus {
    state: Rc<RefCell<BusState>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl RefreshChannel for LocalBus {
    fn publish(&self, token: RefreshToken) -> Result<(), StoreError> {
        let listeners: Vec<TokenCallback> = {
            let mut state = self.state.borrow_mut();
            state.latest = state.latest.max(Some(token));
            state.listeners.iter().map(|(_, cb)| cb.clone()).collect()
        };
        // callbacks may subscribe or unsubscribe, so none run under the borrow
        for on_token in listeners {
            on_token(token);
        }
        Ok(())
    }

    fn subscribe(&self, on_token: TokenCallback) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, on_token));
            id
        };
        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().listeners.retain(|(i, _)| *i != id);
            }
        })
    }

    fn last_known(&self) -> Option<RefreshToken> {
        self.state.borrow().latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn delivers_synchronously_to_every_subscriber() {
        let bus = LocalBus::new();
        let total = Rc::new(Cell::new(0u64));
        let (a, b) = (total.clone(), total.clone());
        let _s1 = bus.subscribe(Rc::new(move |t| a.set(a.get() + t.as_millis())));
        let _s2 = bus.subscribe(Rc::new(move |t| b.set(b.get() + t.as_millis())));

        bus.publish(RefreshToken::from_millis(5)).unwrap();
        assert_eq!(total.get(), 10);
        assert_eq!(bus.last_known(), Some(RefreshToken::from_millis(5)));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let bus = LocalBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = bus.subscribe(Rc::new(move |_| h.set(h.get() + 1)));
        bus.publish(RefreshToken::from_millis(1)).unwrap();
        sub.unsubscribe();
        bus.publish(RefreshToken::from_millis(2)).unwrap();
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn latest_never_goes_backwards() {
        let bus = LocalBus::new();
        bus.publish(RefreshToken::from_millis(9)).unwrap();
        bus.publish(RefreshToken::from_millis(3)).unwrap();
        assert_eq!(bus.last_known(), Some(RefreshToken::from_millis(9)));
    }

    #[test]
    fn a_callback_may_unsubscribe_itself() {
        let bus = LocalBus::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let inner = slot.clone();
        let sub = bus.subscribe(Rc::new(move |_| {
            if let Some(sub) = inner.borrow_mut().take() {
                sub.unsubscribe();
            }
        }));
        *slot.borrow_mut() = Some(sub);
        bus.publish(RefreshToken::from_millis(1)).unwrap();
        assert_eq!(bus.listener_count(), 0);
    }
}
