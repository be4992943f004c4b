//! The cross-tab half of the refresh signal: a token persisted under a
//! well-known key, observed through the store's change notifications.

use super::bus::RefreshChannel;
use super::bus::TokenCallback;
use super::RefreshToken;
use crate::storage::KeyValueStore;
use crate::storage::StoreError;
use crate::subscription::Subscription;
use dioxus_logger::tracing::debug;
use std::rc::Rc;

pub const REFRESH_KEY: &str = "ecotour.recs.refresh";

#[derive(Clone)]
pub struct StorageChannel {
    store: Rc<dyn KeyValueStore>,
    key: &'static str,
}

impl StorageChannel {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: REFRESH_KEY,
        }
    }
}

impl RefreshChannel for StorageChannel {
    fn publish(&self, token: RefreshToken) -> Result<(), StoreError> {
        self.store.set(self.key, &token.to_string())
    }

    fn subscribe(&self, on_token: TokenCallback) -> Subscription {
        let key = self.key;
        self.store.watch(
            key,
            Rc::new(move |raw: Option<String>| {
                match raw.as_deref().and_then(RefreshToken::parse) {
                    Some(token) => on_token(token),
                    None => debug!("ignoring unusable value under {key}: {raw:?}"),
                }
            }),
        )
    }

    fn last_known(&self) -> Option<RefreshToken> {
        self.store.get(self.key).as_deref().and_then(RefreshToken::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;

    #[test]
    fn tokens_written_in_one_tab_reach_another() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_tab();
        let writer = StorageChannel::new(Rc::new(tab_a));
        let reader = StorageChannel::new(Rc::new(tab_b));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = reader.subscribe(Rc::new(move |t| sink.borrow_mut().push(t)));

        writer.publish(RefreshToken::from_millis(1700000000000)).unwrap();
        assert_eq!(*seen.borrow(), vec![RefreshToken::from_millis(1700000000000)]);
        assert_eq!(reader.last_known(), Some(RefreshToken::from_millis(1700000000000)));
    }

    #[test]
    fn corrupt_values_are_no_signal() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_tab();
        let reader = StorageChannel::new(Rc::new(tab_b));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = reader.subscribe(Rc::new(move |t| sink.borrow_mut().push(t)));

        tab_a.set(REFRESH_KEY, "yesterday").unwrap();
        tab_a.set(REFRESH_KEY, "-4").unwrap();
        tab_a.remove(REFRESH_KEY).unwrap();

        assert!(seen.borrow().is_empty());
        assert_eq!(reader.last_known(), None);
    }
}
