//! Key-value persistence shared between tabs of the same origin.
//!
//! The browser implementation lives in [`crate::compat`]; [`MemoryStore`] is
//! used off the web and in tests, where each [`MemoryStore::open_tab`] plays
//! the part of another tab.

use crate::subscription::Subscription;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::rc::Weak;
use thiserror::Error;

/// Key holding the bearer token of the signed-in user.
pub const AUTH_TOKEN_KEY: &str = "token";

pub type WatchCallback = Rc<dyn Fn(Option<String>)>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write rejected: {0}")]
    Rejected(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Calls `on_change` when *another* tab changes `key`, with the new
    /// value (`None` when removed). Writes made through this handle are not
    /// reported back to it.
    fn watch(&self, key: &str, on_change: WatchCallback) -> Subscription;
}

struct Watcher {
    id: u64,
    tab: u64,
    key: String,
    on_change: WatchCallback,
}

#[derive(Default)]
struct Shared {
    values: HashMap<String, String>,
    watchers: Vec<Watcher>,
    next_id: u64,
    next_tab: u64,
    reject_writes: bool,
}

/// In-memory store. Handles from [`MemoryStore::open_tab`] share contents
/// and see each other's changes like browser tabs do.
#[derive(Clone)]
pub struct MemoryStore {
    shared: Rc<RefCell<Shared>>,
    tab: u64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                next_tab: 1,
                ..Default::default()
            })),
            tab: 0,
        }
    }

    /// Another handle onto the same contents, as seen from a different tab.
    pub fn open_tab(&self) -> Self {
        let mut shared = self.shared.borrow_mut();
        let tab = shared.next_tab;
        shared.next_tab += 1;
        Self {
            shared: self.shared.clone(),
            tab,
        }
    }

    /// Makes every `set`/`remove` fail, like a full or disabled storage.
    pub fn reject_writes(&self, reject: bool) {
        self.shared.borrow_mut().reject_writes = reject;
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let callbacks: Vec<WatchCallback> = {
            let mut shared = self.shared.borrow_mut();
            if shared.reject_writes {
                return Err(StoreError::Rejected("quota exceeded".into()));
            }
            let previous = match value {
                Some(v) => shared.values.insert(key.to_string(), v.to_string()),
                None => shared.values.remove(key),
            };
            if previous.as_deref() == value {
                return Ok(());
            }
            shared
                .watchers
                .iter()
                .filter(|w| w.tab != self.tab && w.key == key)
                .map(|w| w.on_change.clone())
                .collect()
        };

        for on_change in callbacks {
            on_change(value.map(str::to_string));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.shared.borrow().values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write(key, Some(value))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.write(key, None)
    }

    fn watch(&self, key: &str, on_change: WatchCallback) -> Subscription {
        let id = {
            let mut shared = self.shared.borrow_mut();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.watchers.push(Watcher {
                id,
                tab: self.tab,
                key: key.to_string(),
                on_change,
            });
            id
        };

        let shared: Weak<RefCell<Shared>> = Rc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.borrow_mut().watchers.retain(|w| w.id != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<Option<String>>>>, WatchCallback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, Rc::new(move |v| sink.borrow_mut().push(v)))
    }

    #[test]
    fn tabs_share_contents() {
        let a = MemoryStore::new();
        let b = a.open_tab();
        a.set("k", "1").unwrap();
        assert_eq!(b.get("k").as_deref(), Some("1"));
        b.remove("k").unwrap();
        assert_eq!(a.get("k"), None);
    }

    #[test]
    fn only_other_tabs_are_notified() {
        let a = MemoryStore::new();
        let b = a.open_tab();
        let (seen_a, on_a) = recorder();
        let (seen_b, on_b) = recorder();
        let _wa = a.watch("k", on_a);
        let _wb = b.watch("k", on_b);

        a.set("k", "1").unwrap();
        a.set("k", "1").unwrap();
        a.set("other", "x").unwrap();
        a.remove("k").unwrap();

        assert!(seen_a.borrow().is_empty());
        assert_eq!(*seen_b.borrow(), vec![Some("1".to_string()), None]);
    }

    #[test]
    fn dropped_watch_stops_notifications() {
        let a = MemoryStore::new();
        let b = a.open_tab();
        let (seen, on_change) = recorder();
        let watch = b.watch("k", on_change);
        a.set("k", "1").unwrap();
        drop(watch);
        a.set("k", "2").unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn rejected_writes_leave_contents_alone() {
        let a = MemoryStore::new();
        a.set("k", "1").unwrap();
        a.reject_writes(true);
        assert!(matches!(a.set("k", "2"), Err(StoreError::Rejected(_))));
        assert_eq!(a.get("k").as_deref(), Some("1"));
    }
}
