// Re-export the public API from the appropriate module
#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
pub mod wasm32 {
    use crate::storage::KeyValueStore;
    use crate::storage::MemoryStore;
    use crate::storage::StoreError;
    use crate::storage::WatchCallback;
    use crate::subscription::Subscription;
    use dioxus_logger::tracing::debug;
    use dioxus_logger::tracing::warn;
    use std::rc::Rc;
    use std::time::Duration;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::Storage;
    use web_sys::StorageEvent;

    pub async fn sleep(duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }

    /// `window.localStorage`, with change notifications from the `storage`
    /// event. Browsers fire that event only in the tabs that did not write.
    pub struct BrowserStorage;

    impl BrowserStorage {
        fn storage() -> Result<Storage, StoreError> {
            let window =
                web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
            window
                .local_storage()
                .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
                .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))
        }
    }

    impl KeyValueStore for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            Self::storage().ok()?.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| StoreError::Rejected(format!("{e:?}")))
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| StoreError::Rejected(format!("{e:?}")))
        }

        fn watch(&self, key: &str, on_change: WatchCallback) -> Subscription {
            let Some(window) = web_sys::window() else {
                return Subscription::empty();
            };
            let key = key.to_string();
            let listener = Closure::<dyn Fn(StorageEvent)>::new(move |event: StorageEvent| {
                if event.key().as_deref() == Some(key.as_str()) {
                    on_change(event.new_value());
                }
            });
            if let Err(e) = window
                .add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
            {
                warn!("cannot listen for storage events: {e:?}");
                return Subscription::empty();
            }
            Subscription::new(move || {
                if let Err(e) = window
                    .remove_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
                {
                    debug!("cannot stop listening for storage events: {e:?}");
                }
            })
        }
    }

    /// `localStorage` when the browser has it, otherwise a store that only
    /// lives as long as the page.
    pub fn open_durable_store() -> Rc<dyn KeyValueStore> {
        match BrowserStorage::storage() {
            Ok(_) => Rc::new(BrowserStorage),
            Err(e) => {
                warn!("{e}; state will not survive a reload");
                Rc::new(MemoryStore::new())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod non_wasm32 {
    use crate::storage::KeyValueStore;
    use crate::storage::MemoryStore;
    use std::rc::Rc;
    use std::time::Duration;

    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    pub fn open_durable_store() -> Rc<dyn KeyValueStore> {
        Rc::new(MemoryStore::new())
    }
}
