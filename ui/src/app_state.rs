use crate::refresh::bus::RefreshChannel;
use crate::refresh::durable::StorageChannel;
use crate::refresh::Clock;
use crate::refresh::RefreshSignal;
use crate::storage::KeyValueStore;
use api::config::ClientConfig;
use api::prefs::user_prefs::UserPrefs;
use api::ApiClient;
use std::ops::Deref;
use std::rc::Rc;

/// Services fixed for the lifetime of the tab.
pub struct AppStateData {
    pub prefs: UserPrefs,
    /// Anonymous client; see `Session::client` for the signed-in one.
    pub client: ApiClient,
    pub refresh: RefreshSignal,
    pub store: Rc<dyn KeyValueStore>,
}

#[derive(Clone)]
pub struct AppState(Rc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl AppState {
    pub fn new(
        config: ClientConfig,
        prefs: UserPrefs,
        store: Rc<dyn KeyValueStore>,
        clock: Clock,
    ) -> Self {
        let durable: Rc<dyn RefreshChannel> = Rc::new(StorageChannel::new(store.clone()));
        Self(Rc::new(AppStateData {
            prefs,
            client: ApiClient::new(config),
            refresh: RefreshSignal::new(Some(durable), clock),
            store,
        }))
    }
}
