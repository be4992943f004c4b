use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::storage::AUTH_TOKEN_KEY;
use api::models::AuthResponse;
use api::ApiClient;
use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;

/// The signed-in state of this tab, persisted under [`AUTH_TOKEN_KEY`].
#[derive(Clone)]
pub struct Session {
    app_state: AppState,
    state: AppStateMut,
}

impl Session {
    /// Reactive: components reading this re-render on login and logout.
    pub fn is_signed_in(&self) -> bool {
        self.state.session.read().is_some()
    }

    /// A client carrying the current bearer token, if any.
    pub fn client(&self) -> ApiClient {
        self.app_state
            .client
            .with_bearer(self.state.session.peek().clone())
    }

    pub fn sign_in(&mut self, auth: &AuthResponse) {
        if let Err(e) = self.app_state.store.set(AUTH_TOKEN_KEY, &auth.token) {
            warn!("login will not survive a reload: {e}");
        }
        info!("signed in as {}", auth.user.email);
        self.state.recs_cache.set(None);
        self.state.session.set(Some(auth.token.clone()));
    }

    /// Clears the token locally right away; telling the server is best effort.
    pub fn sign_out(&mut self) {
        let client = self.client();
        spawn(async move {
            if let Err(e) = client.logout().await {
                debug!("server-side logout failed: {e}");
            }
        });
        if let Err(e) = self.app_state.store.remove(AUTH_TOKEN_KEY) {
            warn!("could not forget the stored token: {e}");
        }
        self.state.recs_cache.set(None);
        self.state.session.set(None);
        info!("signed out");
    }
}

pub fn use_session() -> Session {
    Session {
        app_state: use_context::<AppState>(),
        state: use_context::<AppStateMut>(),
    }
}
