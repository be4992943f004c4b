//! Defines the mutable, reactive state for the application's UI.

use crate::components::notice::Notice;
use crate::refresh::RefreshToken;
use api::models::Place;
use dioxus::prelude::*;

/// Personalized recommendations kept across navigation, stamped with the
/// refresh token they were fetched under.
#[derive(Clone, Debug, PartialEq)]
pub struct RecsCache {
    pub token: Option<RefreshToken>,
    pub places: Vec<Place>,
}

/// A reactive state provided as a Dioxus context for mutable UI data.
///
/// Separate from the immutable `AppState`. Every field is a `Signal`, so
/// the struct is `Copy` and can be moved into any handler.
#[derive(Clone, Copy)]
pub struct AppStateMut {
    /// Bearer token of the signed-in user.
    pub session: Signal<Option<String>>,
    /// The banner shown above the current screen.
    pub notice: Signal<Option<Notice>>,
    pub recs_cache: Signal<Option<RecsCache>>,
}
