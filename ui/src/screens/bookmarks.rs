//=============================================================================
// File: src/screens/bookmarks.rs
//=============================================================================
use crate::app_state_mut::AppStateMut;
use crate::components::empty_state::EmptyState;
use crate::components::notice::Notice;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Loading;
use crate::components::pico::Modal;
use crate::components::place_card::PlaceCard;
use crate::hooks::use_api_checker::use_api_checker;
use crate::hooks::use_session::use_session;
use crate::Route;
use api::models::Place;
use dioxus::prelude::*;

#[component]
pub fn Bookmarks() -> Element {
    let mut notice = use_context::<AppStateMut>().notice;
    let session = use_session();
    let checker = use_api_checker();

    let mut bookmarks = use_resource({
        let session = session.clone();
        move || {
            let client = session.client();
            let mut checker = checker;
            async move {
                let result = client.bookmarks().await;
                checker.observe(&result);
                result
            }
        }
    });

    // Delete asks first; the place waiting for confirmation lives here.
    let mut confirm_open = use_signal(|| false);
    let mut pending = use_signal(|| None::<Place>);
    let mut deleting = use_signal(|| false);

    let mut ask_delete = move |place: Place| {
        pending.set(Some(place));
        confirm_open.set(true);
    };

    let confirm_delete = {
        let session = session.clone();
        move |_: MouseEvent| {
            let Some(place) = pending.peek().clone() else {
                return;
            };
            let client = session.client();
            let mut checker = checker;
            deleting.set(true);
            spawn(async move {
                let removed = checker.check(client.remove_bookmark(place.id).await);
                deleting.set(false);
                confirm_open.set(false);
                pending.set(None);
                if removed.is_some() {
                    notice.set(Some(Notice::info(format!(
                        "{} dihapus dari bookmark.",
                        place.place_name
                    ))));
                    bookmarks.restart();
                }
            });
        }
    };

    let pending_name = pending
        .read()
        .as_ref()
        .map(|p| p.place_name.clone())
        .unwrap_or_default();

    rsx! {
        h2 { "Bookmarks" }
        match &*bookmarks.read() {
            None => rsx! {
                Card { Loading {} }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h4 { "Gagal memuat bookmark" }
                    p { "{e}" }
                    button { onclick: move |_| bookmarks.restart(), "Coba lagi" }
                }
            },
            Some(Ok(places)) if places.is_empty() => rsx! {
                EmptyState {
                    title: "Belum ada bookmark.".to_string(),
                    action: rsx! {
                        Link { to: Route::HomeAnonymous {}, "Cari tempat" }
                    },
                }
            },
            Some(Ok(places)) => rsx! {
                Grid {
                    for place in places.iter().cloned() {
                        PlaceCard {
                            key: "{place.id}",
                            place: place.clone(),
                            extra_action: rsx! {
                                button {
                                    r#type: "button",
                                    class: "contrast",
                                    onclick: move |_| ask_delete(place.clone()),
                                    "Delete"
                                }
                            },
                        }
                    }
                }
            },
        }
        Modal {
            is_open: confirm_open,
            title: "Hapus bookmark?".to_string(),
            p { "{pending_name}" }
            footer {
                Button {
                    button_type: ButtonType::Secondary,
                    outline: true,
                    on_click: move |_| {
                        confirm_open.set(false);
                        pending.set(None);
                    },
                    "Batal"
                }
                Button { busy: deleting(), on_click: confirm_delete, "Hapus" }
            }
        }
    }
}
