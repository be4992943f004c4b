//=============================================================================
// File: src/screens/home_anonymous.rs
//=============================================================================
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::empty_state::EmptyState;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Loading;
use crate::components::place_card::PlaceCard;
use crate::hooks::use_api_checker::use_api_checker;
use crate::hooks::use_session::use_session;
use crate::screens::bookmark_place;
use api::models::Place;
use dioxus::prelude::*;

/// Popular places, shown to everyone at `/`.
#[component]
pub fn HomeAnonymous() -> Element {
    let app_state = use_context::<AppState>();
    let notice = use_context::<AppStateMut>().notice;
    let session = use_session();
    let checker = use_api_checker();

    let mut popular = use_resource(move || {
        let client = app_state.client.clone();
        let mut checker = checker;
        async move {
            let result = client.anonymous_recs().await;
            checker.observe(&result);
            result
        }
    });

    let signed_in = session.is_signed_in();

    rsx! {
        h2 { "Rekomendasi Populer" }
        match &*popular.read() {
            None => rsx! {
                Card { Loading {} }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h4 { "Gagal memuat rekomendasi" }
                    p { "{e}" }
                    button { onclick: move |_| popular.restart(), "Coba lagi" }
                }
            },
            Some(Ok(places)) if places.is_empty() => rsx! {
                EmptyState { title: "Belum ada data rekomendasi.".to_string() }
            },
            Some(Ok(places)) => rsx! {
                Grid {
                    for place in places.iter().cloned() {
                        if signed_in {
                            PlaceCard {
                                key: "{place.id}",
                                place,
                                on_bookmark: {
                                    let session = session.clone();
                                    move |p: Place| bookmark_place(session.client(), checker, notice, p)
                                },
                            }
                        } else {
                            PlaceCard { key: "{place.id}", place }
                        }
                    }
                }
            },
        }
    }
}
