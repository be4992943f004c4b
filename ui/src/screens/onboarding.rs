//=============================================================================
// File: src/screens/onboarding.rs
//=============================================================================
use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::components::notice::Notice;
use crate::components::pico::Button;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Loading;
use crate::components::selectable_card::SelectableCard;
use crate::hooks::use_api_checker::use_api_checker;
use crate::hooks::use_session::use_session;
use crate::screens::spawn_refreshing_write;
use crate::Route;
use api::models::PlaceId;
use dioxus::prelude::*;
use std::collections::BTreeSet;

/// Pick liked places from a sample; each counts as a five-star rating.
#[component]
pub fn Onboarding() -> Element {
    let app_state = use_context::<AppState>();
    let mut notice = use_context::<AppStateMut>().notice;
    let session = use_session();
    let checker = use_api_checker();
    let navigator = use_navigator();

    let mut sample = use_resource({
        let client = app_state.client.clone();
        move || {
            let client = client.clone();
            let mut checker = checker;
            async move {
                let result = client.sample_places().await;
                checker.observe(&result);
                result
            }
        }
    });

    let mut selected = use_signal(BTreeSet::<PlaceId>::new);
    let mut saving = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        let ids: Vec<PlaceId> = selected.read().iter().copied().collect();
        if ids.is_empty() {
            notice.set(Some(Notice::error("Pilih minimal 1 tempat yang kamu suka.")));
            return;
        }
        let client = session.client();
        let refresh = app_state.refresh.clone();
        let mut checker = checker;
        saving.set(true);
        spawn_refreshing_write(
            refresh,
            async move { client.like_places(&ids).await },
            move |liked| {
                saving.set(false);
                if checker.check(liked).is_some() {
                    notice.set(Some(Notice::info("Terima kasih! Rekomendasi siap.")));
                    navigator.push(Route::HomeAuth {});
                }
            },
        );
    };

    let count = selected.read().len();

    rsx! {
        h2 { "Pilih Beberapa Tempat Favorit" }
        p { "Cukup klik kartu yang kamu suka. Sistem akan menandai sebagai rating 5." }
        match &*sample.read() {
            None => rsx! {
                Card { Loading {} }
            },
            Some(Err(e)) => rsx! {
                Card {
                    h4 { "Gagal memuat tempat" }
                    p { "{e}" }
                    button { onclick: move |_| sample.restart(), "Coba lagi" }
                }
            },
            Some(Ok(places)) => rsx! {
                Grid {
                    min_width: "14rem".to_string(),
                    for place in places.iter().cloned() {
                        SelectableCard {
                            key: "{place.id}",
                            selected: selected.read().contains(&place.id),
                            place,
                            on_toggle: move |id: PlaceId| {
                                let mut chosen = selected.write();
                                if !chosen.remove(&id) {
                                    chosen.insert(id);
                                }
                            },
                        }
                    }
                }
            },
        }
        div {
            style: "margin-top: 1.5rem;",
            Button {
                busy: saving(),
                on_click: submit,
                if saving() { "Menyimpan..." } else { "Simpan & Lihat Rekomendasi ({count})" }
            }
        }
    }
}
