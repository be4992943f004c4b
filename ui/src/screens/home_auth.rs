//=============================================================================
// File: src/screens/home_auth.rs
//=============================================================================
use crate::components::empty_state::EmptyState;
use crate::components::pico::Button;
use crate::components::pico::ButtonType;
use crate::components::pico::Card;
use crate::components::pico::Grid;
use crate::components::pico::Loading;
use crate::components::place_card::PlaceCard;
use crate::hooks::use_recommendations::use_recommendations;
use crate::hooks::use_recommendations::RecsView;
use crate::Route;
use dioxus::prelude::*;

/// Personalized recommendations at `/home`. Refetches by itself when a
/// rating is saved here or in another tab.
#[component]
pub fn HomeAuth() -> Element {
    let recs = use_recommendations();
    let busy = (recs.busy)();

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; gap: 1rem;",
            h2 { "Rekomendasi AI (Hybrid)" }
            Button {
                button_type: ButtonType::Secondary,
                outline: true,
                busy,
                on_click: move |_| recs.refresh(),
                "Muat ulang"
            }
        }
        match (recs.view)() {
            RecsView::Loading => rsx! {
                Card { Loading {} }
            },
            RecsView::NeedsSetup(message) => rsx! {
                Card {
                    h3 { "Butuh Onboarding" }
                    p { "{message}" }
                    Link { to: Route::Onboarding {}, "Mulai Onboarding" }
                }
            },
            RecsView::Unavailable(error) => rsx! {
                Card {
                    h3 { "Rekomendasi tidak tersedia" }
                    p { "{error}" }
                    button { onclick: move |_| recs.refresh(), "Coba lagi" }
                }
            },
            RecsView::Ready(places) if places.is_empty() => rsx! {
                EmptyState {
                    title: "Belum ada rekomendasi.".to_string(),
                    description: Some("Beri rating beberapa tempat untuk mendapatkan rekomendasi.".to_string()),
                }
            },
            RecsView::Ready(places) => rsx! {
                Grid {
                    for place in places {
                        PlaceCard { key: "{place.id}", place }
                    }
                }
            },
        }
    }
}
