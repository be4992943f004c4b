//! The card every place list renders.

use crate::app_state::AppState;
use crate::Route;
use api::models::Place;
use dioxus::prelude::*;

/// Photo, name, location, normalized price and rating, and actions.
///
/// `on_bookmark` adds a Bookmark button; `extra_action` renders after the
/// built-in actions (the bookmarks screen puts Delete there).
#[component]
pub fn PlaceCard(
    place: Place,
    #[props(optional)] on_bookmark: Option<EventHandler<Place>>,
    #[props(optional)] extra_action: Option<Element>,
) -> Element {
    let app_state = use_context::<AppState>();
    let navigator = use_navigator();
    let preference = *app_state.prefs.display_preference();

    let id = place.id;
    let name = place.place_name.clone();
    let price = place.price_label(&preference);
    let rating = place.rating_label();
    let location = place.location_label();
    let image = place.image_url().map(str::to_string);
    let map_link = place.map_link().map(str::to_string);
    let alt = if name.is_empty() {
        "Foto tempat".to_string()
    } else {
        format!("Foto {name}")
    };

    rsx! {
        article {
            style: "display: flex; flex-direction: column; margin: 0;",
            if let Some(src) = image {
                img {
                    src: "{src}",
                    alt: "{alt}",
                    loading: "lazy",
                    style: "width: 100%; height: 11rem; object-fit: cover; border-radius: var(--pico-border-radius);",
                }
            }
            div {
                style: "flex: 1; margin-top: 0.75rem;",
                h5 { style: "margin-bottom: 0.25rem;", "{name}" }
                small { style: "color: var(--pico-muted-color);", "{location}" }
                p {
                    style: "margin: 0.5rem 0 0 0;",
                    "Harga: "
                    strong { "{price}" }
                    br {}
                    "Rating: "
                    strong { "{rating}" }
                }
            }
            footer {
                style: "display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 0.75rem;",
                button {
                    r#type: "button",
                    onclick: move |_| {
                        navigator.push(Route::Detail { id });
                    },
                    "Detail"
                }
                if let Some(on_bookmark) = on_bookmark {
                    button {
                        r#type: "button",
                        class: "secondary outline",
                        onclick: move |_| on_bookmark.call(place.clone()),
                        "Bookmark"
                    }
                }
                if let Some(href) = map_link {
                    a {
                        href: "{href}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        role: "button",
                        class: "secondary outline",
                        "Map"
                    }
                }
                if let Some(action) = extra_action {
                    {action}
                }
            }
        }
    }
}
