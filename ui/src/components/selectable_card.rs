use api::models::Place;
use api::models::PlaceId;
use dioxus::prelude::*;

/// A place tile that toggles selection when clicked (onboarding).
#[component]
pub fn SelectableCard(place: Place, selected: bool, on_toggle: EventHandler<PlaceId>) -> Element {
    let id = place.id;
    let location = place.location_label();
    let image = place.image_url().map(str::to_string);
    let outline = if selected {
        "outline: 3px solid var(--pico-primary); outline-offset: -3px;"
    } else {
        ""
    };

    rsx! {
        article {
            role: "button",
            tabindex: "0",
            "aria-pressed": if selected { "true" } else { "false" },
            style: "position: relative; margin: 0; cursor: pointer; text-align: left; {outline}",
            onclick: move |_| on_toggle.call(id),
            if let Some(src) = image {
                img {
                    src: "{src}",
                    alt: "{place.place_name}",
                    loading: "lazy",
                    style: "width: 100%; height: 10rem; object-fit: cover; border-radius: var(--pico-border-radius);",
                }
            }
            strong { style: "display: block; margin-top: 0.5rem;", "{place.place_name}" }
            small { style: "color: var(--pico-muted-color);", "{location}" }
            if selected {
                mark { style: "position: absolute; top: 0.5rem; right: 0.5rem;", "Dipilih" }
            }
        }
    }
}
