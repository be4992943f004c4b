use api::models::Stars;
use dioxus::prelude::*;

/// Five round buttons; every star up to the selected one is lit.
#[component]
pub fn RatingStars(value: Option<Stars>, on_change: EventHandler<Stars>) -> Element {
    let selected = value.map_or(0, |s| s.get());

    rsx! {
        div {
            role: "radiogroup",
            "aria-label": "Pilih rating",
            style: "display: flex; gap: 0.25rem;",
            for n in 1..=Stars::MAX {
                button {
                    key: "{n}",
                    r#type: "button",
                    role: "radio",
                    title: "{n} bintang",
                    "aria-checked": if selected >= n { "true" } else { "false" },
                    class: if selected >= n { "" } else { "secondary outline" },
                    style: "width: 2.5rem; height: 2.5rem; padding: 0; border-radius: 50%;",
                    onclick: move |_| {
                        if let Some(stars) = Stars::new(n) {
                            on_change.call(stars);
                        }
                    },
                    "{n}"
                }
            }
        }
    }
}
