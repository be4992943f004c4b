use dioxus::prelude::*;

/// A dashed placeholder box for lists with nothing in them.
#[component]
pub fn EmptyState(
    title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] action: Option<Element>,
) -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                align-items: center;
                padding: 2rem;
                text-align: center;
                color: var(--pico-muted-color);
                border: 2px dashed var(--pico-card-border-color);
                border-radius: var(--pico-border-radius);
                margin: 1rem 0;
            ",
            h4 { style: "margin-bottom: 0.5rem;", "{title}" }
            if let Some(description) = description {
                p { style: "max-width: 28rem; margin: 0 auto 1rem auto;", "{description}" }
            }
            if let Some(action) = action {
                div { {action} }
            }
        }
    }
}
