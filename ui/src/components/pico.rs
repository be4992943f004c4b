//! A set of reusable, lifetime-free Dioxus components for the Pico.css framework.
//! To use, ensure pico.min.css is linked in the main application.

#![allow(non_snake_case)] // Allow PascalCase for component function names

use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;

//=============================================================================
// Layout Components
//=============================================================================

/// A centered container for your content.
/// Wraps content in a `<main class="container">` element.
#[component]
pub fn Container(children: Element) -> Element {
    rsx! { main { class: "container", {children} } }
}

/// A wrapping grid of cards, at least `min_width` wide each.
#[component]
pub fn Grid(children: Element, #[props(default = "16rem".to_string())] min_width: String) -> Element {
    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(auto-fill, minmax({min_width}, 1fr)); gap: 1rem;",
            {children}
        }
    }
}

//=============================================================================
// Content Components
//=============================================================================

/// A card for grouping related content.
/// Wraps content in an `<article>` element.
#[component]
pub fn Card(children: Element, #[props(default)] style: String) -> Element {
    rsx! { article { style: "{style}", {children} } }
}

/// An indeterminate progress bar with a caption.
#[component]
pub fn Loading(#[props(default = "Memuat…".to_string())] caption: String) -> Element {
    rsx! {
        div {
            small { "{caption}" }
            progress {}
        }
    }
}

//=============================================================================
// Interactive Components
//=============================================================================

#[derive(PartialEq, Clone, Copy, Default)]
pub enum ButtonType {
    #[default]
    Primary,
    Secondary,
    Contrast,
}

impl ButtonType {
    fn to_class(self, outline: bool) -> &'static str {
        match (self, outline) {
            (ButtonType::Primary, false) => "",
            (ButtonType::Primary, true) => "outline",
            (ButtonType::Secondary, false) => "secondary",
            (ButtonType::Secondary, true) => "secondary outline",
            (ButtonType::Contrast, false) => "contrast",
            (ButtonType::Contrast, true) => "contrast outline",
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ButtonProps {
    children: Element,
    #[props(optional)]
    on_click: Option<EventHandler<MouseEvent>>,
    #[props(default)]
    button_type: ButtonType,
    #[props(default = false)]
    outline: bool,
    #[props(default = false)]
    disabled: bool,
    /// Shows pico's busy indicator and disables the button.
    #[props(default = false)]
    busy: bool,
    #[props(default)]
    style: String,
}

/// A versatile button component.
pub fn Button(props: ButtonProps) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: props.button_type.to_class(props.outline),
            style: "{props.style}",
            disabled: props.disabled || props.busy,
            "aria-busy": if props.busy { "true" } else { "false" },
            onclick: move |evt| {
                if let Some(handler) = &props.on_click {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}

/// A small "×" button for dismissing banners and dialogs.
#[component]
pub fn CloseButton(on_click: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "secondary outline",
            "aria-label": "Tutup",
            style: "padding: 0 0.5rem; margin: 0; line-height: 1.5;",
            onclick: move |evt| on_click.call(evt),
            "×"
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct InputProps {
    label: String,
    name: String,
    #[props(default = "text".to_string())]
    input_type: String,
    #[props(optional)]
    placeholder: Option<String>,
    #[props(optional)]
    autocomplete: Option<String>,
    value: String,
    on_input: EventHandler<String>,
    #[props(default = false)]
    disabled: bool,
}

/// A labeled, controlled form input field.
pub fn Input(props: InputProps) -> Element {
    rsx! {
        label {
            "{props.label}"
            input {
                r#type: "{props.input_type}",
                name: "{props.name}",
                placeholder: "{props.placeholder.as_deref().unwrap_or(\"\")}",
                autocomplete: "{props.autocomplete.as_deref().unwrap_or(\"on\")}",
                value: "{props.value}",
                disabled: props.disabled,
                oninput: move |evt| props.on_input.call(evt.value()),
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ModalProps {
    is_open: Signal<bool>,
    title: String,
    children: Element,
}

/// A titled dialog that closes on backdrop click or Escape.
pub fn Modal(mut props: ModalProps) -> Element {
    rsx! {
        if (props.is_open)() {
            dialog {
                open: true,
                onclick: move |_| props.is_open.set(false),
                onkeydown: move |evt| {
                    if evt.key() == Key::Escape {
                        props.is_open.set(false);
                    }
                },
                article {
                    // keep clicks inside from reaching the backdrop
                    onclick: |evt| evt.stop_propagation(),
                    header {
                        h3 { style: "margin-bottom: 0;", "{props.title}" }
                    }
                    {props.children}
                }
            }
        }
    }
}
