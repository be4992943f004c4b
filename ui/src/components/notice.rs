//! The single dismissible banner shown above every screen.

use crate::app_state_mut::AppStateMut;
use crate::compat;
use crate::components::pico::CloseButton;
use crate::Route;
use dioxus::prelude::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum NoticeKind {
    Info,
    /// The server refused the request until the user logs in.
    LoginRequired,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn login_required(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::LoginRequired,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Info notices go away on their own after this long.
const INFO_LIFETIME: Duration = Duration::from_secs(4);

#[component]
pub fn NoticeBanner() -> Element {
    let mut notice = use_context::<AppStateMut>().notice;

    use_effect(move || {
        let Some(current) = notice.read().clone() else {
            return;
        };
        if current.kind.is_info() {
            spawn(async move {
                compat::sleep(INFO_LIFETIME).await;
                // a newer notice may have replaced it meanwhile
                if notice.peek().as_ref() == Some(&current) {
                    notice.set(None);
                }
            });
        }
    });

    let Some(current) = notice() else {
        return rsx! {};
    };

    let border = match current.kind {
        NoticeKind::Info => "var(--pico-primary)",
        NoticeKind::LoginRequired => "var(--pico-color-amber-450, #d29922)",
        NoticeKind::Error => "var(--pico-del-color)",
    };

    rsx! {
        article {
            role: "status",
            style: "display: flex; align-items: center; gap: 1rem; border-left: 4px solid {border}; padding: 0.75rem 1rem;",
            span { style: "flex: 1;", "{current.text}" }
            if current.kind.is_login_required() {
                Link {
                    to: Route::Login {},
                    onclick: move |_| notice.set(None),
                    "Login"
                }
            }
            CloseButton { on_click: move |_| notice.set(None) }
        }
    }
}
