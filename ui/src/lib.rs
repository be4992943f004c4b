// The client-side Dioxus application logic.

use dioxus::prelude::*;

mod app_state;
mod app_state_mut;
pub mod compat;
mod components;
pub mod hooks;
pub mod refresh;
mod screens;
pub mod storage;
pub mod subscription;

use api::config::ClientConfig;
use api::models::PlaceId;
use api::prefs::user_prefs::UserPrefs;
use app_state::AppState;
use app_state_mut::AppStateMut;
use components::notice::NoticeBanner;
use components::pico::Container;
use dioxus_logger::tracing::info;
use hooks::use_api_checker::ApiStatus;
use hooks::use_session::use_session;
use screens::bookmarks::Bookmarks;
use screens::detail::Detail;
use screens::home_anonymous::HomeAnonymous;
use screens::home_auth::HomeAuth;
use screens::login::Login;
use screens::onboarding::Onboarding;
use screens::register::Register;
use std::rc::Rc;
use storage::AUTH_TOKEN_KEY;

const PICO_CSS: &str = "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.cyan.min.css";

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        HomeAnonymous {},
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/place/:id")]
        Detail { id: PlaceId },
        #[layout(RequireAuth)]
            #[route("/home")]
            HomeAuth {},
            #[route("/bookmarks")]
            Bookmarks {},
            #[route("/onboarding")]
            Onboarding {},
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    // Services are built once per tab.
    let app_state = use_hook(|| {
        AppState::new(
            ClientConfig::from_env(),
            UserPrefs::from_env(),
            compat::open_durable_store(),
            Rc::new(compat::now_millis),
        )
    });
    use_context_provider(|| app_state.clone());

    let session = use_signal(|| app_state.store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty()));
    let notice = use_signal(|| None);
    let recs_cache = use_signal(|| None);
    use_context_provider(|| AppStateMut {
        session,
        notice,
        recs_cache,
    });
    use_context_provider(|| Signal::new(ApiStatus::Reachable));

    use_hook(|| {
        info!(
            "api at {}, prices in {}, signed in: {}",
            app_state.client.config().api_base,
            app_state.prefs.display_preference().currency.code(),
            session.peek().is_some()
        )
    });

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet { href: PICO_CSS }
        Router::<Route> {}
    }
}

/// Navbar, notice banner and the routed screen.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {}
        Container {
            NoticeBanner {}
            ApiStatusBanner {}
            Outlet::<Route> {}
        }
    }
}

#[component]
fn Navbar() -> Element {
    let session = use_session();
    let navigator = use_navigator();
    let signed_in = session.is_signed_in();

    rsx! {
        header {
            class: "container",
            nav {
                ul {
                    li {
                        Link { to: Route::HomeAnonymous {}, strong { "EcoTourism" } }
                    }
                    if signed_in {
                        li { Link { to: Route::HomeAuth {}, "Home (AI)" } }
                        li { Link { to: Route::Bookmarks {}, "Bookmarks" } }
                        li { Link { to: Route::Onboarding {}, "Rate" } }
                    }
                }
                ul {
                    if signed_in {
                        li {
                            button {
                                class: "contrast",
                                onclick: move |_| {
                                    let mut session = session.clone();
                                    session.sign_out();
                                    navigator.push(Route::HomeAnonymous {});
                                },
                                "Logout"
                            }
                        }
                    } else {
                        li { Link { to: Route::Login {}, "Login" } }
                        li { Link { to: Route::Register {}, "Register" } }
                    }
                }
            }
        }
    }
}

#[component]
fn ApiStatusBanner() -> Element {
    let status = use_context::<Signal<ApiStatus>>();
    let current = status.read().clone();
    match current {
        ApiStatus::Reachable => rsx! {},
        ApiStatus::Unreachable(reason) => rsx! {
            p {
                title: "{reason}",
                style: "color: var(--pico-del-color);",
                "Server tidak dapat dihubungi. Data yang tampil mungkin sudah lama."
            }
        },
    }
}

/// Sends visitors without a stored token to the login screen.
#[component]
fn RequireAuth() -> Element {
    let session = use_session();
    let navigator = use_navigator();
    let signed_in = session.is_signed_in();

    use_effect(move || {
        if !session.is_signed_in() {
            navigator.replace(Route::Login {});
        }
    });

    if signed_in {
        rsx! { Outlet::<Route> {} }
    } else {
        rsx! {}
    }
}

/// Unknown paths go home.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        navigator.replace(Route::HomeAnonymous {});
    });
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::history::History;
    use dioxus::history::MemoryHistory;
    use std::cell::RefCell;
    use crate::storage::MemoryStore;

    #[derive(Clone)]
    struct Harness {
        history: Rc<MemoryHistory>,
        session: Rc<RefCell<Option<Signal<Option<String>>>>>,
    }

    /// `App` with an in-memory history and store, signed in from the start.
    fn signed_in_app(harness: Harness) -> Element {
        use_hook(|| {
            let history: Rc<dyn History> = harness.history.clone();
            dioxus::history::provide_history_context(history);
        });
        let app_state = use_hook(|| {
            AppState::new(
                ClientConfig::default(),
                UserPrefs::default(),
                Rc::new(MemoryStore::new()),
                Rc::new(|| 1),
            )
        });
        use_context_provider(|| app_state.clone());
        let session = use_signal(|| Some("stored-token".to_string()));
        use_hook(|| *harness.session.borrow_mut() = Some(session));
        use_context_provider(|| AppStateMut {
            session,
            notice: Signal::new(None),
            recs_cache: Signal::new(None),
        });
        use_context_provider(|| Signal::new(ApiStatus::Reachable));
        rsx! { Router::<Route> {} }
    }

    #[tokio::test]
    async fn losing_the_session_leaves_protected_pages() {
        let harness = Harness {
            history: Rc::new(MemoryHistory::with_initial_path("/bookmarks")),
            session: Rc::new(RefCell::new(None)),
        };
        let mut dom = VirtualDom::new_with_props(signed_in_app, harness.clone());
        dom.rebuild_in_place();
        dom.process_events();
        assert_eq!(harness.history.current_route(), "/bookmarks");

        let mut session = (*harness.session.borrow()).expect("app rendered");
        dom.in_runtime(|| session.set(None));
        for _ in 0..4 {
            dom.process_events();
            dom.render_immediate_to_vec();
        }

        assert_eq!(harness.history.current_route(), "/login");
    }
}
