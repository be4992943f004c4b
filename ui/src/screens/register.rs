//=============================================================================
// File: src/screens/register.rs
//=============================================================================
use crate::app_state::AppState;
use crate::components::pico::Card;
use crate::components::pico::Input;
use crate::hooks::use_session::use_session;
use crate::screens::login::auth_error_text;
use crate::Route;
use dioxus::prelude::*;

/// Creates an account, signs in and continues to onboarding.
#[component]
pub fn Register() -> Element {
    let app_state = use_context::<AppState>();
    let session = use_session();
    let navigator = use_navigator();

    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        error.set(None);
        busy.set(true);
        let client = app_state.client.clone();
        let mut session = session.clone();
        let (n, e, p) = (name.peek().clone(), email.peek().clone(), password.peek().clone());
        spawn(async move {
            let result = client.register(&n, &e, &p).await;
            busy.set(false);
            match result {
                Ok(auth) => {
                    session.sign_in(&auth);
                    navigator.push(Route::Onboarding {});
                }
                Err(err) => error.set(Some(auth_error_text(&err, "Register gagal"))),
            }
        });
    };

    rsx! {
        Card {
            style: "max-width: 28rem; margin: 2rem auto;".to_string(),
            h2 { "Register" }
            form {
                onsubmit: submit,
                Input {
                    label: "Nama".to_string(),
                    name: "name".to_string(),
                    autocomplete: "name".to_string(),
                    value: name(),
                    on_input: move |v| name.set(v),
                }
                Input {
                    label: "Email".to_string(),
                    name: "email".to_string(),
                    input_type: "email".to_string(),
                    autocomplete: "email".to_string(),
                    value: email(),
                    on_input: move |v| email.set(v),
                }
                Input {
                    label: "Password".to_string(),
                    name: "password".to_string(),
                    input_type: "password".to_string(),
                    autocomplete: "new-password".to_string(),
                    value: password(),
                    on_input: move |v| password.set(v),
                }
                if let Some(message) = error() {
                    p { style: "color: var(--pico-del-color);", "{message}" }
                }
                button {
                    r#type: "submit",
                    disabled: busy(),
                    "aria-busy": if busy() { "true" } else { "false" },
                    "Daftar"
                }
            }
            p {
                small {
                    "Sudah punya akun? "
                    Link { to: Route::Login {}, "Login" }
                }
            }
        }
    }
}
