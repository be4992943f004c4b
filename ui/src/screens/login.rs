//=============================================================================
// File: src/screens/login.rs
//=============================================================================
use crate::app_state::AppState;
use crate::components::pico::Card;
use crate::components::pico::Input;
use crate::hooks::use_session::use_session;
use crate::Route;
use api::ApiError;
use dioxus::prelude::*;

/// The message to show under an auth form, preferring the server's own.
pub(crate) fn auth_error_text(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Transport(_) => "Server tidak dapat dihubungi.".to_string(),
        ApiError::Decode(_) => fallback.to_string(),
        other => other
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
    }
}

#[component]
pub fn Login() -> Element {
    let app_state = use_context::<AppState>();
    let session = use_session();
    let navigator = use_navigator();

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
        let (address, secret) = (email.peek().clone(), password.peek().clone());
        spawn(async move {
            let result = client.login(&address, &secret).await;
            busy.set(false);
            match result {
                Ok(auth) => {
                    session.sign_in(&auth);
                    navigator.push(Route::HomeAuth {});
                }
                Err(e) => error.set(Some(auth_error_text(&e, "Login gagal"))),
            }
        });
    };

    rsx! {
        Card {
            style: "max-width: 28rem; margin: 2rem auto;".to_string(),
            h2 { "Login" }
            form {
                onsubmit: submit,
                Input {
                    label: "Email".to_string(),
                    name: "email".to_string(),
                    input_type: "email".to_string(),
                    autocomplete: "username".to_string(),
                    value: email(),
                    on_input: move |v| email.set(v),
                }
                Input {
                    label: "Password".to_string(),
                    name: "password".to_string(),
                    input_type: "password".to_string(),
                    autocomplete: "current-password".to_string(),
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
                    if busy() { "Memproses…" } else { "Masuk" }
                }
            }
            p {
                small {
                    "Belum punya akun? "
                    Link { to: Route::Register {}, "Daftar" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_preferred() {
        let err = ApiError::from_response(401, r#"{"error": "Invalid credentials"}"#);
        assert_eq!(auth_error_text(&err, "Login gagal"), "Invalid credentials");
    }

    #[test]
    fn bad_bodies_fall_back() {
        let err: ApiError = serde_json::from_str::<u8>("x").unwrap_err().into();
        assert_eq!(auth_error_text(&err, "Login gagal"), "Login gagal");
        let err = ApiError::from_response(500, "");
        assert_eq!(auth_error_text(&err, "Login gagal"), "HTTP 500");
    }
}
