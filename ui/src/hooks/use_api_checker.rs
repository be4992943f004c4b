use crate::app_state_mut::AppStateMut;
use crate::components::notice::Notice;
use api::ApiError;
use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;

#[derive(Clone, PartialEq, Debug, strum::EnumIs)]
pub enum ApiStatus {
    Reachable,
    Unreachable(String),
}

/// Shown when the server wants a login before it does something.
pub const LOGIN_FIRST: &str = "Login dulu untuk melanjutkan.";

#[derive(Clone, Copy)]
pub struct ApiChecker {
    status: Signal<ApiStatus>,
    notice: Signal<Option<Notice>>,
}

impl ApiChecker {
    /// Inspects a Result from an API call.
    /// - If `Ok`: marks the API reachable and returns the value.
    /// - If `Err`: logs it, raises a notice and returns `None`.
    pub fn check<T>(&mut self, result: Result<T, ApiError>) -> Option<T> {
        self.observe(&result);
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.notify(&e);
                None
            }
        }
    }

    /// Like `check`, without consuming the result or raising a notice.
    /// For call sites that show the error inline.
    pub fn observe<T>(&mut self, result: &Result<T, ApiError>) -> bool {
        match result {
            Ok(_) => {
                if self.status.peek().is_unreachable() {
                    self.status.set(ApiStatus::Reachable);
                }
                true
            }
            Err(ApiError::NeedsOnboarding { message }) => {
                debug!("onboarding required: {message}");
                false
            }
            Err(e) => {
                warn!("API error: {e}");
                if e.is_transport() {
                    self.status.set(ApiStatus::Unreachable(e.to_string()));
                }
                false
            }
        }
    }

    /// Raises the banner matching `error`.
    pub fn notify(&mut self, error: &ApiError) {
        let notice = match error {
            ApiError::Unauthorized { .. } => Notice::login_required(LOGIN_FIRST),
            ApiError::Transport(_) => Notice::error("Server tidak dapat dihubungi."),
            other => Notice::error(
                other
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            ),
        };
        self.notice.set(Some(notice));
    }

    /// Call `.read()` on this in a component to subscribe to changes.
    pub fn status(&self) -> Signal<ApiStatus> {
        self.status
    }
}

pub fn use_api_checker() -> ApiChecker {
    let status = use_context::<Signal<ApiStatus>>();
    let notice = use_context::<AppStateMut>().notice;
    ApiChecker { status, notice }
}
