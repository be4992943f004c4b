// This file makes the screen modules available to the rest of the application.

pub mod bookmarks;
pub mod detail;
pub mod home_anonymous;
pub mod home_auth;
pub mod login;
pub mod onboarding;
pub mod register;

use crate::components::notice::Notice;
use crate::hooks::use_api_checker::ApiChecker;
use crate::refresh::emit_after_write_and_report;
use crate::refresh::RefreshSignal;
use api::models::Place;
use api::ApiClient;
use api::ApiError;
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use futures::channel::oneshot;
use std::future::Future;

/// Bookmarks `place` in the background and reports the result in a notice.
pub(crate) fn bookmark_place(
    client: ApiClient,
    mut checker: ApiChecker,
    mut notice: Signal<Option<Notice>>,
    place: Place,
) {
    spawn(async move {
        if let Some(already) = checker.check(client.add_bookmark(place.id).await) {
            let text = if already {
                format!("{} sudah ada di bookmark.", place.place_name)
            } else {
                format!("{} ditambahkan ke bookmark.", place.place_name)
            };
            notice.set(Some(Notice::info(text)));
        }
    });
}

/// Runs a write that changes recommendation inputs, then emits the refresh
/// signal. Both happen on the root scope, so leaving the page mid-write
/// cannot drop the signal. `done` runs in the calling component and is
/// skipped once that component is gone.
pub(crate) fn spawn_refreshing_write<T, F>(
    refresh: RefreshSignal,
    write: F,
    done: impl FnOnce(Result<T, ApiError>) + 'static,
) where
    T: 'static,
    F: Future<Output = Result<T, ApiError>> + 'static,
{
    let (report, result) = oneshot::channel();
    spawn_forever(emit_after_write_and_report(refresh, write, report));
    spawn(async move {
        if let Ok(result) = result.await {
            done(result);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::RefreshToken;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Setup {
        refresh: RefreshSignal,
        gate: Rc<RefCell<Option<oneshot::Receiver<()>>>>,
        shown: Rc<RefCell<Option<Signal<bool>>>>,
        finished: Rc<RefCell<Vec<bool>>>,
    }

    fn root(setup: Setup) -> Element {
        let shown = use_signal(|| true);
        use_hook(|| *setup.shown.borrow_mut() = Some(shown));
        use_context_provider(|| setup.clone());
        rsx! {
            if shown() {
                Saver {}
            }
        }
    }

    /// Starts a write that completes when the test opens the gate.
    #[component]
    fn Saver() -> Element {
        let setup = use_context::<Setup>();
        use_hook(move || {
            let gate = setup.gate.borrow_mut().take();
            let write = async move {
                match gate {
                    Some(gate) => gate
                        .await
                        .map_err(|_| ApiError::InvalidInput("gate dropped".into())),
                    None => Ok(()),
                }
            };
            let finished = setup.finished.clone();
            spawn_refreshing_write(setup.refresh.clone(), write, move |r| {
                finished.borrow_mut().push(r.is_ok())
            });
        });
        rsx! {}
    }

    fn setup() -> (Setup, oneshot::Sender<()>, Rc<RefCell<Vec<RefreshToken>>>, crate::subscription::Subscription) {
        let refresh = RefreshSignal::local_only(Rc::new(|| 10));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = refresh.subscribe(Rc::new(move |t| sink.borrow_mut().push(t)));
        let (open, gate) = oneshot::channel();
        let setup = Setup {
            refresh,
            gate: Rc::new(RefCell::new(Some(gate))),
            shown: Rc::new(RefCell::new(None)),
            finished: Rc::new(RefCell::new(Vec::new())),
        };
        (setup, open, seen, sub)
    }

    #[test]
    fn leaving_the_view_mid_write_still_emits() {
        let (setup, open, seen, _sub) = setup();
        let mut dom = VirtualDom::new_with_props(root, setup.clone());
        dom.rebuild_in_place();
        dom.process_events();
        assert!(seen.borrow().is_empty());

        let mut shown = (*setup.shown.borrow()).expect("root rendered");
        dom.in_runtime(|| shown.set(false));
        dom.process_events();
        dom.render_immediate_to_vec();

        open.send(()).unwrap();
        dom.process_events();

        assert_eq!(seen.borrow().len(), 1);
        assert!(setup.finished.borrow().is_empty());
    }

    #[test]
    fn mounted_view_hears_the_result() {
        let (setup, open, seen, _sub) = setup();
        let mut dom = VirtualDom::new_with_props(root, setup.clone());
        dom.rebuild_in_place();
        dom.process_events();

        open.send(()).unwrap();
        dom.process_events();
        dom.process_events();

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(*setup.finished.borrow(), vec![true]);
    }
}
