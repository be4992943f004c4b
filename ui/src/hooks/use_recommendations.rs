//! Personalized recommendations that refetch on refresh signals.

use crate::app_state::AppState;
use crate::app_state_mut::AppStateMut;
use crate::app_state_mut::RecsCache;
use crate::hooks::use_api_checker::use_api_checker;
use crate::hooks::use_session::use_session;
use crate::refresh::bus::TokenCallback;
use crate::refresh::listener::Decision;
use crate::refresh::listener::Outcome;
use crate::refresh::listener::RefreshListener;
use crate::refresh::RefreshToken;
use api::models::Place;
use api::ApiError;
use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use futures::FutureExt;
use futures::Stream;
use futures::StreamExt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum RecsView {
    /// Nothing to show yet.
    Loading,
    Ready(Vec<Place>),
    /// The server needs onboarding first; carries its message.
    NeedsSetup(String),
    /// The first load failed.
    Unavailable(String),
}

#[derive(Debug)]
enum Trigger {
    Signal(RefreshToken),
    Manual,
}

impl Trigger {
    fn apply(self, listener: &mut RefreshListener) -> Decision {
        match self {
            Trigger::Signal(token) => listener.signal(token),
            Trigger::Manual => listener.manual_refresh(),
        }
    }
}

/// Feeds every trigger already waiting in `triggers` to the listener,
/// without waiting for more. Returns how many there were.
fn apply_queued<S>(triggers: &mut S, listener: &mut RefreshListener) -> usize
where
    S: Stream<Item = Trigger> + Unpin,
{
    let mut applied = 0;
    while let Some(Some(trigger)) = triggers.next().now_or_never() {
        trigger.apply(listener);
        applied += 1;
    }
    applied
}

#[derive(Clone, Copy)]
pub struct Recommendations {
    pub view: Signal<RecsView>,
    /// A fetch is in flight.
    pub busy: Signal<bool>,
    triggers: Coroutine<Trigger>,
}

impl Recommendations {
    pub fn refresh(&self) {
        self.triggers.send(Trigger::Manual);
    }
}

/// Loads recommendations on mount and keeps them current while mounted.
///
/// A coroutine owns the [`RefreshListener`]; refresh-signal callbacks and
/// the Refresh button only queue triggers for it. Triggers queued during a
/// fetch are applied before the fetch is reported finished, so any number
/// of them cause at most one more fetch.
pub fn use_recommendations() -> Recommendations {
    let app_state = use_context::<AppState>();
    let mut recs_cache = use_context::<AppStateMut>().recs_cache;
    let session = use_session();
    let mut checker = use_api_checker();

    let mut view = use_signal(|| match &*recs_cache.peek() {
        Some(cache) => RecsView::Ready(cache.places.clone()),
        None => RecsView::Loading,
    });
    let mut busy = use_signal(|| false);

    let refresh = app_state.refresh.clone();
    let triggers = use_coroutine(move |mut rx: UnboundedReceiver<Trigger>| {
        let refresh = refresh.clone();
        let session = session.clone();
        async move {
            let cached = recs_cache.peek().clone();
            let mut listener = RefreshListener::new(cached.as_ref().and_then(|c| c.token));
            let mut decision = listener.mount(refresh.last_known(), cached.is_some());

            loop {
                if decision.is_fetch() {
                    busy.set(true);
                    let result = session.client().hybrid_recs().await;

                    apply_queued(&mut rx, &mut listener);

                    checker.observe(&result);
                    let outcome = match result {
                        Ok(places) => {
                            debug!(
                                "{} recommendations under token {:?}",
                                places.len(),
                                listener.consumed()
                            );
                            recs_cache.set(Some(RecsCache {
                                token: listener.consumed(),
                                places: places.clone(),
                            }));
                            view.set(RecsView::Ready(places));
                            Outcome::Loaded
                        }
                        Err(ApiError::NeedsOnboarding { message }) => {
                            view.set(RecsView::NeedsSetup(message));
                            Outcome::NeedsSetup
                        }
                        Err(e) => {
                            if e.is_unauthorized() {
                                checker.notify(&e);
                            }
                            // keep showing older data if there is any
                            if !matches!(*view.peek(), RecsView::Ready(_)) {
                                view.set(RecsView::Unavailable(e.to_string()));
                            }
                            Outcome::Failed
                        }
                    };
                    busy.set(false);
                    decision = listener.finish(outcome);
                    continue;
                }

                match rx.next().await {
                    Some(trigger) => decision = trigger.apply(&mut listener),
                    None => break,
                }
            }
        }
    });

    let subscription = use_hook(|| {
        let on_token: TokenCallback = Rc::new(move |token| triggers.send(Trigger::Signal(token)));
        Rc::new(app_state.refresh.subscribe(on_token))
    });
    use_drop(move || subscription.unsubscribe());

    Recommendations {
        view,
        busy,
        triggers,
    }
}
