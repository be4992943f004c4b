//! Cross-view refresh signal.
//!
//! A view that changes recommendation-affecting data (a rating, onboarding
//! likes) calls [`RefreshSignal::emit`] after the write succeeds. Views that
//! show recommendations subscribe and refetch when they see a newer token,
//! whether it came from this tab or another one.

pub mod bus;
pub mod durable;
pub mod listener;

use bus::LocalBus;
use bus::RefreshChannel;
use bus::TokenCallback;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;
use futures::channel::oneshot;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::subscription::Subscription;

/// Milliseconds since the Unix epoch at which recommendation inputs last
/// changed. Newer tokens compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Reads a persisted token. Anything but a decimal integer is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }

    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type Clock = Rc<dyn Fn() -> u64>;

/// The emitter and subscription point, shared by every view of a tab.
#[derive(Clone)]
pub struct RefreshSignal {
    local: LocalBus,
    durable: Option<Rc<dyn RefreshChannel>>,
    clock: Clock,
}

impl RefreshSignal {
    pub fn new(durable: Option<Rc<dyn RefreshChannel>>, clock: Clock) -> Self {
        Self {
            local: LocalBus::new(),
            durable,
            clock,
        }
    }

    /// A signal that never leaves this tab.
    pub fn local_only(clock: Clock) -> Self {
        Self::new(None, clock)
    }

    /// The newest token seen on either channel.
    pub fn last_known(&self) -> Option<RefreshToken> {
        let durable = self.durable.as_ref().and_then(|d| d.last_known());
        self.local.last_known().max(durable)
    }

    /// Publishes a new token and returns it.
    ///
    /// The token is later than the clock and every token already seen, so
    /// two emits in the same millisecond still differ. The durable channel
    /// is written first; if that fails the error is logged and in-tab
    /// subscribers are still notified before this returns.
    pub fn emit(&self) -> RefreshToken {
        let now = RefreshToken::from_millis((self.clock)());
        let token = match self.last_known() {
            Some(seen) => now.max(seen.next()),
            None => now,
        };

        if let Some(durable) = &self.durable {
            if let Err(e) = durable.publish(token) {
                warn!("refresh signal {token} not shared with other tabs: {e}");
            }
        }
        if let Err(e) = self.local.publish(token) {
            warn!("refresh signal {token} not delivered: {e}");
        }
        debug!("emitted refresh signal {token}");
        token
    }

    /// Calls `on_token` for tokens from this tab and from other tabs.
    ///
    /// Nothing here filters duplicates or stale tokens; that is the
    /// subscriber's job (see [`listener::RefreshListener`]).
    pub fn subscribe(&self, on_token: TokenCallback) -> Subscription {
        let local = self.local.subscribe(on_token.clone());
        match &self.durable {
            Some(durable) => local.join(durable.subscribe(on_token)),
            None => local,
        }
    }
}

/// Runs `write` and emits a refresh signal only if it succeeds.
pub async fn emit_after_write<T, E, F>(signal: &RefreshSignal, write: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let value = write.await?;
    signal.emit();
    Ok(value)
}

/// [`emit_after_write`], then sends the result to `report`. The write and
/// the emit finish even when nobody is left to receive it.
pub async fn emit_after_write_and_report<T, E, F>(
    signal: RefreshSignal,
    write: F,
    report: oneshot::Sender<Result<T, E>>,
) where
    F: Future<Output = Result<T, E>>,
{
    let result = emit_after_write(&signal, write).await;
    if report.send(result).is_err() {
        debug!("write finished after its view was closed");
    }
}

#[cfg(test)]
mod tests {
    use super::durable::StorageChannel;
    use super::durable::REFRESH_KEY;
    use super::*;
    use crate::storage::KeyValueStore;
    use crate::storage::MemoryStore;
    use api::ApiError;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::cell::RefCell;

    fn fixed_clock(millis: u64) -> Clock {
        Rc::new(move || millis)
    }

    fn shared_signal(store: &MemoryStore, clock: Clock) -> RefreshSignal {
        let channel: Rc<dyn RefreshChannel> = Rc::new(StorageChannel::new(Rc::new(store.clone())));
        RefreshSignal::new(Some(channel), clock)
    }

    fn record(signal: &RefreshSignal) -> (Rc<RefCell<Vec<RefreshToken>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = signal.subscribe(Rc::new(move |t| sink.borrow_mut().push(t)));
        (seen, sub)
    }

    #[test]
    fn parse_accepts_only_integers() {
        assert_eq!(RefreshToken::parse(" 42 "), Some(RefreshToken::from_millis(42)));
        assert_eq!(RefreshToken::parse(""), None);
        assert_eq!(RefreshToken::parse("4.2"), None);
        assert_eq!(RefreshToken::parse("soon"), None);
        assert_eq!(RefreshToken::from_millis(7).to_string(), "7");
    }

    #[test]
    fn tokens_increase_with_a_stuck_clock() {
        let signal = RefreshSignal::local_only(fixed_clock(1000));
        let a = signal.emit();
        let b = signal.emit();
        let c = signal.emit();
        assert_eq!(a, RefreshToken::from_millis(1000));
        assert!(a < b && b < c);
    }

    #[test]
    fn local_delivery_happens_before_emit_returns() {
        let signal = RefreshSignal::local_only(fixed_clock(5));
        let (seen, _sub) = record(&signal);
        let token = signal.emit();
        assert_eq!(*seen.borrow(), vec![token]);
    }

    #[test]
    fn tokens_reach_other_tabs_and_persist() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_tab();
        let emitter = shared_signal(&tab_a, fixed_clock(100));
        let observer = shared_signal(&tab_b, fixed_clock(50));
        let (seen_a, _sa) = record(&emitter);
        let (seen_b, _sb) = record(&observer);

        let token = emitter.emit();

        assert_eq!(*seen_a.borrow(), vec![token]);
        assert_eq!(*seen_b.borrow(), vec![token]);
        assert_eq!(tab_b.get(REFRESH_KEY), Some(token.to_string()));
        assert_eq!(observer.last_known(), Some(token));
    }

    #[test]
    fn emit_stays_ahead_of_tokens_from_other_tabs() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_tab();
        tab_b.set(REFRESH_KEY, "9000").unwrap();

        let behind = shared_signal(&tab_a, fixed_clock(10));
        assert_eq!(behind.emit(), RefreshToken::from_millis(9001));
    }

    #[test]
    fn failing_storage_still_notifies_this_tab() {
        let store = MemoryStore::new();
        store.reject_writes(true);
        let signal = shared_signal(&store, fixed_clock(77));
        let (seen, _sub) = record(&signal);

        let token = signal.emit();

        assert_eq!(*seen.borrow(), vec![token]);
        assert_eq!(store.get(REFRESH_KEY), None);
        assert!(signal.emit() > token);
    }

    #[test]
    fn dropped_subscription_hears_nothing() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.open_tab();
        let emitter = shared_signal(&tab_a, fixed_clock(1));
        let observer = shared_signal(&tab_b, fixed_clock(1));
        let (seen, sub) = record(&observer);
        drop(sub);
        emitter.emit();
        observer.emit();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn successful_write_emits() {
        let signal = RefreshSignal::local_only(fixed_clock(3));
        let (seen, _sub) = record(&signal);
        let result = block_on(emit_after_write(&signal, async { Ok::<_, ApiError>(()) }));
        assert!(result.is_ok());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn failed_write_does_not_emit() {
        let signal = RefreshSignal::local_only(fixed_clock(3));
        let (seen, _sub) = record(&signal);
        let calls = Cell::new(0);

        let result = block_on(emit_after_write(&signal, async {
            calls.set(calls.get() + 1);
            Err::<(), _>(ApiError::from_response(401, r#"{"msg": "Missing Authorization Header"}"#))
        }));

        assert_eq!(calls.get(), 1);
        assert!(result.unwrap_err().is_unauthorized());
        assert!(seen.borrow().is_empty());
        assert_eq!(signal.last_known(), None);
    }

    #[test]
    fn reported_write_emits_even_without_a_receiver() {
        let signal = RefreshSignal::local_only(fixed_clock(8));
        let (seen, _sub) = record(&signal);

        let (report, result) = oneshot::channel::<Result<u8, ApiError>>();
        drop(result);
        block_on(emit_after_write_and_report(signal.clone(), async { Ok(1) }, report));
        assert_eq!(seen.borrow().len(), 1);

        let (report, result) = oneshot::channel::<Result<u8, ApiError>>();
        block_on(emit_after_write_and_report(signal.clone(), async { Ok(2) }, report));
        assert_eq!(block_on(result).unwrap().unwrap(), 2);
        assert_eq!(seen.borrow().len(), 2);
    }
}
