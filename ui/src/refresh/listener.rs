//! Decides when a recommendations view refetches.
//!
//! [`RefreshListener`] is plain data with no I/O. The owner feeds it events
//! (mount, incoming tokens, manual refresh, fetch completion) and performs a
//! fetch whenever it answers [`Decision::Fetch`]. It guarantees:
//!
//! - at most one fetch in flight;
//! - a token not newer than the newest one seen never causes a fetch;
//! - triggers arriving mid-fetch collapse into a single trailing fetch.

use super::RefreshToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum FetchState {
    Idle,
    Fetching,
    /// Fetching, and another trigger arrived since it started.
    FetchingWithPending,
    /// The server needs setup (onboarding) first. Tokens are recorded but
    /// only a manual refresh or a remount fetches again.
    Suspended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIs)]
pub enum Decision {
    /// Start a fetch now.
    Fetch,
    /// Remembered; a fetch follows the one in flight.
    Deferred,
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Loaded,
    Failed,
    NeedsSetup,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshListener {
    state: FetchState,
    /// Newest token seen from any source.
    latest: Option<RefreshToken>,
    /// Token that was newest when the current or last fetch started.
    consumed: Option<RefreshToken>,
}

impl RefreshListener {
    /// `consumed` is the token the cached data was fetched under, if any.
    pub fn new(consumed: Option<RefreshToken>) -> Self {
        Self {
            state: FetchState::Idle,
            latest: consumed,
            consumed,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// The token the data of the current or last fetch corresponds to.
    pub fn consumed(&self) -> Option<RefreshToken> {
        self.consumed
    }

    pub fn latest(&self) -> Option<RefreshToken> {
        self.latest
    }

    /// Called once when the view mounts, with the newest persisted token and
    /// whether cached data is available to show.
    pub fn mount(&mut self, stored: Option<RefreshToken>, has_cache: bool) -> Decision {
        self.latest = self.latest.max(stored);
        if !has_cache || stored > self.consumed {
            self.start()
        } else {
            Decision::Ignored
        }
    }

    pub fn signal(&mut self, token: RefreshToken) -> Decision {
        if Some(token) <= self.latest {
            return Decision::Ignored;
        }
        self.latest = Some(token);

        match self.state {
            FetchState::Idle => self.start(),
            FetchState::Fetching | FetchState::FetchingWithPending => {
                self.state = FetchState::FetchingWithPending;
                Decision::Deferred
            }
            FetchState::Suspended => Decision::Ignored,
        }
    }

    /// A user-requested reload. Always counts as new.
    pub fn manual_refresh(&mut self) -> Decision {
        match self.state {
            FetchState::Idle | FetchState::Suspended => self.start(),
            FetchState::Fetching | FetchState::FetchingWithPending => {
                self.state = FetchState::FetchingWithPending;
                Decision::Deferred
            }
        }
    }

    /// Reports how the fetch started by the last [`Decision::Fetch`] ended.
    pub fn finish(&mut self, outcome: Outcome) -> Decision {
        match (self.state, outcome) {
            (FetchState::Idle | FetchState::Suspended, _) => Decision::Ignored,
            (_, Outcome::NeedsSetup) => {
                self.state = FetchState::Suspended;
                Decision::Ignored
            }
            (FetchState::FetchingWithPending, _) => self.start(),
            (FetchState::Fetching, _) => {
                self.state = FetchState::Idle;
                Decision::Ignored
            }
        }
    }

    fn start(&mut self) -> Decision {
        self.state = FetchState::Fetching;
        self.consumed = self.latest;
        Decision::Fetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: u64) -> RefreshToken {
        RefreshToken::from_millis(ms)
    }

    /// Plays a listener against a fake fetcher, counting fetches and the
    /// largest number in flight at once.
    struct Harness {
        listener: RefreshListener,
        in_flight: usize,
        max_in_flight: usize,
        fetches: usize,
    }

    impl Harness {
        fn mounted(stored: Option<RefreshToken>, cached: Option<Option<RefreshToken>>) -> Self {
            let mut h = Self {
                listener: RefreshListener::new(cached.flatten()),
                in_flight: 0,
                max_in_flight: 0,
                fetches: 0,
            };
            let decision = h.listener.mount(stored, cached.is_some());
            h.apply(decision);
            h
        }

        fn apply(&mut self, decision: Decision) {
            if decision.is_fetch() {
                self.fetches += 1;
                self.in_flight += 1;
                self.max_in_flight = self.max_in_flight.max(self.in_flight);
            }
        }

        fn signal(&mut self, token: RefreshToken) {
            let d = self.listener.signal(token);
            self.apply(d);
        }

        fn complete(&mut self, outcome: Outcome) {
            assert_eq!(self.in_flight, 1, "completion without a fetch");
            self.in_flight -= 1;
            let d = self.listener.finish(outcome);
            self.apply(d);
        }
    }

    #[test]
    fn first_mount_fetches() {
        let h = Harness::mounted(None, None);
        assert_eq!(h.fetches, 1);
        assert!(h.listener.state().is_fetching());
    }

    #[test]
    fn fresh_cache_does_not_refetch() {
        let h = Harness::mounted(Some(t(10)), Some(Some(t(10))));
        assert_eq!(h.fetches, 0);
        assert!(h.listener.state().is_idle());
    }

    #[test]
    fn mount_after_a_signal_picks_it_up_once() {
        let mut h = Harness::mounted(Some(t(20)), Some(Some(t(10))));
        assert_eq!(h.fetches, 1);
        assert_eq!(h.listener.consumed(), Some(t(20)));
        h.complete(Outcome::Loaded);
        h.signal(t(20));
        assert_eq!(h.fetches, 1);
    }

    #[test]
    fn burst_of_signals_coalesces_into_one_trailing_fetch() {
        let mut h = Harness::mounted(None, Some(None));
        assert_eq!(h.fetches, 0);

        h.signal(t(1));
        for ms in 2..=5 {
            h.signal(t(ms));
        }
        assert!(h.listener.state().is_fetching_with_pending());
        h.complete(Outcome::Loaded);
        assert_eq!(h.listener.consumed(), Some(t(5)));
        h.complete(Outcome::Loaded);

        assert_eq!(h.fetches, 2);
        assert_eq!(h.max_in_flight, 1);
        assert!(h.listener.state().is_idle());
    }

    #[test]
    fn duplicates_and_stale_tokens_are_ignored() {
        let mut h = Harness::mounted(None, Some(None));
        h.signal(t(7));
        h.complete(Outcome::Loaded);
        h.signal(t(7));
        h.signal(t(3));
        assert_eq!(h.fetches, 1);
    }

    #[test]
    fn out_of_order_tokens_settle_on_the_newest() {
        let mut early_first = RefreshListener::new(None);
        early_first.signal(t(1));
        early_first.signal(t(2));

        let mut late_first = RefreshListener::new(None);
        late_first.signal(t(2));
        assert!(late_first.signal(t(1)).is_ignored());

        assert_eq!(early_first.latest(), Some(t(2)));
        assert_eq!(late_first.latest(), Some(t(2)));
    }

    #[test]
    fn failure_returns_to_idle_and_retries_on_next_signal() {
        let mut h = Harness::mounted(None, None);
        h.complete(Outcome::Failed);
        assert!(h.listener.state().is_idle());
        h.signal(t(4));
        assert_eq!(h.fetches, 2);
    }

    #[test]
    fn needs_setup_suspends_until_manual_refresh() {
        let mut h = Harness::mounted(None, None);
        h.signal(t(1));
        h.complete(Outcome::NeedsSetup);
        assert!(h.listener.state().is_suspended());

        h.signal(t(2));
        assert_eq!(h.fetches, 1);
        assert_eq!(h.listener.latest(), Some(t(2)));

        let d = h.listener.manual_refresh();
        h.apply(d);
        assert_eq!(h.fetches, 2);
        assert_eq!(h.listener.consumed(), Some(t(2)));
    }

    #[test]
    fn needs_setup_drops_the_pending_fetch() {
        let mut h = Harness::mounted(None, None);
        h.signal(t(6));
        assert!(h.listener.state().is_fetching_with_pending());

        h.complete(Outcome::NeedsSetup);
        assert!(h.listener.state().is_suspended());
        assert_eq!(h.fetches, 1);
        assert_eq!(h.in_flight, 0);

        let d = h.listener.manual_refresh();
        assert!(d.is_fetch());
        h.apply(d);
        assert_eq!(h.listener.consumed(), Some(t(6)));
        assert!(h.listener.state().is_fetching());
    }

    #[test]
    fn manual_refresh_mid_fetch_is_deferred() {
        let mut h = Harness::mounted(None, None);
        assert!(h.listener.manual_refresh().is_deferred());
        assert!(h.listener.manual_refresh().is_deferred());
        h.complete(Outcome::Loaded);
        h.complete(Outcome::Loaded);
        assert_eq!(h.fetches, 2);
        assert_eq!(h.max_in_flight, 1);
    }

    #[test]
    fn stray_completion_is_ignored() {
        let mut listener = RefreshListener::new(None);
        assert!(listener.finish(Outcome::Loaded).is_ignored());
        assert!(listener.state().is_idle());
    }
}
