use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::auth::storage;
use crate::config;
use crate::models::pagination::MaybeWrapped;
use crate::models::user::User;

/// Resolution state of the current-user lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No cached and no network answer yet.
    Unresolved,
    /// A user record is known. May come from the durable copy before
    /// the network has confirmed it.
    Present(User),
    /// The network said there is no session.
    Absent,
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unresolved)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Present(user) => Some(user),
            _ => None,
        }
    }
}

/// Terminal outcomes of the session probe.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The backend rejected the session outright.
    Unauthorized,
    /// Retries exhausted on transport or server failures.
    Failed(String),
}

/// Bookkeeping for the current-user cache. Pure state, so the ordering
/// rules are testable natively; all I/O lives in [`Session`].
///
/// Every invalidation bumps `generation`, and a completing fetch is
/// applied only while its generation is still current. The one counter
/// covers both dedup (at most one fetch per generation) and
/// supersession (a force-refresh discards whatever was in flight).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCache {
    generation: u64,
    in_flight: Option<u64>,
    state: SessionState,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            generation: 0,
            in_flight: None,
            state: SessionState::Unresolved,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Seed from the durable copy. Optimistic and possibly stale, so it
    /// only applies before any other resolution.
    pub fn hydrate(&mut self, user: User) -> bool {
        if self.state == SessionState::Unresolved {
            self.state = SessionState::Present(user);
            true
        } else {
            false
        }
    }

    /// Start a revalidation unless one is already in flight for the
    /// current generation.
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.in_flight == Some(self.generation) {
            return None;
        }
        self.in_flight = Some(self.generation);
        Some(self.generation)
    }

    /// Invalidate the cache entry and guarantee a fresh round trip.
    /// A fetch already in flight is superseded, not joined.
    pub fn force_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.generation
    }

    /// Apply a fetch outcome. Returns `false` when the response belongs
    /// to a superseded generation and was discarded.
    pub fn complete(&mut self, generation: u64, outcome: &Result<User, SessionError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = None;
        self.state = match outcome {
            Ok(user) => SessionState::Present(user.clone()),
            Err(_) => SessionState::Absent,
        };
        true
    }

    /// Back to the initial state. Bumping the generation makes sure late
    /// responses from before the clear are discarded.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.state = SessionState::Unresolved;
    }
}

/// Session handle handed down from the app root. `Copy`; everything
/// inside is an arena-backed signal.
#[derive(Clone, Copy)]
pub struct Session {
    cache: RwSignal<SessionCache>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            cache: RwSignal::new(SessionCache::new()),
        }
    }

    /// Reactive view of the resolution state.
    pub fn state(&self) -> Signal<SessionState> {
        let cache = self.cache;
        Signal::derive(move || cache.with(|c| c.state().clone()))
    }

    /// Adopt the durable copy if there is one, then revalidate against
    /// the network.
    pub fn bootstrap(&self, client: &ApiClient) {
        if let Some(user) = storage::load() {
            log::debug!("hydrating session from durable store");
            self.cache.update(|c| {
                c.hydrate(user);
            });
        }
        self.revalidate(client);
    }

    /// Fetch the current user unless a fetch is already in flight.
    pub fn revalidate(&self, client: &ApiClient) {
        let Some(generation) = self.cache.try_update(|c| c.begin_fetch()).flatten() else {
            return;
        };
        let cache = self.cache;
        let client = client.clone();
        spawn_local(async move {
            run_fetch(cache, &client, generation).await;
        });
    }

    /// Invalidate and refetch regardless of prior state; at least one
    /// fresh round trip is guaranteed.
    pub fn force_refresh(&self, client: &ApiClient) {
        let Some(generation) = self.cache.try_update(|c| Some(c.force_refresh())).flatten() else {
            return;
        };
        let cache = self.cache;
        let client = client.clone();
        spawn_local(async move {
            run_fetch(cache, &client, generation).await;
        });
    }

    /// Like [`Session::force_refresh`] but awaited, for callers that
    /// must see the settled state before navigating (login, register).
    pub async fn refresh_now(&self, client: &ApiClient) -> SessionState {
        if let Some(generation) = self.cache.try_update(|c| Some(c.force_refresh())).flatten() {
            run_fetch(self.cache, client, generation).await;
        }
        self.cache.with_untracked(|c| c.state().clone())
    }

    /// The explicit reset-all-derived-state transition: both copies are
    /// erased. Navigation is the caller's concern.
    pub fn reset(&self) {
        self.cache.update(|c| c.clear());
        storage::clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_fetch(cache: RwSignal<SessionCache>, client: &ApiClient, generation: u64) {
    let outcome = fetch_current_user(client).await;
    let applied = cache
        .try_update(|c| c.complete(generation, &outcome))
        .unwrap_or(false);
    if !applied {
        log::debug!("discarding superseded session response (generation {generation})");
        return;
    }
    match outcome {
        Ok(user) => storage::save(&user),
        // 401 is unrecoverable for this session; both copies go.
        Err(SessionError::Unauthorized) => storage::clear(),
        Err(SessionError::Failed(e)) => log::error!("session fetch failed terminally: {e}"),
    }
}

/// One probe round trip, with the cache layer's bounded retry on
/// non-auth failures.
async fn fetch_current_user(client: &ApiClient) -> Result<User, SessionError> {
    let mut attempt = 0;
    loop {
        match client.get_json_silent::<MaybeWrapped<User>>("/api/user").await {
            Ok(wrapped) => return Ok(wrapped.into_inner()),
            Err(ApiError::Unauthorized) => return Err(SessionError::Unauthorized),
            Err(e) if attempt < config::SESSION_FETCH_RETRIES => {
                attempt += 1;
                log::warn!("session fetch failed (attempt {attempt}): {e}");
                TimeoutFuture::new(config::SESSION_RETRY_DELAY_MS).await;
            }
            Err(e) => return Err(SessionError::Failed(e.to_string())),
        }
    }
}

/// Provides [`Session`] to the tree, bootstraps it, and reacts to the
/// client's unauthorized signal with the reset + single in-app redirect
/// that replaces the old hard-reload behavior.
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let client: ApiClient = expect_context();
    let session = Session::new();
    provide_context(session);

    session.bootstrap(&client);

    if let Some(unauthorized) = client.unauthorized_signal() {
        let navigate = use_navigate();
        Effect::new(move |prev: Option<u32>| {
            let count = unauthorized.get();
            if let Some(prev) = prev {
                if count != prev {
                    log::info!("backend rejected the session, redirecting to login");
                    session.reset();
                    navigate(config::LOGIN_ROUTE, Default::default());
                }
            }
            count
        });
    }

    children()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> User {
        serde_json::from_str(&format!(
            r#"{{
                "id": {id},
                "name": "Ada",
                "email": "ada@example.com",
                "email_verified_at": null,
                "created_at": "2024-03-01T09:30:00.000000Z",
                "updated_at": "2024-03-01T09:30:00.000000Z"
            }}"#
        ))
        .expect("test user parses")
    }

    #[test]
    fn test_initial_state_is_unresolved() {
        let cache = SessionCache::new();
        assert_eq!(*cache.state(), SessionState::Unresolved);
        assert!(!cache.state().is_resolved());
    }

    #[test]
    fn test_hydrate_only_applies_before_resolution() {
        let mut cache = SessionCache::new();
        assert!(cache.hydrate(user(1)));
        assert_eq!(cache.state().user().map(|u| u.id), Some(1));

        // A second durable read must not clobber anything.
        assert!(!cache.hydrate(user(2)));
        assert_eq!(cache.state().user().map(|u| u.id), Some(1));
    }

    #[test]
    fn test_begin_fetch_dedupes_in_flight() {
        let mut cache = SessionCache::new();
        let first = cache.begin_fetch();
        assert!(first.is_some());
        assert_eq!(cache.begin_fetch(), None);

        // Completion frees the slot again.
        assert!(cache.complete(first.unwrap(), &Ok(user(1))));
        assert!(cache.begin_fetch().is_some());
    }

    #[test]
    fn test_force_refresh_supersedes_in_flight_fetch() {
        let mut cache = SessionCache::new();
        let stale = cache.begin_fetch().unwrap();
        let fresh = cache.force_refresh();
        assert_ne!(stale, fresh);

        // The superseded response is discarded even if it arrives first.
        assert!(!cache.complete(stale, &Ok(user(1))));
        assert_eq!(*cache.state(), SessionState::Unresolved);

        assert!(cache.complete(fresh, &Ok(user(2))));
        assert_eq!(cache.state().user().map(|u| u.id), Some(2));
    }

    #[test]
    fn test_only_most_recent_of_stacked_refreshes_wins() {
        let mut cache = SessionCache::new();
        let first = cache.force_refresh();
        let second = cache.force_refresh();
        let third = cache.force_refresh();

        assert!(!cache.complete(first, &Ok(user(1))));
        assert!(!cache.complete(second, &Err(SessionError::Unauthorized)));
        assert!(cache.complete(third, &Ok(user(3))));
        assert_eq!(cache.state().user().map(|u| u.id), Some(3));
    }

    #[test]
    fn test_failure_resolves_absent() {
        let mut cache = SessionCache::new();
        let generation = cache.begin_fetch().unwrap();
        assert!(cache.complete(generation, &Err(SessionError::Failed("boom".into()))));
        assert_eq!(*cache.state(), SessionState::Absent);
        assert!(cache.state().is_resolved());
    }

    #[test]
    fn test_clear_returns_to_unresolved_and_discards_late_responses() {
        let mut cache = SessionCache::new();
        let generation = cache.begin_fetch().unwrap();
        cache.hydrate(user(1));
        cache.clear();

        assert_eq!(*cache.state(), SessionState::Unresolved);
        assert!(!cache.complete(generation, &Ok(user(1))));
        assert_eq!(*cache.state(), SessionState::Unresolved);
    }

    #[test]
    fn test_network_result_overwrites_hydrated_copy() {
        let mut cache = SessionCache::new();
        cache.hydrate(user(1));
        let generation = cache.begin_fetch().unwrap();
        assert!(cache.complete(generation, &Ok(user(2))));
        assert_eq!(cache.state().user().map(|u| u.id), Some(2));
    }
}
