//! UX-only route guards: they redirect based on the resolved session,
//! but the backend still authorizes every request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::api::client::ApiClient;
use crate::auth::session::{Session, SessionState};
use crate::config;

#[derive(Clone, Copy, PartialEq, Eq)]
enum GuardMode {
    RequireAuth,
    GuestOnly,
}

/// Guest-only pages bounce signed-in users before the auth rule is even
/// considered; that precedence is load-bearing for `/login`.
fn redirect_target(mode: GuardMode, state: &SessionState) -> Option<&'static str> {
    match (mode, state) {
        (GuardMode::GuestOnly, SessionState::Present(_)) => Some(config::AUTHENTICATED_HOME),
        (GuardMode::RequireAuth, SessionState::Absent) => Some(config::LOGIN_ROUTE),
        _ => None,
    }
}

#[component]
fn Guarded(mode: GuardMode, children: ChildrenFn) -> impl IntoView {
    let session: Session = expect_context();
    let client: ApiClient = expect_context();
    let navigate = use_navigate();

    // Make sure an unresolved session starts resolving; deduped if the
    // provider's probe is already in flight.
    session.revalidate(&client);

    // Plain flag, not a signal: the timer below may outlive this scope,
    // and it must not touch disposed reactive state.
    let cancelled = Arc::new(AtomicBool::new(false));
    on_cleanup({
        let cancelled = cancelled.clone();
        move || cancelled.store(true, Ordering::Relaxed)
    });

    let state = session.state();

    Effect::new(move |_| {
        let current = state.get();
        if !current.is_resolved() || redirect_target(mode, &current).is_none() {
            return;
        }
        let navigate = navigate.clone();
        let cancelled = cancelled.clone();
        spawn_local(async move {
            // Settle window so a state flap right after resolution does
            // not bounce the user through a redirect.
            TimeoutFuture::new(config::GUARD_STABILIZE_MS).await;
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            // The state may have changed while we waited.
            if let Some(target) = redirect_target(mode, &state.get_untracked()) {
                navigate(target, Default::default());
            }
        });
    });

    view! {
        <Show
            when=move || {
                let current = state.get();
                current.is_resolved() && redirect_target(mode, &current).is_none()
            }
            fallback=|| {
                view! {
                    <div class="p-8 text-center text-gray-500 dark:text-gray-400">
                        "Loading..."
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Renders children for authenticated users, redirects the rest to the
/// login page.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    view! { <Guarded mode=GuardMode::RequireAuth children=children/> }
}

/// Renders children for signed-out visitors, redirects authenticated
/// users to the dashboard.
#[component]
pub fn GuestOnly(children: ChildrenFn) -> impl IntoView {
    view! { <Guarded mode=GuardMode::GuestOnly children=children/> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::User;

    fn user() -> User {
        serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Ada",
                "email": "ada@example.com",
                "email_verified_at": null,
                "created_at": "2024-03-01T09:30:00.000000Z",
                "updated_at": "2024-03-01T09:30:00.000000Z"
            }"#,
        )
        .expect("test user parses")
    }

    #[test]
    fn test_guest_precedence_beats_auth_rule() {
        let present = SessionState::Present(user());
        assert_eq!(
            redirect_target(GuardMode::GuestOnly, &present),
            Some(config::AUTHENTICATED_HOME)
        );
        assert_eq!(redirect_target(GuardMode::RequireAuth, &present), None);
    }

    #[test]
    fn test_absent_session_redirects_to_login() {
        assert_eq!(
            redirect_target(GuardMode::RequireAuth, &SessionState::Absent),
            Some(config::LOGIN_ROUTE)
        );
        assert_eq!(redirect_target(GuardMode::GuestOnly, &SessionState::Absent), None);
    }

    #[test]
    fn test_unresolved_never_redirects() {
        assert_eq!(
            redirect_target(GuardMode::RequireAuth, &SessionState::Unresolved),
            None
        );
        assert_eq!(
            redirect_target(GuardMode::GuestOnly, &SessionState::Unresolved),
            None
        );
    }
}
