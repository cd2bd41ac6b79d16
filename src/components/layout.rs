use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::api::client::ApiClient;
use crate::auth::ops;
use crate::auth::session::{Session, SessionState};
use crate::config;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session: Session = expect_context();
    let state = session.state();

    view! {
        <div class="min-h-screen bg-gray-100 dark:bg-teal-900">
            <nav class="bg-white dark:bg-teal-800 border-b border-gray-200 dark:border-teal-700">
                <div class="container mx-auto px-4 flex justify-between items-center h-14">
                    <div class="flex items-center space-x-6">
                        <a
                            href="/"
                            class="text-xl font-bold text-teal-600 dark:text-mint-400"
                        >
                            "penstand"
                        </a>
                        {move || {
                            state
                                .get()
                                .user()
                                .map(|_| {
                                    view! {
                                        <div class="flex items-center space-x-4 text-sm">
                                            <NavLink href="/dashboard" label="Dashboard"/>
                                            <NavLink href="/pens" label="Pens"/>
                                            <NavLink href="/orders" label="Orders"/>
                                            <NavLink href="/profile" label="Profile"/>
                                        </div>
                                    }
                                })
                        }}
                    </div>
                    <UserMenu/>
                </div>
            </nav>
            {children()}
        </div>
    }
}

#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <a
            href=href
            class="text-gray-600 dark:text-gray-300 hover:text-teal-600 dark:hover:text-mint-400 transition-colors"
        >
            {label}
        </a>
    }
}

#[component]
fn UserMenu() -> impl IntoView {
    let session: Session = expect_context();
    let client: ApiClient = expect_context();
    let navigate = use_navigate();
    let state = session.state();

    let logout_action = Action::new_local(move |_: &()| {
        let client = client.clone();
        async move { ops::logout(&client, session).await }
    });

    Effect::new(move |_| {
        if let Some(result) = logout_action.value().get() {
            match result {
                Ok(()) => navigate(config::LOGIN_ROUTE, Default::default()),
                Err(e) => log::error!("logout failed: {e}"),
            }
        }
    });

    view! {
        {move || match state.get() {
            SessionState::Present(user) => {
                view! {
                    <div class="flex items-center space-x-3">
                        <span class="text-sm text-gray-700 dark:text-gray-200">{user.name}</span>
                        <button
                            class="px-3 py-1 text-sm bg-salmon-600 hover:bg-salmon-700 text-white rounded-md transition-colors"
                            disabled=move || logout_action.pending().get()
                            on:click=move |_| {
                                logout_action.dispatch(());
                            }
                        >
                            {move || if logout_action.pending().get() { "Signing out..." } else { "Logout" }}
                        </button>
                    </div>
                }
                    .into_any()
            }
            SessionState::Absent => {
                view! {
                    <a
                        href="/login"
                        class="px-3 py-1 text-sm bg-teal-600 hover:bg-teal-700 text-white rounded-md transition-colors"
                    >
                        "Sign In"
                    </a>
                }
                    .into_any()
            }
            SessionState::Unresolved => view! { <span></span> }.into_any(),
        }}
    }
}
