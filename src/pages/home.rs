use leptos::prelude::*;

use crate::auth::session::{Session, SessionState};

#[component]
pub fn HomePage() -> impl IntoView {
    let session: Session = expect_context();
    let state = session.state();

    view! {
        <div class="container mx-auto p-6 text-center py-24">
            <h1 class="text-4xl font-bold text-teal-600 dark:text-mint-400 mb-4">"penstand"</h1>
            <p class="text-gray-600 dark:text-gray-300 mb-8">
                "Order and inventory administration for the pen shop."
            </p>
            {move || match state.get() {
                SessionState::Present(_) => {
                    view! {
                        <a
                            href="/dashboard"
                            class="px-6 py-3 bg-teal-600 hover:bg-teal-700 text-white font-bold rounded-md transition-colors"
                        >
                            "Go to Dashboard"
                        </a>
                    }
                        .into_any()
                }
                _ => {
                    view! {
                        <a
                            href="/login"
                            class="px-6 py-3 bg-teal-600 hover:bg-teal-700 text-white font-bold rounded-md transition-colors"
                        >
                            "Sign In"
                        </a>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
