use leptos::prelude::*;

use crate::api::client::ApiClient;
use crate::auth::ops;
use crate::auth::session::Session;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session: Session = expect_context();
    let client: ApiClient = expect_context();
    let state = session.state();

    let (status, set_status) = signal(None::<String>);

    let resend_action = Action::new_local(move |_: &()| {
        let client = client.clone();
        async move { ops::resend_verification(&client).await }
    });

    Effect::new(move |_| {
        if let Some(result) = resend_action.value().get() {
            match result {
                Ok(()) => set_status.set(Some("Verification mail sent.".to_string())),
                Err(e) => {
                    log::error!("resend verification failed: {e}");
                    set_status.set(Some("Could not send the verification mail.".to_string()));
                }
            }
        }
    });

    view! {
        <div class="container mx-auto p-6 max-w-lg">
            <h1 class="text-3xl font-bold text-gray-800 dark:text-gray-200 mb-6">"Profile"</h1>

            {move || {
                state
                    .get()
                    .user()
                    .cloned()
                    .map(|user| {
                        view! {
                            <div class="bg-white dark:bg-teal-800 rounded-lg shadow-md p-6">
                                <dl class="space-y-3 text-sm">
                                    <div>
                                        <dt class="font-medium text-gray-500 dark:text-gray-400">
                                            "Name"
                                        </dt>
                                        <dd class="text-gray-800 dark:text-gray-100">{user.name.clone()}</dd>
                                    </div>
                                    <div>
                                        <dt class="font-medium text-gray-500 dark:text-gray-400">
                                            "Email"
                                        </dt>
                                        <dd class="text-gray-800 dark:text-gray-100">{user.email.clone()}</dd>
                                    </div>
                                    <div>
                                        <dt class="font-medium text-gray-500 dark:text-gray-400">
                                            "Member since"
                                        </dt>
                                        <dd class="text-gray-800 dark:text-gray-100">
                                            {user.created_at.format("%Y-%m-%d").to_string()}
                                        </dd>
                                    </div>
                                </dl>

                                {(!user.is_verified())
                                    .then(|| {
                                        view! {
                                            <div class="mt-6 pt-4 border-t border-gray-200 dark:border-teal-700">
                                                <p class="text-sm text-amber-700 dark:text-amber-300 mb-2">
                                                    "Your email address is not verified yet."
                                                </p>
                                                <button
                                                    class="px-4 py-2 text-sm bg-teal-600 hover:bg-teal-700 disabled:bg-teal-400
                                                    text-white rounded-md transition-colors"
                                                    disabled=move || resend_action.pending().get()
                                                    on:click=move |_| {
                                                        resend_action.dispatch(());
                                                    }
                                                >
                                                    "Resend verification mail"
                                                </button>
                                            </div>
                                        }
                                    })}

                                {move || {
                                    status
                                        .get()
                                        .map(|message| {
                                            view! {
                                                <p class="mt-3 text-sm text-emerald-600 dark:text-emerald-300">
                                                    {message}
                                                </p>
                                            }
                                        })
                                }}
                            </div>
                        }
                    })
            }}
        </div>
    }
}
