use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use web_sys::SubmitEvent;

use crate::api::client::ApiClient;
use crate::api::error::ValidationErrors;
use crate::auth::ops::{self, AuthOutcome, RegisterPayload};
use crate::auth::session::Session;
use crate::components::form::TextField;
use crate::config;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let client: ApiClient = expect_context();
    let session: Session = expect_context();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let (errors, set_errors) = signal(ValidationErrors::new());
    let (failure, set_failure) = signal(None::<String>);

    let register_action = Action::new_local(move |payload: &RegisterPayload| {
        let client = client.clone();
        let payload = payload.clone();
        async move { ops::register(&client, session, &payload, set_errors).await }
    });

    Effect::new(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(AuthOutcome::Completed) => {
                    navigate(config::AUTHENTICATED_HOME, Default::default());
                }
                Ok(AuthOutcome::Invalid) => {}
                Err(e) => {
                    log::error!("registration failed: {e}");
                    set_failure.set(Some("Registration failed. Please try again.".to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_failure.set(None);
        register_action.dispatch(RegisterPayload {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirmation: password_confirmation.get_untracked(),
        });
    };

    view! {
        <div class="flex items-center justify-center py-16">
            <div class="max-w-md w-full bg-white dark:bg-teal-800 rounded-lg shadow-md p-6">
                <h2 class="text-2xl font-bold text-center text-gray-800 dark:text-gray-200 mb-6">
                    "Create an Account"
                </h2>

                {move || {
                    failure
                        .get()
                        .map(|message| {
                            view! {
                                <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4">
                                    {message}
                                </div>
                            }
                        })
                }}

                <form on:submit=on_submit>
                    <TextField label="Name" name="name" value=name errors=errors/>
                    <TextField label="Email" name="email" input_type="email" value=email errors=errors/>
                    <TextField
                        label="Password"
                        name="password"
                        input_type="password"
                        value=password
                        errors=errors
                    />
                    <TextField
                        label="Confirm password"
                        name="password_confirmation"
                        input_type="password"
                        value=password_confirmation
                        errors=errors
                    />
                    <button
                        type="submit"
                        disabled=move || register_action.pending().get()
                        class="w-full py-2 px-4 bg-teal-600 hover:bg-teal-700 disabled:bg-teal-400
                        text-white font-bold rounded-md transition-colors"
                    >
                        {move || {
                            if register_action.pending().get() { "Creating..." } else { "Register" }
                        }}
                    </button>
                </form>

                <p class="mt-4 text-sm text-center text-gray-600 dark:text-gray-300">
                    "Already have an account? "
                    <a href="/login" class="text-teal-600 dark:text-mint-400 hover:underline">
                        "Sign in"
                    </a>
                </p>
            </div>
        </div>
    }
}
