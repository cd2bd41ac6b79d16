use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::SubmitEvent;

use crate::api::client::ApiClient;
use crate::api::error::ValidationErrors;
use crate::auth::ops::{self, AuthOutcome, ResetPasswordPayload};
use crate::components::form::TextField;
use crate::config;

/// `/password-reset/:token` — the form behind the link in the reset
/// mail. On success the visitor is sent to the login page to sign in
/// with the new password.
#[component]
pub fn PasswordResetPage() -> impl IntoView {
    let client: ApiClient = expect_context();
    let navigate = use_navigate();
    let params = use_params_map();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let (errors, set_errors) = signal(ValidationErrors::new());
    let (failure, set_failure) = signal(None::<String>);

    let reset_action = Action::new_local(move |payload: &ResetPasswordPayload| {
        let client = client.clone();
        let payload = payload.clone();
        async move { ops::reset_password(&client, &payload, set_errors).await }
    });

    Effect::new(move |_| {
        if let Some(result) = reset_action.value().get() {
            match result {
                Ok(AuthOutcome::Completed) => {
                    navigate(config::LOGIN_ROUTE, Default::default());
                }
                Ok(AuthOutcome::Invalid) => {}
                Err(e) => {
                    log::error!("password reset failed: {e}");
                    set_failure.set(Some("Could not reset the password.".to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_failure.set(None);
        let token = params.with_untracked(|p| p.get("token").unwrap_or_default());
        reset_action.dispatch(ResetPasswordPayload {
            token,
            email: email.get_untracked(),
            password: password.get_untracked(),
            password_confirmation: password_confirmation.get_untracked(),
        });
    };

    view! {
        <div class="flex items-center justify-center py-16">
            <div class="max-w-md w-full bg-white dark:bg-teal-800 rounded-lg shadow-md p-6">
                <h2 class="text-2xl font-bold text-center text-gray-800 dark:text-gray-200 mb-6">
                    "Choose a New Password"
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
                    <TextField label="Email" name="email" input_type="email" value=email errors=errors/>
                    <TextField
                        label="New password"
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
                        disabled=move || reset_action.pending().get()
                        class="w-full py-2 px-4 bg-teal-600 hover:bg-teal-700 disabled:bg-teal-400
                        text-white font-bold rounded-md transition-colors"
                    >
                        {move || {
                            if reset_action.pending().get() { "Resetting..." } else { "Reset password" }
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}
