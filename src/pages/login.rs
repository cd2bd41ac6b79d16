use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use web_sys::SubmitEvent;

use crate::api::client::ApiClient;
use crate::api::error::ValidationErrors;
use crate::auth::ops::{self, AuthOutcome, ForgotPasswordPayload, LoginPayload};
use crate::auth::session::Session;
use crate::components::form::TextField;
use crate::config;

#[component]
pub fn LoginPage() -> impl IntoView {
    let client: ApiClient = expect_context();
    let session: Session = expect_context();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (errors, set_errors) = signal(ValidationErrors::new());
    let (failure, set_failure) = signal(None::<String>);
    let (show_forgot, set_show_forgot) = signal(false);

    let login_action = Action::new_local(move |payload: &LoginPayload| {
        let client = client.clone();
        let payload = payload.clone();
        async move { ops::login(&client, session, &payload, set_errors).await }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(AuthOutcome::Completed) => {
                    navigate(config::AUTHENTICATED_HOME, Default::default());
                }
                Ok(AuthOutcome::Invalid) => {}
                Err(e) => {
                    log::error!("login failed: {e}");
                    set_failure.set(Some("Sign in failed. Please try again.".to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_failure.set(None);
        login_action.dispatch(LoginPayload {
            email: email.get_untracked(),
            password: password.get_untracked(),
        });
    };

    view! {
        <div class="flex items-center justify-center py-16">
            <div class="max-w-md w-full bg-white dark:bg-teal-800 rounded-lg shadow-md p-6">
                <h2 class="text-2xl font-bold text-center text-gray-800 dark:text-gray-200 mb-6">
                    "Sign In"
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
                        label="Password"
                        name="password"
                        input_type="password"
                        value=password
                        errors=errors
                    />
                    <button
                        type="submit"
                        disabled=move || login_action.pending().get()
                        class="w-full py-2 px-4 bg-teal-600 hover:bg-teal-700 disabled:bg-teal-400
                        text-white font-bold rounded-md transition-colors"
                    >
                        {move || if login_action.pending().get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <div class="mt-4 flex justify-between text-sm">
                    <button
                        class="text-teal-600 dark:text-mint-400 hover:underline"
                        on:click=move |_| set_show_forgot.update(|show| *show = !*show)
                    >
                        "Forgot password?"
                    </button>
                    <a href="/register" class="text-teal-600 dark:text-mint-400 hover:underline">
                        "Create an account"
                    </a>
                </div>

                {move || {
                    show_forgot
                        .get()
                        .then(|| view! { <ForgotPasswordForm/> })
                }}
            </div>
        </div>
    }
}

/// Sends the password-reset mail. Lives on the login page; completion is
/// a status line, not a navigation.
#[component]
fn ForgotPasswordForm() -> impl IntoView {
    let client: ApiClient = expect_context();

    let email = RwSignal::new(String::new());
    let (errors, set_errors) = signal(ValidationErrors::new());
    let (status, set_status) = signal(None::<String>);

    let forgot_action = Action::new_local(move |payload: &ForgotPasswordPayload| {
        let client = client.clone();
        let payload = payload.clone();
        async move { ops::forgot_password(&client, &payload, set_errors).await }
    });

    Effect::new(move |_| {
        if let Some(result) = forgot_action.value().get() {
            match result {
                Ok(AuthOutcome::Completed) => {
                    set_status.set(Some("Reset link sent. Check your inbox.".to_string()));
                }
                Ok(AuthOutcome::Invalid) => set_status.set(None),
                Err(e) => {
                    log::error!("forgot-password failed: {e}");
                    set_status.set(Some("Could not send the reset link.".to_string()));
                }
            }
        }
    });

    view! {
        <div class="mt-4 pt-4 border-t border-gray-200 dark:border-teal-700">
            {move || {
                status
                    .get()
                    .map(|message| {
                        view! {
                            <p class="text-sm text-emerald-600 dark:text-emerald-300 mb-2">
                                {message}
                            </p>
                        }
                    })
            }}
            <TextField label="Account email" name="email" input_type="email" value=email errors=errors/>
            <button
                class="w-full py-2 px-4 bg-gray-200 dark:bg-teal-700 hover:bg-gray-300 dark:hover:bg-teal-600
                text-gray-800 dark:text-gray-100 rounded-md transition-colors"
                disabled=move || forgot_action.pending().get()
                on:click=move |_| {
                    forgot_action.dispatch(ForgotPasswordPayload {
                        email: email.get_untracked(),
                    });
                }
            >
                "Email reset link"
            </button>
        </div>
    }
}
