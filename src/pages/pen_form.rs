use leptos::prelude::*;
use leptos_fetch::QueryClient;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::SubmitEvent;

use crate::api::client::ApiClient;
use crate::api::error::ValidationErrors;
use crate::components::form::TextField;
use crate::models::pagination::MaybeWrapped;
use crate::models::pen::{Pen, PenDraft};
use crate::pages::order_form::all_pens_query;

#[component]
pub fn PenCreatePage() -> impl IntoView {
    view! { <PenForm pen_id=None/> }
}

#[component]
pub fn PenEditPage() -> impl IntoView {
    let params = use_params_map();
    let pen_id = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()))
    });

    view! {
        {move || match pen_id.get() {
            Some(id) => view! { <PenForm pen_id=Some(id)/> }.into_any(),
            None => {
                view! {
                    <div class="container mx-auto p-6 text-center text-red-500">
                        "Invalid pen id"
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn PenForm(pen_id: Option<i64>) -> impl IntoView {
    let api: ApiClient = expect_context();
    let queries: QueryClient = expect_context();
    let navigate = use_navigate();
    let navigate_back = use_navigate();

    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let stock = RwSignal::new(String::new());
    let (errors, set_errors) = signal(ValidationErrors::new());
    let (failure, set_failure) = signal(None::<String>);

    // Edit mode pre-fills the draft from the existing record.
    let load_api = api.clone();
    let existing = LocalResource::new(move || {
        let api = load_api.clone();
        async move {
            match pen_id {
                Some(id) => api
                    .get_json::<MaybeWrapped<Pen>>(&format!("/api/pens/{id}"), None)
                    .await
                    .map(|wrapped| Some(wrapped.into_inner()))
                    .map_err(|e| e.to_string()),
                None => Ok(None),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Ok(Some(pen))) = existing.get() {
            let draft = PenDraft::from(&pen);
            name.set(draft.name);
            price.set(draft.price);
            stock.set(draft.stock);
        }
    });

    let save_api = api.clone();
    let save_action = Action::new_local(move |draft: &PenDraft| {
        let api = save_api.clone();
        let draft = draft.clone();
        async move {
            set_errors.set(ValidationErrors::new());
            match pen_id {
                Some(id) => api.patch_ok(&format!("/api/pens/{id}"), &draft).await,
                None => api.post_ok("/api/pens", &draft).await,
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(()) => {
                    queries.invalidate_query(all_pens_query, ());
                    navigate("/pens", Default::default());
                }
                Err(crate::api::error::ApiError::Validation(field_errors)) => {
                    set_errors.set(field_errors);
                }
                Err(e) => {
                    log::error!("failed to save pen: {e}");
                    set_failure.set(Some("Failed to save the pen. Please try again.".to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_failure.set(None);
        save_action.dispatch(PenDraft {
            name: name.get_untracked(),
            price: price.get_untracked(),
            stock: stock.get_untracked(),
        });
    };

    let heading = if pen_id.is_some() { "Edit Pen" } else { "New Pen" };

    view! {
        <div class="container mx-auto p-6 max-w-lg">
            <h1 class="text-3xl font-bold text-gray-800 dark:text-gray-200 mb-6">{heading}</h1>

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

            <form
                class="bg-white dark:bg-teal-800 rounded-lg shadow-md p-6"
                on:submit=on_submit
            >
                <TextField label="Name" name="name" value=name errors=errors/>
                <TextField label="Price" name="price" value=price errors=errors/>
                <TextField label="Stock" name="stock" value=stock errors=errors/>
                <div class="flex justify-end space-x-3 mt-6">
                    <button
                        type="button"
                        class="px-4 py-2 text-gray-600 dark:text-gray-300 hover:underline"
                        on:click=move |_| {
                            navigate_back("/pens", Default::default());
                        }
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        disabled=move || save_action.pending().get()
                        class="px-4 py-2 bg-teal-600 hover:bg-teal-700 disabled:bg-teal-400
                        text-white font-bold rounded-md transition-colors"
                    >
                        {move || if save_action.pending().get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
