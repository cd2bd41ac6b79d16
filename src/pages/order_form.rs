use leptos::prelude::*;
use leptos_fetch::QueryClient;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::SubmitEvent;

use crate::api::client::ApiClient;
use crate::api::error::ValidationErrors;
use crate::components::form::{field_error, TextField};
use crate::models::customer::Customer;
use crate::models::order::{Order, OrderDraft, OrderStatus};
use crate::models::pagination::{MaybeWrapped, Paginated};
use crate::models::pen::Pen;

/// Reference data for the selects. Cached by the query client and walked
/// page by page, since the backend paginates everything.
pub async fn all_pens_query() -> Result<Vec<Pen>, String> {
    fetch_all_pages::<Pen>("/api/pens").await
}

pub async fn all_customers_query() -> Result<Vec<Customer>, String> {
    fetch_all_pages::<Customer>("/api/customers").await
}

async fn fetch_all_pages<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>, String> {
    let api = ApiClient::from_env();
    let mut page = 1u32;
    let mut records = Vec::new();
    loop {
        let batch: Paginated<T> = api
            .get_json_silent(&format!("{path}?page={page}"))
            .await
            .map_err(|e| e.to_string())?;
        let last_page = batch.meta.last_page;
        records.extend(batch.data);
        if page >= last_page {
            break;
        }
        page += 1;
    }
    Ok(records)
}

#[component]
pub fn OrderCreatePage() -> impl IntoView {
    view! { <OrderForm order_id=None/> }
}

#[component]
pub fn OrderEditPage() -> impl IntoView {
    let params = use_params_map();
    let order_id = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()))
    });

    view! {
        {move || match order_id.get() {
            Some(id) => view! { <OrderForm order_id=Some(id)/> }.into_any(),
            None => {
                view! {
                    <div class="container mx-auto p-6 text-center text-red-500">
                        "Invalid order id"
                    </div>
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn OrderForm(order_id: Option<i64>) -> impl IntoView {
    let api: ApiClient = expect_context();
    let queries: QueryClient = expect_context();
    let navigate = use_navigate();
    let navigate_back = use_navigate();

    let pen_id = RwSignal::new(String::new());
    let customer_id = RwSignal::new(String::new());
    let quantity = RwSignal::new(String::new());
    let status = RwSignal::new(OrderStatus::Pending);
    let orderday = RwSignal::new(String::new());
    let (errors, set_errors) = signal(ValidationErrors::new());
    let (failure, set_failure) = signal(None::<String>);

    let pens = queries.local_resource(all_pens_query, || ());
    let customers = queries.local_resource(all_customers_query, || ());

    let load_api = api.clone();
    let existing = LocalResource::new(move || {
        let api = load_api.clone();
        async move {
            match order_id {
                Some(id) => api
                    .get_json::<MaybeWrapped<Order>>(&format!("/api/orders/{id}"), None)
                    .await
                    .map(|wrapped| Some(wrapped.into_inner()))
                    .map_err(|e| e.to_string()),
                None => Ok(None),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Ok(Some(order))) = existing.get() {
            let draft = OrderDraft::from(&order);
            pen_id.set(draft.pen_id);
            customer_id.set(draft.customer_id);
            quantity.set(draft.quantity);
            status.set(draft.status);
            orderday.set(draft.orderday);
        }
    });

    let save_api = api.clone();
    let save_action = Action::new_local(move |draft: &OrderDraft| {
        let api = save_api.clone();
        let draft = draft.clone();
        async move {
            set_errors.set(ValidationErrors::new());
            match order_id {
                Some(id) => api.patch_ok(&format!("/api/orders/{id}"), &draft).await,
                None => api.post_ok("/api/orders", &draft).await,
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(()) => navigate("/orders", Default::default()),
                Err(crate::api::error::ApiError::Validation(field_errors)) => {
                    set_errors.set(field_errors);
                }
                Err(e) => {
                    log::error!("failed to save order: {e}");
                    set_failure.set(Some("Failed to save the order. Please try again.".to_string()));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_failure.set(None);
        save_action.dispatch(OrderDraft {
            pen_id: pen_id.get_untracked(),
            customer_id: customer_id.get_untracked(),
            quantity: quantity.get_untracked(),
            status: status.get_untracked(),
            orderday: orderday.get_untracked(),
        });
    };

    let heading = if order_id.is_some() { "Edit Order" } else { "New Order" };

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
                <div class="mb-4">
                    <label class="block text-sm font-medium text-gray-700 dark:text-gray-200 mb-1">
                        "Pen"
                    </label>
                    <Suspense fallback=|| {
                        view! { <p class="text-sm text-gray-500">"Loading pens..."</p> }
                    }>
                        <select
                            class="w-full px-3 py-2 rounded-md border border-gray-300 dark:border-teal-600
                            bg-white dark:bg-teal-800 text-gray-800 dark:text-gray-100"
                            prop:value=move || pen_id.get()
                            on:change=move |ev| pen_id.set(event_target_value(&ev))
                        >
                            <option value="">"Select a pen"</option>
                            {move || {
                                pens.get()
                                    .and_then(|result| result.ok())
                                    .map(|pens| {
                                        pens.into_iter()
                                            .map(|pen| {
                                                let id = pen.id.to_string();
                                                let selected = pen_id.get() == id;
                                                view! {
                                                    <option value=id selected=selected>
                                                        {format!("{} ({})", pen.name, pen.formatted_price())}
                                                    </option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </select>
                    </Suspense>
                    {move || {
                        errors
                            .with(|e| field_error(e, "pen_id"))
                            .map(|message| {
                                view! { <p class="mt-1 text-sm text-red-500">{message}</p> }
                            })
                    }}
                </div>

                <div class="mb-4">
                    <label class="block text-sm font-medium text-gray-700 dark:text-gray-200 mb-1">
                        "Customer"
                    </label>
                    <Suspense fallback=|| {
                        view! { <p class="text-sm text-gray-500">"Loading customers..."</p> }
                    }>
                        <select
                            class="w-full px-3 py-2 rounded-md border border-gray-300 dark:border-teal-600
                            bg-white dark:bg-teal-800 text-gray-800 dark:text-gray-100"
                            prop:value=move || customer_id.get()
                            on:change=move |ev| customer_id.set(event_target_value(&ev))
                        >
                            <option value="">"Select a customer"</option>
                            {move || {
                                customers
                                    .get()
                                    .and_then(|result| result.ok())
                                    .map(|customers| {
                                        customers
                                            .into_iter()
                                            .map(|customer| {
                                                let id = customer.id.to_string();
                                                let selected = customer_id.get() == id;
                                                view! {
                                                    <option value=id selected=selected>
                                                        {customer.name}
                                                    </option>
                                                }
                                            })
                                            .collect_view()
                                    })
                            }}
                        </select>
                    </Suspense>
                    {move || {
                        errors
                            .with(|e| field_error(e, "customer_id"))
                            .map(|message| {
                                view! { <p class="mt-1 text-sm text-red-500">{message}</p> }
                            })
                    }}
                </div>

                <TextField label="Quantity" name="quantity" value=quantity errors=errors/>
                <TextField label="Order day" name="orderday" input_type="date" value=orderday errors=errors/>

                <div class="mb-4">
                    <label class="block text-sm font-medium text-gray-700 dark:text-gray-200 mb-1">
                        "Status"
                    </label>
                    <select
                        class="w-full px-3 py-2 rounded-md border border-gray-300 dark:border-teal-600
                        bg-white dark:bg-teal-800 text-gray-800 dark:text-gray-100"
                        on:change=move |ev| {
                            status
                                .set(
                                    if event_target_value(&ev) == "shipped" {
                                        OrderStatus::Shipped
                                    } else {
                                        OrderStatus::Pending
                                    },
                                );
                        }
                    >
                        <option value="pending" selected=move || status.get() == OrderStatus::Pending>
                            "Pending"
                        </option>
                        <option value="shipped" selected=move || status.get() == OrderStatus::Shipped>
                            "Shipped"
                        </option>
                    </select>
                </div>

                <div class="flex justify-end space-x-3 mt-6">
                    <button
                        type="button"
                        class="px-4 py-2 text-gray-600 dark:text-gray-300 hover:underline"
                        on:click=move |_| {
                            navigate_back("/orders", Default::default());
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
