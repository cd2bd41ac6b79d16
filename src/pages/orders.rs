use leptos::prelude::*;
use leptos_icons::Icon;

use crate::api::client::{AbortGuard, ApiClient};
use crate::api::error::ApiError;
use crate::components::banner::{Banner, BannerMessage};
use crate::components::pagination::Pagination;
use crate::models::order::{LegacyOrderPayload, Order, OrderStatus};
use crate::models::pagination::{PageMeta, Paginated};

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api: ApiClient = expect_context();

    let (page, set_page) = signal(1u32);
    let (version, set_version) = signal(0u32);
    let rows = RwSignal::new(Vec::<Order>::new());
    let (meta, set_meta) = signal(None::<PageMeta>);
    let banner = RwSignal::new(None::<BannerMessage>);

    let abort = StoredValue::new_local(AbortGuard::new());
    on_cleanup(move || {
        abort.try_update_value(|guard| guard.abort());
    });

    let fetch_api = api.clone();
    let orders = LocalResource::new(move || {
        let api = fetch_api.clone();
        let page = page.get();
        let _ = version.get();
        let signal = abort
            .try_update_value(|guard| guard.begin())
            .flatten();
        async move {
            api.get_json::<Paginated<Order>>(&format!("/api/orders?page={page}"), signal.as_ref())
                .await
                .map_err(|e| e.to_string())
        }
    });

    Effect::new(move |_| {
        if let Some(Ok(batch)) = orders.get() {
            rows.set(batch.data);
            set_meta.set(Some(batch.meta));
        }
    });

    // Status flips are applied to the row immediately and reverted if
    // the backend refuses. The PUT endpoint still speaks the legacy
    // field convention, hence the explicit converter.
    let toggle_api = api.clone();
    let toggle_action = Action::new_local(move |order: &Order| {
        let api = toggle_api.clone();
        let order = order.clone();
        async move {
            let next = order.status.toggled();
            set_row_status(rows, order.id, next);
            let payload = LegacyOrderPayload::with_status(&order, next);
            match api
                .put_ok(&format!("/api/orders/{}", order.id), &payload)
                .await
            {
                Ok(()) => Ok(()),
                Err(e) => {
                    set_row_status(rows, order.id, order.status);
                    Err(e)
                }
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Err(e)) = toggle_action.value().get() {
            log::error!("failed to update order status: {e}");
            banner.set(Some(BannerMessage::error(
                "Failed to update the order status. Please try again.",
            )));
        }
    });

    let delete_api = api.clone();
    let delete_action = Action::new_local(move |id: &i64| {
        let api = delete_api.clone();
        let id = *id;
        async move {
            let snapshot = rows.get_untracked();
            rows.update(|list| list.retain(|order| order.id != id));
            match api.delete(&format!("/api/orders/{id}")).await {
                Ok(()) => {
                    set_version.update(|v| *v += 1);
                    Ok(())
                }
                Err(e) => {
                    rows.set(snapshot);
                    Err(e)
                }
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Err(e)) = delete_action.value().get() {
            banner.set(Some(match e {
                ApiError::Conflict(message) => BannerMessage::warning(message),
                other => {
                    log::error!("failed to delete order: {other}");
                    BannerMessage::error("Failed to delete the order. Please try again.")
                }
            }));
        }
    });

    let on_page = Callback::new(move |requested: u32| {
        let next = meta
            .get_untracked()
            .map(|meta| meta.clamp_page(requested))
            .unwrap_or_else(|| requested.max(1));
        set_page.set(next);
    });

    let request_delete = Callback::new(move |id: i64| {
        let confirmed = window()
            .confirm_with_message("Delete this order?")
            .unwrap_or(false);
        if confirmed {
            delete_action.dispatch(id);
        }
    });

    let request_toggle = Callback::new(move |order: Order| {
        toggle_action.dispatch(order);
    });

    view! {
        <div class="container mx-auto p-6">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-3xl font-bold text-gray-800 dark:text-gray-200">"Orders"</h1>
                <a
                    href="/orders/create"
                    class="px-4 py-2 bg-teal-600 hover:bg-teal-700 text-white rounded-md transition-colors"
                >
                    "New Order"
                </a>
            </div>

            <Banner message=banner/>

            <Transition fallback=|| {
                view! {
                    <p class="text-center text-teal-600 dark:text-aqua-400">"Loading orders..."</p>
                }
            }>
                {move || {
                    match orders.get() {
                        Some(Err(e)) => {
                            log::error!("failed to load orders: {e}");
                            view! {
                                <div class="text-center text-red-500 py-8">
                                    "Error loading orders"
                                </div>
                            }
                                .into_any()
                        }
                        Some(Ok(_)) | None => {
                            view! {
                                <div class="bg-white dark:bg-teal-800 rounded-lg shadow-md overflow-hidden">
                                    <table class="w-full text-left">
                                        <thead class="bg-gray-50 dark:bg-teal-700 text-sm text-gray-600 dark:text-gray-300">
                                            <tr>
                                                <th class="px-4 py-3">"Pen"</th>
                                                <th class="px-4 py-3">"Customer"</th>
                                                <th class="px-4 py-3">"Qty"</th>
                                                <th class="px-4 py-3">"Order day"</th>
                                                <th class="px-4 py-3">"Status"</th>
                                                <th class="px-4 py-3 text-right">"Actions"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            <For
                                                each=move || rows.get()
                                                key=|order| (order.id, order.status)
                                                children=move |order| {
                                                    view! {
                                                        <OrderRow
                                                            order=order
                                                            on_toggle=request_toggle
                                                            on_delete=request_delete
                                                        />
                                                    }
                                                }
                                            />
                                        </tbody>
                                    </table>
                                    {move || {
                                        rows.with(|list| list.is_empty())
                                            .then(|| {
                                                view! {
                                                    <p class="p-6 text-center text-gray-500 dark:text-gray-400">
                                                        "No orders yet"
                                                    </p>
                                                }
                                            })
                                    }}
                                </div>
                            }
                                .into_any()
                        }
                    }
                }}
            </Transition>

            <Pagination meta=Signal::derive(move || meta.get()) on_page=on_page/>
        </div>
    }
}

fn set_row_status(rows: RwSignal<Vec<Order>>, id: i64, status: OrderStatus) {
    rows.update(|list| {
        if let Some(order) = list.iter_mut().find(|order| order.id == id) {
            order.status = status;
        }
    });
}

#[component]
fn OrderRow(
    order: Order,
    #[prop(into)] on_toggle: Callback<Order>,
    #[prop(into)] on_delete: Callback<i64>,
) -> impl IntoView {
    let id = order.id;
    let status = order.status;
    let order_for_toggle = order.clone();

    let status_classes = match status {
        OrderStatus::Pending => {
            "px-2 py-1 text-xs rounded-full bg-amber-100 text-amber-800 dark:bg-amber-900 dark:text-amber-200"
        }
        OrderStatus::Shipped => {
            "px-2 py-1 text-xs rounded-full bg-emerald-100 text-emerald-800 dark:bg-emerald-900 dark:text-emerald-200"
        }
    };

    view! {
        <tr class="border-t border-gray-200 dark:border-teal-700 text-gray-800 dark:text-gray-100">
            <td class="px-4 py-3">{order.pen_name()}</td>
            <td class="px-4 py-3">{order.customer_name()}</td>
            <td class="px-4 py-3">{order.quantity}</td>
            <td class="px-4 py-3">{order.orderday.clone()}</td>
            <td class="px-4 py-3">
                <button
                    class="hover:opacity-80 transition-opacity"
                    title="Toggle status"
                    on:click=move |_| on_toggle.run(order_for_toggle.clone())
                >
                    <span class=status_classes>{status.label()}</span>
                </button>
            </td>
            <td class="px-4 py-3">
                <div class="flex justify-end items-center space-x-2">
                    <a
                        href=format!("/orders/edit/{id}")
                        class="px-2 py-1 text-sm text-teal-600 dark:text-mint-400 hover:underline"
                    >
                        "Edit"
                    </a>
                    <button
                        class="p-1 text-salmon-600 hover:text-salmon-700 transition-colors"
                        on:click=move |_| on_delete.run(id)
                    >
                        <Icon icon=icondata_bs::BsTrash3 width="16" height="16"/>
                    </button>
                </div>
            </td>
        </tr>
    }
}
