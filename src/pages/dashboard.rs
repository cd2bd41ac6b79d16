use leptos::prelude::*;
use leptos_fetch::QueryClient;

use crate::api::client::ApiClient;
use crate::auth::session::Session;
use crate::models::customer::Customer;
use crate::models::order::Order;
use crate::models::pagination::Paginated;
use crate::models::pen::Pen;

pub async fn pens_total_query() -> Result<u64, String> {
    first_page_total::<Pen>("/api/pens").await
}

pub async fn orders_total_query() -> Result<u64, String> {
    first_page_total::<Order>("/api/orders").await
}

pub async fn customers_total_query() -> Result<u64, String> {
    first_page_total::<Customer>("/api/customers").await
}

/// The totals live in the pagination metadata, so one page is enough.
async fn first_page_total<T: serde::de::DeserializeOwned>(path: &str) -> Result<u64, String> {
    let api = ApiClient::from_env();
    let batch: Paginated<T> = api
        .get_json_silent(&format!("{path}?page=1"))
        .await
        .map_err(|e| e.to_string())?;
    Ok(batch.meta.total)
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session: Session = expect_context();
    let queries: QueryClient = expect_context();
    let state = session.state();

    let pens_total = queries.local_resource(pens_total_query, || ());
    let orders_total = queries.local_resource(orders_total_query, || ());
    let customers_total = queries.local_resource(customers_total_query, || ());

    view! {
        <div class="container mx-auto p-6">
            <h1 class="text-3xl font-bold text-gray-800 dark:text-gray-200 mb-2">"Dashboard"</h1>
            <p class="text-gray-600 dark:text-gray-300 mb-6">
                {move || {
                    state
                        .get()
                        .user()
                        .map(|user| format!("Welcome back, {}.", user.name))
                        .unwrap_or_default()
                }}
            </p>

            <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
                <StatCard label="Pens" href="/pens" total=pens_total/>
                <StatCard label="Orders" href="/orders" total=orders_total/>
                <StatCard label="Customers" href="/orders" total=customers_total/>
            </div>
        </div>
    }
}

#[component]
fn StatCard(
    label: &'static str,
    href: &'static str,
    total: LocalResource<Result<u64, String>>,
) -> impl IntoView {
    view! {
        <a href=href>
            <div class="bg-white dark:bg-teal-800 rounded-lg shadow-md p-6 hover:shadow-lg transition-shadow">
                <p class="text-sm text-gray-500 dark:text-gray-400">{label}</p>
                <Suspense fallback=|| {
                    view! { <p class="text-3xl font-bold text-gray-400">"\u{2014}"</p> }
                }>
                    {move || {
                        total
                            .get()
                            .map(|result| match result {
                                Ok(total) => {
                                    view! {
                                        <p class="text-3xl font-bold text-teal-600 dark:text-mint-400">
                                            {total}
                                        </p>
                                    }
                                        .into_any()
                                }
                                Err(_) => {
                                    view! {
                                        <p class="text-3xl font-bold text-gray-400">"?"</p>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </div>
        </a>
    }
}
