use leptos::prelude::*;
use leptos_icons::Icon;

use crate::api::client::{AbortGuard, ApiClient};
use crate::api::error::ApiError;
use crate::components::banner::{Banner, BannerMessage};
use crate::components::pagination::Pagination;
use crate::models::pagination::{PageMeta, Paginated};
use crate::models::pen::Pen;

#[component]
pub fn PensPage() -> impl IntoView {
    let api: ApiClient = expect_context();

    let (page, set_page) = signal(1u32);
    // Bumped after every successful mutation; the fetch below keys on it,
    // so bumping is the invalidation signal.
    let (version, set_version) = signal(0u32);
    let rows = RwSignal::new(Vec::<Pen>::new());
    let (meta, set_meta) = signal(None::<PageMeta>);
    let banner = RwSignal::new(None::<BannerMessage>);

    let abort = StoredValue::new_local(AbortGuard::new());
    on_cleanup(move || {
        abort.try_update_value(|guard| guard.abort());
    });

    let fetch_api = api.clone();
    let pens = LocalResource::new(move || {
        let api = fetch_api.clone();
        let page = page.get();
        let _ = version.get();
        // Arming the guard aborts whatever the previous key left in
        // flight; only the active request can land.
        let signal = abort
            .try_update_value(|guard| guard.begin())
            .flatten();
        async move {
            api.get_json::<Paginated<Pen>>(&format!("/api/pens?page={page}"), signal.as_ref())
                .await
                .map_err(|e| e.to_string())
        }
    });

    // Mirror the active page into local rows so optimistic edits can
    // overlay without touching the fetched copy.
    Effect::new(move |_| {
        if let Some(Ok(batch)) = pens.get() {
            rows.set(batch.data);
            set_meta.set(Some(batch.meta));
        }
    });

    let delete_api = api.clone();
    let delete_action = Action::new_local(move |id: &i64| {
        let api = delete_api.clone();
        let id = *id;
        async move {
            let snapshot = rows.get_untracked();
            rows.update(|list| list.retain(|pen| pen.id != id));
            match api.delete(&format!("/api/pens/{id}")).await {
                Ok(()) => {
                    // Refetch trues up the pagination metadata.
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
                ApiError::Conflict(_) => BannerMessage::warning(
                    "This pen is referenced by existing orders and cannot be deleted.",
                ),
                other => {
                    log::error!("failed to delete pen: {other}");
                    BannerMessage::error("Failed to delete the pen. Please try again.")
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
            .confirm_with_message("Delete this pen?")
            .unwrap_or(false);
        if confirmed {
            delete_action.dispatch(id);
        }
    });

    view! {
        <div class="container mx-auto p-6">
            <div class="flex justify-between items-center mb-6">
                <h1 class="text-3xl font-bold text-gray-800 dark:text-gray-200">"Pens"</h1>
                <a
                    href="/pens/create"
                    class="px-4 py-2 bg-teal-600 hover:bg-teal-700 text-white rounded-md transition-colors"
                >
                    "New Pen"
                </a>
            </div>

            <Banner message=banner/>

            <Transition fallback=|| {
                view! {
                    <p class="text-center text-teal-600 dark:text-aqua-400">"Loading pens..."</p>
                }
            }>
                {move || {
                    match pens.get() {
                        Some(Err(e)) => {
                            log::error!("failed to load pens: {e}");
                            view! {
                                <div class="text-center text-red-500 py-8">
                                    "Error loading pens"
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
                                                <th class="px-4 py-3">"Name"</th>
                                                <th class="px-4 py-3">"Price"</th>
                                                <th class="px-4 py-3">"Stock"</th>
                                                <th class="px-4 py-3 text-right">"Actions"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            <For
                                                each=move || rows.get()
                                                key=|pen| pen.id
                                                children=move |pen| {
                                                    view! {
                                                        <PenRow pen=pen on_delete=request_delete/>
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
                                                        "No pens yet"
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

#[component]
fn PenRow(pen: Pen, #[prop(into)] on_delete: Callback<i64>) -> impl IntoView {
    let id = pen.id;

    view! {
        <tr class="border-t border-gray-200 dark:border-teal-700 text-gray-800 dark:text-gray-100">
            <td class="px-4 py-3">{pen.name.clone()}</td>
            <td class="px-4 py-3">{pen.formatted_price()}</td>
            <td class="px-4 py-3">{pen.stock}</td>
            <td class="px-4 py-3">
                <div class="flex justify-end items-center space-x-2">
                    <a
                        href=format!("/pens/edit/{id}")
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
