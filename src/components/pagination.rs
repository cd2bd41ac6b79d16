use leptos::prelude::*;

use crate::models::pagination::PageMeta;

/// Pager for list pages. Every emitted page number is pre-clamped to
/// `[1, last_page]`, so callers can feed it straight into their page
/// signal.
#[component]
pub fn Pagination(
    #[prop(into)] meta: Signal<Option<PageMeta>>,
    #[prop(into)] on_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <div>
            {move || {
                meta.get()
                    .map(|meta| {
                        let current = meta.current_page;
                        let prev_page = meta.clamp_page(current.saturating_sub(1));
                        let next_page = meta.clamp_page(current.saturating_add(1));
                        let has_prev = meta.has_prev();
                        let has_next = meta.has_next();
                        let pages: Vec<u32> = (1..=meta.last_page.max(1)).collect();
                        view! {
                            <div class="flex items-center justify-between mt-4">
                                <span class="text-sm text-gray-500 dark:text-gray-400">
                                    {meta.summary()}
                                </span>
                                <nav class="flex space-x-1">
                                    <button
                                        class="px-3 py-1 text-sm rounded border border-gray-300 dark:border-teal-600
                                        text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-teal-700
                                        disabled:opacity-40 disabled:cursor-not-allowed"
                                        disabled=!has_prev
                                        on:click=move |_| {
                                            on_page.run(prev_page);
                                        }
                                    >
                                        "Previous"
                                    </button>
                                    <For
                                        each=move || pages.clone()
                                        key=|page| *page
                                        children=move |page| {
                                            let active = page == current;
                                            view! {
                                                <button
                                                    class=move || {
                                                        if active {
                                                            "px-3 py-1 text-sm rounded border border-teal-600 bg-teal-600 text-white"
                                                        } else {
                                                            "px-3 py-1 text-sm rounded border border-gray-300 dark:border-teal-600
                                                            text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-teal-700"
                                                        }
                                                    }
                                                    on:click=move |_| {
                                                        on_page.run(page);
                                                    }
                                                >
                                                    {page}
                                                </button>
                                            }
                                        }
                                    />
                                    <button
                                        class="px-3 py-1 text-sm rounded border border-gray-300 dark:border-teal-600
                                        text-gray-600 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-teal-700
                                        disabled:opacity-40 disabled:cursor-not-allowed"
                                        disabled=!has_next
                                        on:click=move |_| {
                                            on_page.run(next_page);
                                        }
                                    >
                                        "Next"
                                    </button>
                                </nav>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
