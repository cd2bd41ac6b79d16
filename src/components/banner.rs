use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
    Success,
}

/// Dismissable page-level message, used for delete conflicts and other
/// non-field failures.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerMessage {
    pub kind: BannerKind,
    pub text: String,
}

impl BannerMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }
}

#[component]
pub fn Banner(message: RwSignal<Option<BannerMessage>>) -> impl IntoView {
    view! {
        {move || {
            message
                .get()
                .map(|banner| {
                    let colors = match banner.kind {
                        BannerKind::Error => {
                            "bg-red-100 border-red-400 text-red-700 dark:bg-red-900 dark:text-red-200"
                        }
                        BannerKind::Warning => {
                            "bg-amber-100 border-amber-400 text-amber-800 dark:bg-amber-900 dark:text-amber-200"
                        }
                        BannerKind::Success => {
                            "bg-emerald-100 border-emerald-400 text-emerald-800 dark:bg-emerald-900 dark:text-emerald-200"
                        }
                    };
                    view! {
                        <div class=format!(
                            "flex items-center justify-between px-4 py-3 mb-4 rounded border {colors}",
                        )>
                            <span>{banner.text.clone()}</span>
                            <button
                                class="ml-4 font-bold hover:opacity-70"
                                on:click=move |_| message.set(None)
                            >
                                "\u{00d7}"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
