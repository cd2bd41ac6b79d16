use leptos::prelude::*;

use crate::api::error::ValidationErrors;

/// First backend message for a field, if any.
pub fn field_error(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .get(field)
        .and_then(|messages| messages.first().cloned())
}

/// Labeled input bound to a signal, with the backend's 422 message for
/// the field rendered inline.
#[component]
pub fn TextField(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: RwSignal<String>,
    errors: ReadSignal<ValidationErrors>,
) -> impl IntoView {
    view! {
        <div class="mb-4">
            <label
                for=name
                class="block text-sm font-medium text-gray-700 dark:text-gray-200 mb-1"
            >
                {label}
            </label>
            <input
                id=name
                name=name
                type=input_type
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                class="w-full px-3 py-2 rounded-md border border-gray-300 dark:border-teal-600
                bg-white dark:bg-teal-800 text-gray-800 dark:text-gray-100
                focus:outline-none focus:ring-2 focus:ring-teal-500"
            />
            {move || {
                errors
                    .with(|e| field_error(e, name))
                    .map(|message| {
                        view! { <p class="mt-1 text-sm text-red-500">{message}</p> }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_picks_first_message() {
        let mut errors = ValidationErrors::new();
        errors.insert(
            "email".to_string(),
            vec!["required".to_string(), "invalid".to_string()],
        );
        assert_eq!(field_error(&errors, "email"), Some("required".to_string()));
        assert_eq!(field_error(&errors, "name"), None);
    }
}
