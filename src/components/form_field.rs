//! Labeled Field Components
//!
//! Small labeled input/textarea wrappers shared by the form sections.

use leptos::prelude::*;

/// Labeled input bound to one form field.
#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Labeled textarea bound to one form field.
#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-group full-width">
            <label>{label}</label>
            <textarea
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
