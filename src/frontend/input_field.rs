use leptos::prelude::*;

/// A labelled single-line input bound to `value`.
///
/// `on_change` receives the new text on every input event; no validation is done here.
#[component]
pub fn InputField(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-gray-600 mb-1">{label}</label>
            <input
                type=input_type
                name=name
                placeholder=placeholder
                required=required
                class="w-full px-4 py-2 border rounded-xl focus:outline-none focus:ring-2 focus:ring-indigo-400"
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
        </div>
    }
}
