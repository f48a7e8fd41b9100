//! Schema-driven form: one control per [`FieldConfig`], edits routed through [`apply_change`].

use crate::form::{
    ChangeInput, ChangeOutcome, ErrorMap, FieldConfig, FieldKind, FormData, apply_change,
    blocks_key, control_class, grid_class, select_options, span_class,
};
use crate::web_support;
use leptos::ev::{Event, KeyboardEvent, SubmitEvent};
use leptos::logging::error;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};

const BACK_BUTTON_CLASS: &str = "flex items-center gap-2 text-sm font-medium text-gray-700 border border-gray-300 bg-gray-100 hover:bg-gray-200 px-4 py-2 rounded-md transition-colors";
const GENERATE_BUTTON_CLASS: &str =
    "bg-green-600 hover:bg-green-700 text-white px-4 py-2 rounded-lg transition";
const CANCEL_BUTTON_CLASS: &str =
    "bg-gray-500 cursor-pointer hover:bg-gray-600 text-white px-6 py-2 rounded-lg transition";
const SAVE_BUTTON_CLASS: &str =
    "bg-green-600 cursor-pointer hover:bg-green-700 text-white px-6 py-2 rounded-lg transition";

/// Renders `fields` in a grid and keeps `form_data` in sync with the controls.
///
/// ### Parameters
/// `form_data` / `set_form_data`: current values and their setter
///
/// `on_submit`: run when the form is submitted (Save or Enter)
///
/// `errors`: messages shown under the matching controls
///
/// `on_generate_code`, `on_cancel`: optional footer actions
#[component]
pub fn GenericForm(
    fields: Vec<FieldConfig>,
    #[prop(into)] form_data: Signal<FormData>,
    #[prop(into)] set_form_data: SignalSetter<FormData>,
    on_submit: Callback<()>,
    #[prop(optional, into)] title: String,
    #[prop(optional)] on_generate_code: Option<Callback<()>>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    #[prop(optional)] show_back_button: bool,
    #[prop(default = 2)] grid_cols: usize,
    #[prop(into, default = Signal::stored(true))] show_save_button: Signal<bool>,
    #[prop(default = true)] show_cancel_button: bool,
    #[prop(into, default = Signal::stored(ErrorMap::new()))] errors: Signal<ErrorMap>,
) -> impl IntoView {
    let schema = Arc::new(fields);

    let heading = (!title.is_empty())
        .then(|| view! { <h2 class="text-xl font-semibold mb-4">{title}</h2> });
    let back_button = show_back_button.then(|| {
        view! {
            <button
                type="button"
                class=BACK_BUTTON_CLASS
                on:click=move |_| {
                    if let Err(err) = web_support::history_back() {
                        error!("back navigation failed: {err}");
                    }
                }
            >
                "← Back"
            </button>
        }
    });

    let controls = schema
        .iter()
        .map(|field| {
            view! {
                <FormField
                    field=field.clone()
                    schema=schema.clone()
                    form_data
                    set_form_data
                    errors
                />
            }
        })
        .collect_view();

    let generate_code = on_generate_code.map(|generate| {
        view! {
            <div>
                <button type="button" class=GENERATE_BUTTON_CLASS on:click=move |_| generate.run(())>
                    "Generate Code"
                </button>
            </div>
        }
    });

    let save_button = || {
        view! {
            <button type="submit" class=SAVE_BUTTON_CLASS>
                "Save"
            </button>
        }
    };
    // With Cancel shown the row is static and only Save toggles; without it the
    // whole row follows Save.
    let footer = if show_cancel_button {
        view! {
            <div class="flex justify-between pt-6">
                <button
                    type="button"
                    class=CANCEL_BUTTON_CLASS
                    on:click=move |_| {
                        if let Some(cancel) = on_cancel {
                            cancel.run(());
                        }
                    }
                >
                    "Cancel"
                </button>
                <Show when=move || show_save_button.get()>{save_button()}</Show>
            </div>
        }
            .into_any()
    } else {
        view! {
            <Show when=move || show_save_button.get()>
                <div class="flex justify-between pt-6">
                    <div />
                    {save_button()}
                </div>
            </Show>
        }
            .into_any()
    };

    view! {
        <form
            class="space-y-6"
            on:submit=move |ev: SubmitEvent| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <div class="flex justify-between items-center">{heading} {back_button}</div>
            <div class=grid_class(grid_cols)>{controls}</div>
            {generate_code}
            {footer}
        </form>
    }
}

/// One labelled control, chosen by the field's kind.
#[component]
fn FormField(
    field: FieldConfig,
    schema: Arc<Vec<FieldConfig>>,
    form_data: Signal<FormData>,
    set_form_data: SignalSetter<FormData>,
    errors: Signal<ErrorMap>,
) -> impl IntoView {
    let name = field.name.clone();

    let error = {
        let name = name.clone();
        Signal::derive(move || errors.with(|e| e.get(&name).map(str::to_string)))
    };
    let error_line = move || {
        error
            .get()
            .map(|message| view! { <p class="text-sm text-red-600 mt-1">{message}</p> })
    };

    // Applies a change to a copy of the current values; a rejected edit is
    // written back to the control so it keeps showing the stored value.
    let on_change = {
        let name = name.clone();
        move |ev: Event, input: ChangeInput| {
            let mut next = form_data.get_untracked();
            match apply_change(&schema, &mut next, &name, input) {
                ChangeOutcome::Accepted => set_form_data.set(next),
                ChangeOutcome::Rejected => restore_control_value(&ev, &next.text(&name)),
            }
        }
    };

    let label = view! {
        <label class="block text-sm font-semibold text-gray-700 mb-1">
            {field.label.clone()}
            {field.required.then(|| view! { <span class="text-red-500 ml-1">"*"</span> })}
        </label>
    };

    let control = match &field.kind {
        FieldKind::Select(_) => {
            let value = {
                let name = name.clone();
                move || form_data.with(|d| d.text(&name))
            };
            let options = select_options(&field)
                .into_iter()
                .map(|opt| {
                    let value = value.clone();
                    let option_value = opt.value.clone();
                    view! {
                        <option
                            value=opt.value
                            disabled=opt.placeholder
                            hidden=opt.placeholder
                            prop:selected=move || value() == option_value
                        >
                            {opt.label}
                        </option>
                    }
                })
                .collect_view();
            view! {
                <div class="space-y-1">
                    <select
                        name=name.clone()
                        class=move || control_class(error.get().is_some())
                        prop:value=value
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            on_change(ev, ChangeInput::Text(value));
                        }
                    >
                        {options}
                    </select>
                    {error_line}
                </div>
            }
                .into_any()
        }
        FieldKind::Checkbox => {
            let checked = {
                let name = name.clone();
                move || form_data.with(|d| d.checked(&name))
            };
            view! {
                <div class="flex items-center gap-2">
                    <input
                        type="checkbox"
                        id=name.clone()
                        name=name.clone()
                        class="h-5 w-5 text-purple-600 border-gray-300 rounded focus:ring-purple-500"
                        prop:checked=checked
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            on_change(ev, ChangeInput::Checked(checked));
                        }
                    />
                    <label for=name.clone() class="text-sm font-semibold text-gray-700">
                        {field.placeholder.clone()}
                    </label>
                </div>
            }
                .into_any()
        }
        FieldKind::Text | FieldKind::Number | FieldKind::Date => {
            let value = {
                let name = name.clone();
                move || form_data.with(|d| d.text(&name))
            };
            let key_field = field.clone();
            view! {
                <div class="space-y-1">
                    <input
                        type=field.kind.input_type()
                        name=name.clone()
                        placeholder=field.placeholder.clone()
                        class=move || control_class(error.get().is_some())
                        prop:value=value
                        on:keydown=move |ev: KeyboardEvent| {
                            let shortcut = ev.ctrl_key() || ev.meta_key() || ev.alt_key();
                            if !shortcut && blocks_key(&key_field, &ev.key()) {
                                ev.prevent_default();
                            }
                        }
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            on_change(ev, ChangeInput::Text(value));
                        }
                    />
                    {error_line}
                </div>
            }
                .into_any()
        }
    };

    view! {
        <div class=span_class(field.col_span)>
            {label}
            {control}
        </div>
    }
}

fn restore_control_value(ev: &Event, value: &str) {
    let Some(target) = ev.target() else {
        return;
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}
