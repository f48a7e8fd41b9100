use super::generic_form::GenericForm;
use crate::api::FetchRegistrar;
use crate::form::FormData;
use crate::sign_up::{self, LOGIN_PATH, PendingSubmission, SignUpState};
use crate::web_support;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn go_to(path: &str) {
    if let Err(err) = web_support::navigate_to(path) {
        error!("{err}");
    }
}

/// The registration page. Any submission still running when the page is
/// unmounted is aborted together with its redirect.
#[component]
pub fn SignUp() -> impl IntoView {
    let state = RwSignal::new(SignUpState::new());
    let form_data = Signal::derive(move || state.with(|s| s.form.clone()));
    let set_form_data = SignalSetter::map(move |form: FormData| state.update(|s| s.form = form));
    let errors = Signal::derive(move || state.with(|s| s.errors.clone()));
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let busy = Signal::derive(move || state.with(SignUpState::busy));
    let success = move || state.with(|s| s.success.clone());

    let pending = PendingSubmission::default();
    on_cleanup({
        let pending = pending.clone();
        move || pending.cancel()
    });

    let registrar = FetchRegistrar::default();
    let on_submit = Callback::new(move |()| {
        let registrar = registrar.clone();
        let task = pending.start(async move {
            sign_up::submit_and_redirect(&registrar, &state, web_support::sleep, go_to).await
        });
        spawn_local(async move {
            if task.await.is_err() {
                log!("submission aborted");
            }
        });
    });

    view! {
        <div class="min-h-screen bg-gradient-to-br from-white to-gray-100 flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-white shadow-xl rounded-2xl p-8">
                <div class="text-center mb-6">
                    <h1 class="text-4xl font-extrabold text-gray-900">
                        "Trend" <span class="text-purple-600">"Rush"</span> "."
                    </h1>
                    <p class="text-sm text-gray-500 mt-1">"Create your account"</p>
                </div>

                <GenericForm
                    fields=sign_up::fields()
                    form_data
                    set_form_data
                    on_submit
                    errors
                    grid_cols=1
                    show_back_button=false
                    show_cancel_button=false
                    show_save_button=Signal::derive(move || !busy.get())
                />

                <button
                    class="mt-6 w-full text-sm text-center text-gray-600 hover:text-purple-600 transition"
                    on:click=move |_| go_to(LOGIN_PATH)
                >
                    "Already have an account? "
                    <span class="font-medium underline">"Login"</span>
                </button>

                <Show when=move || loading.get()>
                    <p class="text-center text-purple-600 text-sm mt-4">"Registering..."</p>
                </Show>
                {move || {
                    success()
                        .map(|message| {
                            view! { <p class="text-center text-green-600 text-sm mt-4">{message}</p> }
                        })
                }}
            </div>
        </div>
    }
}
