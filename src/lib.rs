use leptos::prelude::*;

pub mod api;
pub mod form;
pub mod frontend;
pub mod sign_up;
mod web_support;

/// Root of the client: the sign-up page.
#[component]
pub fn App() -> impl IntoView {
    view! { <frontend::SignUp /> }
}
