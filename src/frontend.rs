//! Leptos components for the client pages.
mod generic_form;
mod input_field;
mod sign_up;

pub use generic_form::GenericForm;
pub use input_field::InputField;
pub use sign_up::SignUp;
