//! Backend endpoints and the registration client.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

/// Backend base URL, overridable at build time with `TRENDRUSH_API_URL`.
pub const DOMAIN_URL: &str = match option_env!("TRENDRUSH_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000",
};

const REGISTRATION_FAILED: &str = "Registration failed";

/// Flat map of backend endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiUrls {
    pub send_otp: String,
    pub validate_otp: String,
    pub register: String,
    pub get_user_details: String,
}

impl ApiUrls {
    pub fn new(domain: &str) -> Self {
        let domain = domain.trim_end_matches('/');
        ApiUrls {
            send_otp: format!("{domain}/user/auth/initiate"),
            validate_otp: format!("{domain}/user/auth/verify"),
            register: format!("{domain}/register"),
            get_user_details: format!("{domain}/user/profile"),
        }
    }
}

impl Default for ApiUrls {
    fn default() -> Self {
        ApiUrls::new(DOMAIN_URL)
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Why a registration did not go through. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The server answered with a non-success status.
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),
}

/// Message to report for a rejected registration, taken from the response body.
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| REGISTRATION_FAILED.to_string())
}

/// Performs the registration request.
#[allow(async_fn_in_trait)]
pub trait Registrar {
    async fn register(&self, request: &RegisterRequest) -> Result<(), RegisterError>;
}

/// Registration over `window.fetch`.
#[derive(Debug, Clone)]
pub struct FetchRegistrar {
    url: String,
}

impl FetchRegistrar {
    pub fn new(urls: &ApiUrls) -> Self {
        FetchRegistrar {
            url: urls.register.clone(),
        }
    }
}

impl Default for FetchRegistrar {
    fn default() -> Self {
        FetchRegistrar::new(&ApiUrls::default())
    }
}

/// Aborts the wrapped fetch when dropped before completion.
struct AbortOnDrop {
    controller: AbortController,
    armed: bool,
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abort();
        }
    }
}

impl Registrar for FetchRegistrar {
    async fn register(&self, request: &RegisterRequest) -> Result<(), RegisterError> {
        let body =
            serde_json::to_string(request).map_err(|e| RegisterError::Network(e.to_string()))?;
        let controller = AbortController::new().map_err(network_error)?;
        let mut guard = AbortOnDrop {
            controller,
            armed: true,
        };

        let headers = Headers::new().map_err(network_error)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(network_error)?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        init.set_signal(Some(&guard.controller.signal()));
        let fetch_request =
            Request::new_with_str_and_init(&self.url, &init).map_err(network_error)?;

        let window = web_sys::window()
            .ok_or_else(|| RegisterError::Network("window not found".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(network_error)?
            .dyn_into()
            .map_err(network_error)?;

        if response.ok() {
            guard.armed = false;
            return Ok(());
        }

        let text = JsFuture::from(response.text().map_err(network_error)?)
            .await
            .map_err(network_error)?;
        guard.armed = false;
        let message = rejection_message(&text.as_string().unwrap_or_default());
        leptos::logging::warn!("registration rejected ({}): {message}", response.status());
        Err(RegisterError::Rejected(message))
    }
}

fn network_error(err: JsValue) -> RegisterError {
    RegisterError::Network(js_error_message(&err))
}

/// The `message` of a thrown JS error, or its debug form.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
