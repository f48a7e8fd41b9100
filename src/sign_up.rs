//! Sign-up state and the registration submission flow.

use crate::api::{RegisterError, RegisterRequest, Registrar};
use crate::form::{ErrorMap, FieldConfig, FormData};
use futures::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub const USERNAME: &str = "username";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";

pub const LOGIN_PATH: &str = "/login";
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const SUCCESS_MESSAGE: &str = "Registration Successful! Redirecting...";

/// Field schema of the sign-up form.
pub fn fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig::text(USERNAME, "Username", "Enter your username").required(),
        FieldConfig::text(EMAIL, "Email", "Enter your email").required(),
        FieldConfig::text(PASSWORD, "Password", "Enter your password").required(),
        FieldConfig::text(
            CONFIRM_PASSWORD,
            "Confirm Password",
            "Confirm your password",
        )
        .required(),
    ]
}

/// Everything the sign-up page keeps between events.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpState {
    pub form: FormData,
    pub errors: ErrorMap,
    pub loading: bool,
    /// Set once registration succeeded; the page is waiting to leave for the login view.
    pub redirecting: bool,
    pub success: Option<String>,
}

impl Default for SignUpState {
    fn default() -> Self {
        SignUpState {
            form: FormData::with_empty([USERNAME, EMAIL, PASSWORD, CONFIRM_PASSWORD]),
            errors: ErrorMap::new(),
            loading: false,
            redirecting: false,
            success: None,
        }
    }
}

impl SignUpState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset feedback and check the form. Returns the request to send, or `None`
    /// when the passwords differ (the mismatch is recorded in `errors`).
    ///
    /// While a request is in flight or a redirect is pending nothing changes and
    /// `None` is returned.
    pub fn begin_submit(&mut self) -> Option<RegisterRequest> {
        if self.busy() {
            return None;
        }
        self.errors.clear();
        self.success = None;

        let password = self.form.text(PASSWORD);
        if password != self.form.text(CONFIRM_PASSWORD) {
            self.errors.set(CONFIRM_PASSWORD, PASSWORD_MISMATCH);
            return None;
        }

        self.loading = true;
        Some(RegisterRequest {
            username: self.form.text(USERNAME),
            email: self.form.text(EMAIL),
            password,
        })
    }

    /// Record the outcome of the request. Returns `true` when the page should
    /// move on to the login view.
    pub fn finish_submit(&mut self, result: Result<(), RegisterError>) -> bool {
        self.loading = false;
        match result {
            Ok(()) => {
                self.redirecting = true;
                self.success = Some(SUCCESS_MESSAGE.to_string());
                true
            }
            Err(err) => {
                self.errors.set(EMAIL, err.to_string());
                false
            }
        }
    }

    /// Whether the form should not accept another submission.
    pub fn busy(&self) -> bool {
        self.loading || self.redirecting
    }
}

/// Somewhere a [`SignUpState`] lives while a submission is awaited.
///
/// `modify` returns `None` once the state is gone (e.g. the page was unmounted).
pub trait SignUpStore {
    fn modify<T>(&self, f: impl FnOnce(&mut SignUpState) -> T) -> Option<T>;
}

impl SignUpStore for leptos::prelude::RwSignal<SignUpState> {
    fn modify<T>(&self, f: impl FnOnce(&mut SignUpState) -> T) -> Option<T> {
        leptos::prelude::Update::try_update(self, f)
    }
}

/// Run one submission: validate, send at most one request, record the outcome.
/// Returns whether to navigate to the login view.
pub async fn submit<R: Registrar, S: SignUpStore>(registrar: &R, store: &S) -> bool {
    let Some(request) = store.modify(SignUpState::begin_submit).flatten() else {
        return false;
    };
    leptos::logging::log!("submitting registration");
    let result = registrar.register(&request).await;
    if let Err(err) = &result {
        leptos::logging::warn!("registration failed: {err}");
    }
    store
        .modify(|state| state.finish_submit(result))
        .unwrap_or(false)
}

/// [`submit`], then after [`REDIRECT_DELAY`] hand [`LOGIN_PATH`] to `navigate` on success.
pub async fn submit_and_redirect<R, S, D, Fut>(
    registrar: &R,
    store: &S,
    delay: D,
    navigate: impl FnOnce(&str),
) where
    R: Registrar,
    S: SignUpStore,
    D: FnOnce(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    if submit(registrar, store).await {
        delay(REDIRECT_DELAY).await;
        navigate(LOGIN_PATH);
    }
}

#[derive(Debug, Default)]
struct Inflight {
    next_id: u64,
    handles: Vec<(u64, AbortHandle)>,
}

/// Abort handles of the submission tasks still running.
#[derive(Debug, Clone, Default)]
pub struct PendingSubmission {
    inflight: Arc<Mutex<Inflight>>,
}

impl PendingSubmission {
    /// Wrap `task` so that [`cancel`](Self::cancel) stops it. The handle is
    /// dropped as soon as the task finishes.
    pub fn start<F: Future>(
        &self,
        task: F,
    ) -> impl Future<Output = Result<F::Output, Aborted>> + use<F> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut inflight = self.lock();
            let id = inflight.next_id;
            inflight.next_id += 1;
            inflight.handles.push((id, handle));
            id
        };
        let pending = self.clone();
        async move {
            let result = Abortable::new(task, registration).await;
            pending.lock().handles.retain(|(other, _)| *other != id);
            result
        }
    }

    /// Abort every task still running.
    pub fn cancel(&self) {
        let handles = std::mem::take(&mut self.lock().handles);
        if !handles.is_empty() {
            leptos::logging::log!("cancelling {} pending submission(s)", handles.len());
        }
        for (_, handle) in handles {
            handle.abort();
        }
    }

    pub fn is_idle(&self) -> bool {
        self.lock().handles.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inflight> {
        self.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
