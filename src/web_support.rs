use anyhow::{Result, anyhow};
use futures::channel::oneshot;
use std::time::Duration;
use web_sys::{Window, window};

fn browser_window() -> Result<Window> {
    window().ok_or_else(|| anyhow!("window not found"))
}

/// Load `path` in the current tab.
pub fn navigate_to(path: &str) -> Result<()> {
    browser_window()?
        .location()
        .set_href(path)
        .map_err(|e| anyhow!("navigation to {path} failed: {e:?}"))
}

/// Step back one entry in the session history.
pub fn history_back() -> Result<()> {
    browser_window()?
        .history()
        .map_err(|e| anyhow!("history unavailable: {e:?}"))?
        .back()
        .map_err(|e| anyhow!("history.back failed: {e:?}"))
}

/// Resolves once `duration` has passed on the browser timer.
pub async fn sleep(duration: Duration) {
    let (tx, rx) = oneshot::channel::<()>();
    leptos::prelude::set_timeout(
        move || {
            let _ = tx.send(());
        },
        duration,
    );
    let _ = rx.await;
}
