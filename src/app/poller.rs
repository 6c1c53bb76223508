//! Poll timer. Fires `PollTick` on a fixed period until cancelled.

use std::time::Duration;

use tauri::{AppHandle, Manager};
use tokio_util::sync::CancellationToken;

use super::host::dispatch;
use crate::config;
use crate::controller::ControllerEvent;

/// Managed handle used to stop the timer on exit.
pub struct PollerHandle {
    cancel: CancellationToken,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Calls `on_tick` every `period()`, reading the period fresh each time.
///
/// Ticks never wait on each other's work; `on_tick` must return quickly.
pub async fn tick_loop<P, F>(period: P, cancel: CancellationToken, mut on_tick: F)
where
    P: Fn() -> Duration,
    F: FnMut(),
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(period()) => on_tick(),
        }
    }
}

/// Start the poll timer and register its handle with the app.
pub fn start(app: &AppHandle) {
    let cancel = CancellationToken::new();
    app.manage(PollerHandle {
        cancel: cancel.clone(),
    });

    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        log::info!("[POLLER] started, every {:?}", config::app::poll_interval());
        tick_loop(config::app::poll_interval, cancel, || {
            dispatch(&app, ControllerEvent::PollTick)
        })
        .await;
        log::info!("[POLLER] stopped");
    });
}
