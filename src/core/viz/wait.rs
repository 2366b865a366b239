//! Cancellable suspensions used while mounting: a fixed settle delay and a
//! bounded readiness poll.

use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

use super::runtime::ChartingRuntime;

/// The wait was cancelled because the mount was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("mount cancelled")]
pub struct Cancelled;

/// How a readiness wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// Sleep for `delay` unless cancelled first.
pub async fn delay(delay: Duration, cancel: &CancellationToken) -> Result<(), Cancelled> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        _ = sleep(delay) => Ok(()),
    }
}

/// Poll `runtime.is_ready()` every `interval` until it holds or `timeout`
/// elapses. Returns immediately when the runtime is already ready.
pub async fn wait_for_runtime(
    runtime: &dyn ChartingRuntime,
    interval: Duration,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Readiness, Cancelled> {
    if cancel.is_cancelled() {
        return Err(Cancelled);
    }
    let deadline = Instant::now() + timeout;
    loop {
        if runtime.is_ready() {
            return Ok(Readiness::Ready);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(Readiness::TimedOut);
        }
        let next = (now + interval).min(deadline);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Cancelled),
            _ = sleep_until(next) => {}
        }
    }
}
