//! Detached background tasks
//!
//! A detached task runs a fallible future in the background. Nobody is
//! expected to await it: failures are logged and dropped, panics are caught
//! and logged, and dropping the handle does not cancel the work.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{error, info_span, warn, Instrument};

/// Handle to a task started with [`spawn_detached`].
#[derive(Debug)]
pub struct DetachedTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl DetachedTask {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to finish.
    ///
    /// Never fails: errors and panics were already logged inside the task.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Spawn `future` on the current tokio runtime as a detached task.
///
/// Must be called from within a runtime.
pub fn spawn_detached<F>(name: &'static str, future: F) -> DetachedTask
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let span = info_span!("detached_task", task = name);

    let handle = tokio::spawn(
        async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!(error = %format!("{err:#}"), "Detached task failed"),
                Err(panic) => {
                    let message = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic payload".to_string());
                    error!(panic = %message, "Detached task panicked");
                }
            }
        }
        .instrument(span),
    );

    DetachedTask { name, handle }
}
