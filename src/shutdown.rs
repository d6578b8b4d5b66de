//! Termination signal handling.
//!
//! The listener only records which signal arrived and cancels a token.
//! Logging the shutdown and tearing down happen in the watch loop once it
//! observes the cancellation.

use std::fmt;

use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::Result;

/// A termination request received from the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Interrupt (Ctrl+C, `SIGINT`).
    Interrupt,
    /// Terminate request (`SIGTERM`).
    Terminate,
}

impl Signal {
    /// Conventional signal name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wait for the first termination signal (SIGTERM or Ctrl+C).
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_signal() -> Result<Signal> {
    let ctrl_c = async {
        signal::ctrl_c().await?;
        Ok::<_, std::io::Error>(Signal::Interrupt)
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())?
            .recv()
            .await;
        Ok::<_, std::io::Error>(Signal::Terminate)
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<std::io::Result<Signal>>();

    let received = tokio::select! {
        result = ctrl_c => result?,
        result = terminate => result?,
    };
    Ok(received)
}

/// Spawn a task that cancels `cancel` when a termination signal arrives.
///
/// The task resolves to the received signal, or `None` if the token was
/// cancelled by someone else or the handlers could not be installed.
pub fn spawn_signal_listener(cancel: CancellationToken) -> JoinHandle<Option<Signal>> {
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => None,
            result = wait_for_signal() => match result {
                Ok(received) => {
                    cancel.cancel();
                    Some(received)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install signal handlers");
                    None
                }
            },
        }
    })
}
