//! Process lifecycle
//!
//! ```text
//! listener task ──(failure)──┐
//!                            ├──> coordinator ──> HaltLatch ──> run() returns
//! signals task ──(SIGTERM)───┘
//! ```
//!
//! The coordinator is the only place that decides to halt. It reacts to
//! the first event, logs `terminating` once, and ignores the rest.

pub mod latch;
pub mod signals;

use anyhow::anyhow;
use latch::HaltLatch;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Running,
    Halting,
    Terminated,
}

/// Why the process stops.
#[derive(Debug)]
pub enum Halt {
    ListenerFailed(anyhow::Error),
    Signal(&'static str),
}

impl Halt {
    pub fn exit_code(&self) -> i32 {
        match self {
            Halt::ListenerFailed(_) => 1,
            Halt::Signal(_) => 0,
        }
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Halt::ListenerFailed(e) => write!(f, "listener failure: {e:#}"),
            Halt::Signal(name) => write!(f, "signal {name}"),
        }
    }
}

pub struct Coordinator {
    state: Arc<watch::Sender<LifecycleState>>,
}

impl Coordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LifecycleState::Starting);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Drive `listener` until it fails or a signal arrives, then report why.
    ///
    /// The listener is expected to run forever; any completion, clean or
    /// not, counts as a failure.
    pub async fn run<L>(self, listener: L, signals: mpsc::Receiver<&'static str>) -> Halt
    where
        L: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.state.send_replace(LifecycleState::Running);

        let (failures_tx, failures) = mpsc::channel(1);
        tokio::spawn(async move {
            let failure = match listener.await {
                Ok(()) => anyhow!("listener stopped unexpectedly"),
                Err(e) => e,
            };
            let _ = failures_tx.send(failure).await;
        });

        let (latch, halted) = HaltLatch::new();
        tokio::spawn(coordinate(failures, signals, latch, self.state.clone()));

        let halt = halted.await.unwrap_or_else(|_| {
            Halt::ListenerFailed(anyhow!("coordinator stopped without a halt decision"))
        });
        self.state.send_replace(LifecycleState::Terminated);
        halt
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

async fn coordinate(
    mut failures: mpsc::Receiver<anyhow::Error>,
    mut signals: mpsc::Receiver<&'static str>,
    mut latch: HaltLatch,
    state: Arc<watch::Sender<LifecycleState>>,
) {
    loop {
        let halt = tokio::select! {
            Some(failure) = failures.recv() => Halt::ListenerFailed(failure),
            Some(name) = signals.recv() => Halt::Signal(name),
            else => break,
        };

        if latch.is_tripped() {
            debug!(event = %halt, "already halting, ignoring termination event");
            continue;
        }

        match &halt {
            Halt::ListenerFailed(e) => {
                let chain = format!("{e:#}");
                error!(reason = "error", error = %chain, "terminating")
            }
            Halt::Signal(name) => warn!(reason = "signal", signal = name, "terminating"),
        }
        state.send_replace(LifecycleState::Halting);
        let _ = latch.trip(halt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posto_core::test_support::capture_logs;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_listener_failure_exits_with_one() {
        let (logs, _guard) = capture_logs();
        let (signals_tx, signals) = mpsc::channel(4);

        let halt = Coordinator::new()
            .run(async { Err::<(), _>(anyhow!("address already in use")) }, signals)
            .await;
        assert_eq!(halt.exit_code(), 1);

        // A signal after the fact changes nothing
        signals_tx.send("SIGTERM").await.unwrap();
        settle().await;

        let out = logs.contents();
        assert_eq!(count(&out, "terminating"), 1);
        assert!(out.contains("reason=\"error\""));
        assert!(out.contains("address already in use"));
        assert!(out.contains("ignoring termination event"));
    }

    #[tokio::test]
    async fn test_signal_exits_with_zero() {
        let (logs, _guard) = capture_logs();
        let (signals_tx, signals) = mpsc::channel(4);
        let (fail_tx, fail_rx) = oneshot::channel::<()>();

        signals_tx.send("SIGTERM").await.unwrap();
        let listener = async move {
            let _ = fail_rx.await;
            Err::<(), _>(anyhow!("listener closed"))
        };
        let halt = Coordinator::new().run(listener, signals).await;
        assert!(matches!(halt, Halt::Signal("SIGTERM")));
        assert_eq!(halt.exit_code(), 0);

        // Listener dies while halting
        fail_tx.send(()).unwrap();
        signals_tx.send("SIGINT").await.unwrap();
        settle().await;

        let out = logs.contents();
        assert_eq!(count(&out, "terminating"), 1);
        assert!(out.contains("reason=\"signal\""));
        assert!(out.contains("SIGTERM"));
        assert_eq!(count(&out, "ignoring termination event"), 2);
    }

    #[tokio::test]
    async fn test_clean_listener_exit_is_a_failure() {
        let (_signals_tx, signals) = mpsc::channel(1);
        let halt = Coordinator::new().run(async { Ok::<(), anyhow::Error>(()) }, signals).await;
        assert_eq!(halt.exit_code(), 1);
        assert!(halt.to_string().contains("stopped unexpectedly"));
    }

    #[tokio::test]
    async fn test_simultaneous_events_halt_once() {
        let (logs, _guard) = capture_logs();
        let (signals_tx, signals) = mpsc::channel(4);
        signals_tx.send("SIGINT").await.unwrap();

        let halt = Coordinator::new()
            .run(async { Err::<(), _>(anyhow!("boom")) }, signals)
            .await;
        settle().await;

        let out = logs.contents();
        assert_eq!(count(&out, "terminating"), 1);
        let expected = match halt {
            Halt::ListenerFailed(_) => "reason=\"error\"",
            Halt::Signal(_) => "reason=\"signal\"",
        };
        assert!(out.contains(expected));
    }

    #[tokio::test]
    async fn test_state_moves_to_terminated() {
        let coordinator = Coordinator::new();
        let state = coordinator.subscribe();
        assert_eq!(*state.borrow(), LifecycleState::Starting);

        let (signals_tx, signals) = mpsc::channel(1);
        signals_tx.send("SIGTERM").await.unwrap();
        coordinator
            .run(futures::future::pending::<anyhow::Result<()>>(), signals)
            .await;

        assert_eq!(*state.borrow(), LifecycleState::Terminated);
    }
}
