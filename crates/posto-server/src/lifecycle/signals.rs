//! OS signal handling
//!
//! SIGINT and SIGTERM are forwarded by name. The channel is bounded but a
//! full channel makes the forwarder wait, so no signal is lost.

use std::io;
use tokio::sync::mpsc;

/// Subscribe to termination signals. Registration happens before this
/// returns, so a signal arriving right after startup is not missed.
pub fn watch() -> io::Result<mpsc::Receiver<&'static str>> {
    let (tx, rx) = mpsc::channel(4);

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;

        tokio::spawn(async move {
            loop {
                let name = tokio::select! {
                    Some(()) = interrupt.recv() => "SIGINT",
                    Some(()) = terminate.recv() => "SIGTERM",
                    else => break,
                };
                if tx.send(name).await.is_err() {
                    break;
                }
            }
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send("ctrl-c").await.is_err() {
                    break;
                }
            }
        });
    }

    Ok(rx)
}
