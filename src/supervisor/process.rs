//! Child process plumbing: output forwarding, termination and signals.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Forwards every line read from `reader` to the log as `[name] line`.
pub(super) fn forward_lines<R>(name: &'static str, reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => info!("[{}] {}", name, line.trim_end()),
                Ok(None) => break,
                Err(e) => {
                    warn!("[{}] Error reading output: {}", name, e);
                    break;
                }
            }
        }
    })
}

/// Asks a child to stop with SIGTERM.
#[cfg(unix)]
pub(super) fn terminate(child: &mut Child) -> io::Result<()> {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    // Already reaped
    let Some(pid) = child.id() else {
        return Ok(());
    };
    let pid = i32::try_from(pid).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    kill(Pid::from_raw(pid), Signal::SIGTERM).map_err(io::Error::from)
}

/// Asks a child to stop. Without POSIX signals this is a hard kill.
#[cfg(not(unix))]
pub(super) fn terminate(child: &mut Child) -> io::Result<()> {
    child.start_kill()
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("📡 Ctrl+C received"),
        () = terminate => info!("📡 SIGTERM received"),
    }
}
