//! Process supervisor for the two bots.
//!
//! The manager follows a simple lifecycle:
//! 1. Check that every bot binary exists (nothing is spawned otherwise)
//! 2. Spawn the bots a couple of seconds apart, forwarding their output
//! 3. Poll every few seconds and report bots that exited
//! 4. On shutdown: SIGTERM, wait, SIGKILL the stragglers

mod process;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, timeout};
use tracing::{error, info, warn};

pub use process::shutdown_signal;

/// Delay between spawning two bots.
pub const START_DELAY: Duration = Duration::from_secs(2);

/// How often exited bots are checked for.
pub const MONITOR_INTERVAL: Duration = Duration::from_secs(5);

/// Time a bot gets to exit after SIGTERM before it is killed.
pub const STOP_GRACE: Duration = Duration::from_secs(5);

/// Time output forwarders get to drain after the bots stopped.
pub const FORWARDER_GRACE: Duration = Duration::from_secs(3);

/// A bot the manager launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotSpec {
    /// Human-readable name.
    pub name: &'static str,
    /// Executable name inside the binary directory.
    pub binary: &'static str,
}

/// Bots launched by `bot_manager`, in start order.
pub const LAUNCH_TABLE: [BotSpec; 2] = [
    BotSpec {
        name: "Data Input Bot",
        binary: "input_bot",
    },
    BotSpec {
        name: "Togel Analysis Bot",
        binary: "analysis_bot",
    },
];

/// Errors from the supervisor.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A bot process could not be started.
    #[error("failed to start {name} ({}): {source}", path.display())]
    Spawn {
        name: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A spawned bot.
#[derive(Debug)]
struct RunningBot {
    spec: BotSpec,
    child: Child,
    exit_reported: bool,
}

/// Launches, watches and stops the bots.
#[derive(Debug)]
pub struct BotManager {
    bin_dir: PathBuf,
    bots: Vec<BotSpec>,
    start_delay: Duration,
    running: Vec<RunningBot>,
    forwarders: Vec<JoinHandle<()>>,
}

impl BotManager {
    /// Creates a manager for [`LAUNCH_TABLE`] with binaries in `bin_dir`.
    #[must_use]
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self::with_bots(bin_dir, LAUNCH_TABLE.to_vec())
    }

    /// Creates a manager for a custom set of bots.
    ///
    /// A relative `bin_dir` is resolved against the current directory once,
    /// here. Children run with `bin_dir` as their working directory.
    #[must_use]
    pub fn with_bots(bin_dir: impl Into<PathBuf>, bots: Vec<BotSpec>) -> Self {
        let bin_dir = bin_dir.into();
        Self {
            bin_dir: std::path::absolute(&bin_dir).unwrap_or(bin_dir),
            bots,
            start_delay: START_DELAY,
            running: Vec::new(),
            forwarders: Vec::new(),
        }
    }

    /// Sets the delay between spawning two bots.
    #[must_use]
    pub const fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Directory the bot binaries are looked up in.
    #[must_use]
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Full path of a bot's executable.
    #[must_use]
    pub fn binary_path(&self, spec: &BotSpec) -> PathBuf {
        self.bin_dir
            .join(format!("{}{}", spec.binary, std::env::consts::EXE_SUFFIX))
    }

    /// Executables that do not exist.
    #[must_use]
    pub fn missing_binaries(&self) -> Vec<PathBuf> {
        self.bots
            .iter()
            .map(|spec| self.binary_path(spec))
            .filter(|path| !path.is_file())
            .collect()
    }

    /// Number of bots spawned so far.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Spawns every bot, `start_delay` apart.
    ///
    /// Bots spawned before a failure keep running; the caller is expected to
    /// call [`stop_all`](Self::stop_all).
    pub async fn launch(&mut self) -> Result<(), SupervisorError> {
        let bots = self.bots.clone();
        for (i, spec) in bots.into_iter().enumerate() {
            if i > 0 {
                sleep(self.start_delay).await;
            }
            info!("🔄 Mempersiapkan {}...", spec.name);
            self.spawn(spec)?;
        }
        Ok(())
    }

    fn spawn(&mut self, spec: BotSpec) -> Result<(), SupervisorError> {
        let path = self.binary_path(&spec);
        let mut child = Command::new(&path)
            .current_dir(&self.bin_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SupervisorError::Spawn {
                name: spec.name,
                path: path.clone(),
                source,
            })?;

        info!(
            "🚀 Menjalankan {} dari {} (pid {})",
            spec.name,
            path.display(),
            child.id().unwrap_or_default()
        );

        if let Some(stdout) = child.stdout.take() {
            self.forwarders
                .push(process::forward_lines(spec.binary, stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            self.forwarders
                .push(process::forward_lines(spec.binary, stderr));
        }

        self.running.push(RunningBot {
            spec,
            child,
            exit_reported: false,
        });
        Ok(())
    }

    /// Reports bots that exited since the last poll. Each exit is reported once.
    pub fn poll_exits(&mut self) -> Vec<(BotSpec, ExitStatus)> {
        let mut exited = Vec::new();
        for bot in self.running.iter_mut().filter(|b| !b.exit_reported) {
            match bot.child.try_wait() {
                Ok(Some(status)) => {
                    bot.exit_reported = true;
                    warn!("⚠️ {} telah berhenti ({})", bot.spec.name, status);
                    exited.push((bot.spec, status));
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to check {}: {}", bot.spec.name, e),
            }
        }
        exited
    }

    /// Polls for exited bots every [`MONITOR_INTERVAL`] until `shutdown` resolves.
    pub async fn monitor<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(MONITOR_INTERVAL);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.poll_exits();
                }
            }
        }
    }

    /// Stops every bot still running and returns the stopped pids.
    ///
    /// Each bot gets SIGTERM and [`STOP_GRACE`] to exit before it is killed.
    pub async fn stop_all(&mut self) -> Vec<u32> {
        info!("🛑 Menghentikan semua bot...");

        let mut stopped = Vec::new();
        for bot in &mut self.running {
            match bot.child.try_wait() {
                Ok(Some(_)) => continue,
                Ok(None) => {}
                Err(e) => {
                    error!("❌ Error checking {}: {}", bot.spec.name, e);
                    continue;
                }
            }

            let pid = bot.child.id();
            if let Err(e) = process::terminate(&mut bot.child) {
                warn!("Failed to send SIGTERM to {}: {}", bot.spec.name, e);
            }

            match timeout(STOP_GRACE, bot.child.wait()).await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    error!("❌ Error stopping {}: {}", bot.spec.name, e);
                    continue;
                }
                Err(_) => {
                    warn!("{} did not stop in time, killing", bot.spec.name);
                    if let Err(e) = bot.child.kill().await {
                        error!("❌ Error killing {}: {}", bot.spec.name, e);
                        continue;
                    }
                }
            }

            if let Some(pid) = pid {
                info!("✅ Bot process {} dihentikan", pid);
                stopped.push(pid);
            }
        }
        stopped
    }

    /// Waits up to [`FORWARDER_GRACE`] for output forwarders to finish.
    pub async fn join_forwarders(&mut self) {
        info!("⏳ Menunggu semua output selesai...");
        let forwarders = std::mem::take(&mut self.forwarders);
        let all = async {
            for handle in forwarders {
                let _ = handle.await;
            }
        };
        if timeout(FORWARDER_GRACE, all).await.is_err() {
            warn!("Output forwarders did not finish in time");
        }
    }
}
