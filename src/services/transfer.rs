//! Background file transfer with simulated progress
//!
//! The fetch itself runs on a worker thread with a blocking HTTP client. Byte counts are never
//! read back: while the worker is busy the progress bar creeps forward by a
//! random step every 200 ms and stalls at 90%, then snaps to 100% when the
//! worker reports success.

use crate::model::Presenter;
use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between simulated progress steps
pub const PROGRESS_STEP_INTERVAL: Duration = Duration::from_millis(200);

/// Simulated progress never passes this until the worker finishes
pub const SIMULATED_CEILING: f64 = 90.0;

/// Upper bound of one simulated step
const MAX_STEP: f64 = 15.0;

/// How long the completed bar stays up before hiding
pub const COMPLETION_HOLD: Duration = Duration::from_millis(1000);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A file to fetch
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub title: String,
    pub url: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
enum TransferMessage {
    Completed { bytes: u64 },
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Running { progress: f64, since_step: Duration },
    Finishing { remaining: Duration },
}

struct TransferJob {
    receiver: Receiver<TransferMessage>,
    stage: Stage,
    started: Instant,
}

/// What `poll` decided once the job borrow is released
enum Outcome {
    Continue,
    Succeeded,
    Failed(String),
}

/// Runs at most one transfer at a time and drives its progress overlay
pub struct TransferRunner {
    job: Option<TransferJob>,
    rng: SmallRng,
}

impl Default for TransferRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferRunner {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self { job: None, rng }
    }

    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// Start a transfer. Returns false if one is already running.
    pub fn start(&mut self, request: TransferRequest, presenter: &mut Presenter) -> bool {
        if self.is_busy() {
            tracing::warn!(url = %request.url, "transfer already running");
            presenter.show_warning("A download is already in progress");
            return false;
        }

        let (tx, rx) = mpsc::channel();
        let url = request.url.clone();
        let destination = request.destination.clone();
        thread::spawn(move || {
            Self::fetch(&url, &destination, tx);
        });

        tracing::info!(url = %request.url, destination = %request.destination.display(), "transfer started");
        self.begin(&request.title, rx, presenter);
        true
    }

    fn begin(&mut self, title: &str, receiver: Receiver<TransferMessage>, presenter: &mut Presenter) {
        presenter.show_progress(title, "Preparing download...", 0.0);
        self.job = Some(TransferJob {
            receiver,
            stage: Stage::Running {
                progress: 0.0,
                since_step: Duration::ZERO,
            },
            started: Instant::now(),
        });
    }

    /// Advance the simulated progress and react to the worker's result
    pub fn poll(&mut self, elapsed: Duration, presenter: &mut Presenter) {
        let Some(job) = self.job.as_mut() else {
            return;
        };

        let outcome = match job.stage {
            Stage::Running {
                mut progress,
                mut since_step,
            } => match job.receiver.try_recv() {
                Ok(TransferMessage::Completed { bytes }) => {
                    tracing::info!(bytes, elapsed = ?job.started.elapsed(), "transfer completed");
                    presenter.update_progress("Download complete!", 100.0);
                    job.stage = Stage::Finishing {
                        remaining: COMPLETION_HOLD,
                    };
                    Outcome::Continue
                }
                Ok(TransferMessage::Failed(err)) => Outcome::Failed(err),
                Err(TryRecvError::Disconnected) => {
                    Outcome::Failed("transfer worker exited without a result".to_string())
                }
                Err(TryRecvError::Empty) => {
                    since_step += elapsed;
                    while since_step >= PROGRESS_STEP_INTERVAL {
                        since_step -= PROGRESS_STEP_INTERVAL;
                        let step = self.rng.random::<f64>() * MAX_STEP;
                        progress = (progress + step).min(SIMULATED_CEILING);
                        presenter.update_progress("Downloading...", progress);
                    }
                    job.stage = Stage::Running {
                        progress,
                        since_step,
                    };
                    Outcome::Continue
                }
            },
            Stage::Finishing { remaining } => {
                if elapsed >= remaining {
                    Outcome::Succeeded
                } else {
                    job.stage = Stage::Finishing {
                        remaining: remaining - elapsed,
                    };
                    Outcome::Continue
                }
            }
        };

        match outcome {
            Outcome::Continue => {}
            Outcome::Succeeded => {
                self.job = None;
                presenter.hide_progress();
                presenter.show_success("File downloaded");
            }
            Outcome::Failed(err) => {
                tracing::error!(error = %err, "transfer failed");
                self.job = None;
                presenter.report_failure("Download failed, please retry");
            }
        }
    }

    fn fetch(url: &str, destination: &Path, tx: Sender<TransferMessage>) {
        let message = match download(url, destination) {
            Ok(bytes) => TransferMessage::Completed { bytes },
            Err(e) => TransferMessage::Failed(format!("{:#}", e)),
        };
        let _ = tx.send(message);
    }
}

/// Fetch `url` and stream the body into `destination`. Returns the byte count.
fn download(url: &str, destination: &Path) -> Result<u64> {
    let client = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let mut response = client
        .get(url)
        .send()
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()?;

    let mut file = File::create(destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;
    let bytes = response
        .copy_to(&mut file)
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    Ok(bytes)
}
