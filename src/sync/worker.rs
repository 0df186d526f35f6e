//! Background execution of sync jobs
//!
//! Jobs run on their own thread inside a shared tokio runtime so the UI never
//! waits on the network. Progress comes back over a channel that the UI drains
//! once per frame.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use super::clear::{clear_remote, ClearReport};
use super::error::SyncError;
use super::store::RecordStore;
use super::upload::{upload_document, UploadReport};
use super::SyncProgress;
use crate::core::document::FlashcardDocument;

/// Work handed to the worker
#[derive(Debug, Clone)]
pub enum SyncJob {
    /// Create every record of an already parsed document
    Upload(FlashcardDocument),
    /// Delete every remote record
    Clear,
}

/// How a job ended
#[derive(Debug)]
pub enum SyncOutcome {
    Uploaded(UploadReport),
    UploadFailed(SyncError),
    Cleared(ClearReport),
    ClearFailed(SyncError),
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Uploaded(report) => {
                write!(
                    f,
                    "🎉 Upload completed! Users: {}, Flashcards: {}",
                    report.users.succeeded(),
                    report.flashcards.succeeded()
                )?;
                if report.failed() > 0 {
                    write!(f, " ({} failed, see log)", report.failed())?;
                }
                Ok(())
            }
            SyncOutcome::UploadFailed(SyncError::NoDocument) => {
                write!(f, "❌ {}", SyncError::NoDocument)
            }
            SyncOutcome::UploadFailed(e) => write!(f, "❌ Upload failed: {}", e),
            SyncOutcome::Cleared(report) => write!(
                f,
                "✅ Cleared {} users, {} flashcards",
                report.users, report.flashcards
            ),
            SyncOutcome::ClearFailed(e) => write!(f, "❌ Clear failed: {}", e),
        }
    }
}

/// Message from a running job to the UI
#[derive(Debug)]
pub enum SyncEvent {
    Progress(SyncProgress),
    Finished(SyncOutcome),
}

/// Run a job to completion, reporting through `emit`
pub async fn run_job<S, F>(store: &S, job: SyncJob, mut emit: F)
where
    S: RecordStore + ?Sized,
    F: FnMut(SyncEvent),
{
    let outcome = match job {
        SyncJob::Upload(document) => {
            let report =
                upload_document(store, &document, |p| emit(SyncEvent::Progress(p))).await;
            SyncOutcome::Uploaded(report)
        }
        SyncJob::Clear => match clear_remote(store, |p| emit(SyncEvent::Progress(p))).await {
            Ok(report) => SyncOutcome::Cleared(report),
            Err(e) => {
                tracing::error!("Clear aborted: {}", e);
                SyncOutcome::ClearFailed(e)
            }
        },
    };

    emit(SyncEvent::Finished(outcome));
}

/// Runs sync jobs off the UI thread
pub struct SyncWorker {
    runtime: Arc<Runtime>,
    sender: Sender<SyncEvent>,
    receiver: Receiver<SyncEvent>,
}

impl SyncWorker {
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create sync runtime")?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            runtime: Arc::new(runtime),
            sender,
            receiver,
        })
    }

    /// Start a job; `notify` is called after every event so the UI can wake up
    pub fn spawn(
        &self,
        store: Arc<dyn RecordStore>,
        job: SyncJob,
        notify: impl Fn() + Send + 'static,
    ) {
        let sender = self.sender.clone();
        let runtime = self.runtime.clone();

        thread::spawn(move || {
            tracing::info!("Starting {} job", job_name(&job));
            let mut guard = JobGuard {
                sender,
                notify,
                upload: matches!(job, SyncJob::Upload(_)),
                finished: false,
            };
            runtime.block_on(run_job(store.as_ref(), job, |event| guard.send(event)));
        });
    }

    /// Drain events without blocking
    pub fn poll_events(&self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}

/// Forwards job events to the UI and reports a failure if the job dies before finishing
struct JobGuard<N: Fn()> {
    sender: Sender<SyncEvent>,
    notify: N,
    upload: bool,
    finished: bool,
}

impl<N: Fn()> JobGuard<N> {
    fn send(&mut self, event: SyncEvent) {
        if matches!(event, SyncEvent::Finished(_)) {
            self.finished = true;
        }
        // A closed channel means the app is shutting down.
        let _ = self.sender.send(event);
        (self.notify)();
    }
}

impl<N: Fn()> Drop for JobGuard<N> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::error!("Sync job ended without a result");
        let outcome = if self.upload {
            SyncOutcome::UploadFailed(SyncError::Interrupted)
        } else {
            SyncOutcome::ClearFailed(SyncError::Interrupted)
        };
        self.send(SyncEvent::Finished(outcome));
    }
}

fn job_name(job: &SyncJob) -> &'static str {
    match job {
        SyncJob::Upload(_) => "upload",
        SyncJob::Clear => "clear",
    }
}
