#[cfg(test)]
#[path = "exchange_test.rs"]
mod tests;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AdvisingBackendBox;
use crate::domain::models::Event;
use crate::domain::models::GradPathError;
use crate::domain::models::MessageContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> PollSettings {
        return PollSettings {
            interval: Config::get_duration(ConfigKey::PollInterval),
            max_attempts: Config::get_u32(ConfigKey::PollMaxAttempts),
        };
    }
}

/// Checks `/advising/pending` until the answer arrives, a check fails or the
/// attempts run out. Returns `None` once cancelled.
async fn poll_pending(
    backend: AdvisingBackendBox,
    settings: PollSettings,
    cancel: CancellationToken,
) -> Option<Event> {
    if settings.interval.is_zero() {
        return Some(Event::PollFailed(GradPathError::validation(
            "Poll interval must be greater than zero",
        )));
    }

    let mut interval = time::interval(settings.interval);
    interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
    // The first tick completes immediately, the first check waits a full interval.
    interval.tick().await;

    for attempt in 1..=settings.max_attempts {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(attempt, "Polling cancelled");
                return None;
            }
            _ = interval.tick() => {}
        }

        let res = backend.check_pending().await;
        if cancel.is_cancelled() {
            tracing::debug!(attempt, "Polling cancelled while a check was in flight");
            return None;
        }

        match res {
            Ok(status) if status.pending => {
                tracing::debug!(attempt, "Answer still pending");
                continue;
            }
            Ok(status) => match status.response {
                Some(value) => {
                    return Some(Event::PollResolved(MessageContent::from_value(value)));
                }
                None => {
                    return Some(Event::PollFailed(GradPathError::UnexpectedShape(
                        "pending check finished without a response".to_string(),
                    )));
                }
            },
            Err(err) => {
                tracing::error!(attempt, error = ?err, "Failed to check for a pending answer");
                return Some(Event::PollFailed(err));
            }
        }
    }

    tracing::warn!(attempts = settings.max_attempts, "Gave up waiting for the advisor");
    return Some(Event::PollTimedOut(settings.max_attempts));
}

/// Forwards the worker's outcome. A worker that dies without an outcome is
/// reported as a failed poll so the chat always leaves the polling state.
async fn report_outcome(
    worker: JoinHandle<Option<Event>>,
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) {
    let event = match worker.await {
        Ok(Some(event)) => event,
        Ok(None) => return,
        Err(_) if cancel.is_cancelled() => return,
        Err(err) => {
            tracing::error!(error = %err, "Poll worker stopped without an answer");
            Event::PollFailed(GradPathError::Transport(format!(
                "polling stopped unexpectedly: {err}"
            )))
        }
    };

    if tx.send(event).is_err() {
        tracing::debug!("Chat view closed before the poll finished");
    }
}

/// Owns the background task checking `/advising/pending`. The task reports
/// exactly one terminal event, unless it is cancelled first. Dropping the
/// handle cancels it.
pub struct PollHandle {
    cancel: CancellationToken,
    worker: AbortHandle,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn start(
        backend: AdvisingBackendBox,
        settings: PollSettings,
        tx: mpsc::UnboundedSender<Event>,
    ) -> PollHandle {
        let cancel = CancellationToken::new();
        let worker = tokio::spawn(poll_pending(backend, settings, cancel.clone()));
        let abort = worker.abort_handle();
        let task = tokio::spawn(report_outcome(worker, tx, cancel.clone()));

        return PollHandle {
            cancel,
            worker: abort,
            task,
        };
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        return self.cancel.is_cancelled();
    }

    pub fn is_finished(&self) -> bool {
        return self.task.is_finished();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.worker.abort();
        self.task.abort();
    }
}
