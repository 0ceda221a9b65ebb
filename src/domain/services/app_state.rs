#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use tokio::sync::mpsc;

use super::Notifications;
use super::PollHandle;
use super::PollSettings;
use crate::domain::models::AdvisingBackendBox;
use crate::domain::models::AdvisingReply;
use crate::domain::models::Author;
use crate::domain::models::ChatMessage;
use crate::domain::models::Event;
use crate::domain::models::ExchangeState;
use crate::domain::models::GradPathError;
use crate::domain::models::MessageContent;
use crate::domain::models::MessageType;

pub const GREETING: &str = "Hello! I'm your academic advisor. I can help you plan your courses based on your academic history.\n\nYou can ask me questions like \"What classes should I take next?\" or \"What are the prerequisites for CS 310?\"";
pub const SEND_FAILURE_REPLY: &str = "I'm sorry, I encountered an error. Please try again later.";
pub const UNREADABLE_REPLY: &str = "I received a response I couldn't understand.";
pub const TIMEOUT_REPLY: &str =
    "I'm sorry, this is taking longer than expected. Please ask again in a moment.";

/// Chat view-model: the transcript plus the single advising exchange that may
/// be in flight. Poll results arrive over the internal channel and are applied
/// with `handle_event`.
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    backend: AdvisingBackendBox,
    notifications: Notifications,
    poll: Option<PollHandle>,
    settings: PollSettings,
    state: ExchangeState,
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
}

impl ChatState {
    pub fn new(
        backend: AdvisingBackendBox,
        notifications: Notifications,
        settings: PollSettings,
    ) -> ChatState {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        return ChatState {
            messages: vec![ChatMessage::text(Author::Advisor, GREETING)],
            backend,
            notifications,
            poll: None,
            settings,
            state: ExchangeState::Idle,
            rx,
            tx,
        };
    }

    pub fn state(&self) -> ExchangeState {
        return self.state;
    }

    pub fn is_waiting(&self) -> bool {
        return self.state != ExchangeState::Idle;
    }

    pub fn is_polling(&self) -> bool {
        return self.poll.is_some();
    }

    pub fn notifications(&self) -> &Notifications {
        return &self.notifications;
    }

    /// Sends a question to the advisor. Empty input, or input while another
    /// exchange is outstanding, is rejected before anything changes. Failures
    /// after that point end up in the transcript, not in the result.
    pub async fn send(&mut self, text: &str) -> Result<(), GradPathError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(GradPathError::validation("Please enter a message"));
        }
        if self.state != ExchangeState::Idle {
            return Err(GradPathError::validation(
                "Please wait for the advisor to finish answering",
            ));
        }

        self.messages.push(ChatMessage::text(Author::User, message));
        self.state = ExchangeState::PendingSend;
        tracing::debug!(state = %self.state, "Sending advising message");

        match self.backend.send_message(message).await {
            Ok(reply) => self.handle_reply(reply),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to send advising message");
                self.fail(&err, "Failed to send message");
            }
        }

        return Ok(());
    }

    fn handle_reply(&mut self, reply: AdvisingReply) {
        let processing = reply.is_processing();
        let content = MessageContent::from_value(reply.response);

        if !processing {
            self.messages.push(ChatMessage::new(Author::Advisor, content));
            self.finish();
            return;
        }

        self.messages.push(ChatMessage::acknowledgment(content));
        self.state = ExchangeState::Polling;
        self.poll = Some(PollHandle::start(
            self.backend.clone(),
            self.settings,
            self.tx.clone(),
        ));
        tracing::debug!(state = %self.state, "Waiting for the advisor");
    }

    fn fail(&mut self, err: &GradPathError, notice: &str) {
        let reply = match err {
            GradPathError::UnexpectedShape(_) => UNREADABLE_REPLY,
            GradPathError::Timeout { .. } => TIMEOUT_REPLY,
            _ => SEND_FAILURE_REPLY,
        };
        self.messages.push(ChatMessage::new_with_type(
            Author::Advisor,
            MessageType::Error,
            reply,
        ));

        match err {
            GradPathError::Auth(failure) => self.notifications.error(failure.user_message()),
            _ => self.notifications.error(notice),
        }

        self.finish();
    }

    fn finish(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.cancel();
        }
        self.state = ExchangeState::Idle;
    }

    /// Waits for the next result from the poll worker.
    pub async fn next_event(&mut self) -> Option<Event> {
        return self.rx.recv().await;
    }

    /// Applies a poll result. Returns whether the transcript changed. Results
    /// that arrive when no exchange is polling are ignored.
    pub fn handle_event(&mut self, event: Event) -> bool {
        if self.state != ExchangeState::Polling {
            tracing::debug!(event = ?event, "Ignoring stale poll event");
            return false;
        }

        match event {
            Event::PollResolved(content) => {
                self.messages.push(ChatMessage::new(Author::Advisor, content));
                self.finish();
            }
            Event::PollFailed(err) => {
                self.fail(&err, "Failed to get a response from the advisor");
            }
            Event::PollTimedOut(attempts) => {
                let err = GradPathError::Timeout { attempts };
                self.fail(&err, &err.to_string());
            }
        }

        return true;
    }

    /// Stops any polling. Nothing is added to the transcript afterwards for
    /// the abandoned exchange.
    pub fn close(&mut self) {
        self.finish();
        while self.rx.try_recv().is_ok() {}
    }
}
