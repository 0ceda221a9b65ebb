use super::GradPathError;
use super::MessageContent;

/// Results delivered from the poll worker back to the chat view.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    PollResolved(MessageContent),
    PollFailed(GradPathError),
    PollTimedOut(u32),
}
