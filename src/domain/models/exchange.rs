use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

/// Where the chat view is in the send/acknowledge/poll/resolve cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum ExchangeState {
    Idle,
    PendingSend,
    Polling,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisingRequest {
    pub message: String,
}

/// Reply to `POST /api/advising`. With `processing: true` the response is only
/// an acknowledgment and the answer has to be polled for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvisingReply {
    pub response: Value,
    #[serde(default)]
    pub processing: Option<bool>,
}

impl AdvisingReply {
    pub fn is_processing(&self) -> bool {
        return self.processing.unwrap_or(false);
    }
}

/// Reply to `GET /api/advising/pending`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingStatus {
    pub pending: bool,
    #[serde(default)]
    pub response: Option<Value>,
}

/// Reply to `GET /api/recommend/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReply {
    pub recommendations: Value,
}
