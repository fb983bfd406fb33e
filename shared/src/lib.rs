use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
pub const DEBOUNCE_DELAY_MS: u64 = 300;
pub const HINT_CLEAR_DELAY_MS: u64 = 10_000;
pub const NO_HINT_AVAILABLE: &str = "No hint available";
pub const DEFAULT_SUGGESTION_LIMIT: u32 = 10;

pub const START_PATH: &str = "/game/start";
pub const UPDATE_FIELD_PATH: &str = "/game/update-field";
pub const CURRENT_PATH: &str = "/game/current";
pub const HINT_PATH: &str = "/game/hint";
pub const REVEAL_PATH: &str = "/game/reveal";
pub const SUGGESTIONS_PATH: &str = "/game/suggestions";

/// Server-owned game state, mirrored wholesale by the client.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GameState {
    #[serde(default)]
    pub target_country: String,
    #[serde(default)]
    pub target_country_code: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub total_fields: u32,
    #[serde(default)]
    pub completed_fields: u32,
    #[serde(default)]
    pub game_complete: bool,
}

impl GameState {
    /// True until the first server-confirmed state has been stored.
    pub fn is_empty(&self) -> bool {
        self.target_country.is_empty() && self.fields.is_empty()
    }

    pub fn field(&self, id: u32) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn remaining_fields(&self) -> u32 {
        self.total_fields.saturating_sub(self.completed_fields)
    }
}

/// A single answer slot. Only `id` and `value` are interpreted; every other key
/// the authority sends is carried verbatim in `annotations`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Field {
    #[serde(alias = "field_id")]
    pub id: u32,
    #[serde(default)]
    pub value: String,
    #[serde(flatten)]
    pub annotations: Map<String, Value>,
}

impl Field {
    pub fn new(id: u32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            annotations: Map::new(),
        }
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.annotations.get("is_correct").and_then(Value::as_bool)
    }

    pub fn is_filled(&self) -> Option<bool> {
        self.annotations.get("is_filled").and_then(Value::as_bool)
    }
}

/// Body of `/game/start` and `/game/current` responses.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GameStateEnvelope {
    pub game_state: GameState,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpdateFieldRequest {
    pub field_id: u32,
    pub country_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateFieldResponse {
    pub game_state: GameState,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HintResponse {
    pub hint: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RevealResponse {
    pub revealed_answers: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SuggestionsRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SuggestionsResponse {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Error body returned alongside non-success statuses, e.g. `{"detail": "No active game"}`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorBody {
    pub detail: Value,
}

impl ErrorBody {
    pub fn detail_text(&self) -> String {
        match &self.detail {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
