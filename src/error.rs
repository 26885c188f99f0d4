//! Error types
//!
//! Only precondition violations are errors. Placement fallback, blocked drags
//! and unsolved layouts are ordinary outcomes and are reported as values.

use crate::sim::CardId;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("sentence has no words")]
    EmptySentence,

    #[error("sentence catalog is empty")]
    EmptyCatalog,

    #[error("container must have a positive size, got {width}x{height}")]
    InvalidContainer { width: f32, height: f32 },

    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("no such card in this round: {0}")]
    UnknownCard(CardId),

    #[error("malformed rules JSON: {0}")]
    Config(#[from] serde_json::Error),
}
