//! Word Line - drag scattered words back into a sentence
//!
//! Core modules:
//! - `sim`: Deterministic puzzle core (geometry, placement, dragging, win check)
//! - `session`: Round lifecycle exposed to the UI shell
//! - `renderer`: Collaborators that draw cards (headless, DOM)
//! - `celebration`: Star orbit sizing around a solved sentence
//! - `settings`: Rules and tolerances

pub mod celebration;
pub mod error;
pub mod renderer;
pub mod sentences;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use session::Session;
pub use settings::{Rules, Strictness};

/// Game configuration constants
pub mod consts {
    /// Keep-out band along the container edges while dragging (px)
    pub const DRAG_MARGIN: f32 = 30.0;

    /// Max vertical deviation for cards to count as one line (px)
    pub const VERTICAL_TOLERANCE: f32 = 30.0;
    /// Max X distance between neighbouring cards on the line (px)
    pub const MAX_HORIZONTAL_GAP: f32 = 100.0;

    /// Random samples per card before falling back to the origin
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

    /// Pre-render size estimate: chars * width + padding, fixed height
    pub const APPROX_CHAR_WIDTH: f32 = 8.0;
    pub const APPROX_CARD_PADDING: f32 = 20.0;
    pub const APPROX_CARD_HEIGHT: f32 = 30.0;

    /// Clearance between the cards and the star orbit (px)
    pub const CELEBRATION_MARGIN: f32 = 20.0;
}
