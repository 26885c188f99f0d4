//! Deterministic puzzle core
//!
//! All gameplay logic lives here. No DOM or platform dependencies:
//! - Seeded RNG only
//! - Stable ordering (cards keep sentence order, rankings are stable sorts)
//! - Visual side effects go through the `CardRenderer` trait

pub mod drag;
pub mod geometry;
pub mod placement;
pub mod round;
pub mod state;
pub mod win;

pub use drag::{
    DragGesture, MoveOutcome, begin_drag, candidate_position, clamp_to_container, drag_card,
    split_card_mut,
};
pub use geometry::{BoundingBox, Rect, bounding_box, intersects};
pub use placement::{FALLBACK_POS, Placement, estimate_card_size, place_card};
pub use round::{Round, validate_container};
pub use state::{Card, CardId, RoundPhase, Sentence};
pub use win::{WinVerdict, check_win, evaluate, rank_by_x};
