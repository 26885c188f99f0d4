//! Initial scatter of word cards
//!
//! Cards are dropped at random spots inside the container, retrying until the
//! spot is clear of every card already placed. The search is bounded: once the
//! attempt budget runs out the card goes to the container origin, overlap or
//! not, so starting a round can never hang.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, intersects};
use super::state::Card;
use crate::settings::Rules;

/// Where a card ended up and how
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Found a free spot after `attempts` samples
    Placed { pos: Vec2, attempts: u32 },
    /// Budget exhausted; card sits at the origin and may overlap
    Fallback { pos: Vec2 },
}

impl Placement {
    pub fn pos(&self) -> Vec2 {
        match *self {
            Placement::Placed { pos, .. } | Placement::Fallback { pos } => pos,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Placement::Fallback { .. })
    }
}

/// Fallback position when no free spot was found
pub const FALLBACK_POS: Vec2 = Vec2::ZERO;

/// Size estimate for a card that has not been rendered yet
///
/// Linear in the character count; the renderer's measurement replaces it
/// once the card exists.
pub fn estimate_card_size(text: &str, rules: &Rules) -> Vec2 {
    let chars = text.chars().count() as f32;
    Vec2::new(
        chars * rules.char_width + rules.card_padding,
        rules.approx_card_height,
    )
}

/// Pick a top-left corner for a new card
///
/// Samples uniformly from `[0, container - approx_size]` on each axis and
/// accepts the first candidate that does not intersect any rectangle in
/// `existing`. Existing cards are checked with their real (measured) size.
pub fn place_card<R: Rng + ?Sized>(
    approx_size: Vec2,
    container: Vec2,
    existing: &[Card],
    max_attempts: u32,
    rng: &mut R,
) -> Placement {
    let span = (container - approx_size).max(Vec2::ZERO);

    for attempt in 1..=max_attempts {
        let pos = Vec2::new(sample(rng, span.x), sample(rng, span.y));
        let candidate = Rect::new(pos, approx_size);

        if !existing.iter().any(|c| intersects(&candidate, &c.rect())) {
            return Placement::Placed {
                pos,
                attempts: attempt,
            };
        }
    }

    Placement::Fallback { pos: FALLBACK_POS }
}

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, upper: f32) -> f32 {
    if upper > 0.0 {
        rng.random_range(0.0..upper)
    } else {
        0.0
    }
}
