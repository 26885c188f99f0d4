//! Rendering collaborators
//!
//! The round logic never touches the DOM. It talks to a [`CardRenderer`]:
//! - `headless`: in-memory renderer for native runs and tests
//! - `dom`: browser renderer (absolutely positioned `div`s plus an SVG orbit)

pub mod headless;

#[cfg(target_arch = "wasm32")]
pub mod dom;

use glam::Vec2;

use crate::celebration::Orbit;
use crate::sim::{Card, CardId};

pub use headless::HeadlessRenderer;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;

/// What the round needs from whatever draws the cards
pub trait CardRenderer {
    /// Drop every card and celebration visual from the previous round
    fn clear(&mut self);

    /// Create the visual for a new card at `card.pos`
    fn spawn_card(&mut self, card: &Card);

    /// Actual rendered size of a spawned card
    fn measure(&self, card: &Card) -> Vec2;

    fn set_position(&mut self, id: CardId, pos: Vec2);

    fn set_interactive(&mut self, id: CardId, interactive: bool);

    /// Start the star orbit around the solved sentence
    fn render_celebration(&mut self, orbit: &Orbit);

    fn set_restart_visible(&mut self, visible: bool);
}
