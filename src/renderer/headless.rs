//! In-memory renderer
//!
//! Keeps the last state it was told about so native runs and tests can
//! inspect it. Card sizes come from the same text-length estimate the
//! placement engine uses, optionally overridden per word.

use std::collections::HashMap;

use glam::Vec2;

use super::CardRenderer;
use crate::celebration::Orbit;
use crate::settings::Rules;
use crate::sim::{Card, CardId, estimate_card_size};

/// Visual state of one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub text: String,
    pub pos: Vec2,
    pub interactive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    rules: Rules,
    /// Measured size by word, falls back to the estimate
    sizes: HashMap<String, Vec2>,
    pub cards: HashMap<CardId, CardView>,
    pub celebration: Option<Orbit>,
    pub restart_visible: bool,
    /// Number of `clear` calls, one per round
    pub clears: u32,
}

impl HeadlessRenderer {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    /// Report `size` for every card showing `word`
    pub fn with_size(mut self, word: impl Into<String>, size: Vec2) -> Self {
        self.sizes.insert(word.into(), size);
        self
    }

    pub fn view(&self, id: CardId) -> Option<&CardView> {
        self.cards.get(&id)
    }

    /// True when every card has had its interactivity switched off
    pub fn all_locked(&self) -> bool {
        self.cards.values().all(|v| !v.interactive)
    }
}

impl CardRenderer for HeadlessRenderer {
    fn clear(&mut self) {
        self.cards.clear();
        self.celebration = None;
        self.restart_visible = false;
        self.clears += 1;
    }

    fn spawn_card(&mut self, card: &Card) {
        self.cards.insert(
            card.id,
            CardView {
                text: card.text().to_string(),
                pos: card.pos,
                interactive: true,
            },
        );
    }

    fn measure(&self, card: &Card) -> Vec2 {
        self.sizes
            .get(card.text())
            .copied()
            .unwrap_or_else(|| estimate_card_size(card.text(), &self.rules))
    }

    fn set_position(&mut self, id: CardId, pos: Vec2) {
        if let Some(view) = self.cards.get_mut(&id) {
            view.pos = pos;
        }
    }

    fn set_interactive(&mut self, id: CardId, interactive: bool) {
        if let Some(view) = self.cards.get_mut(&id) {
            view.interactive = interactive;
        }
    }

    fn render_celebration(&mut self, orbit: &Orbit) {
        log::info!(
            "Star orbit at ({:.0}, {:.0}) radii {:.0}x{:.0}",
            orbit.center.x,
            orbit.center.y,
            orbit.radii.x,
            orbit.radii.y
        );
        self.celebration = Some(*orbit);
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
    }
}
