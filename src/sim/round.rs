//! One round: scatter, drag, solve
//!
//! `Round` owns the cards and the phase. Input arrives as press/move/release
//! calls carrying a [`DragGesture`]; visuals are pushed to a [`CardRenderer`].
//! Once solved, nothing moves again.

use glam::Vec2;
use rand::Rng;

use super::drag::{DragGesture, MoveOutcome, begin_drag, drag_card, split_card_mut};
use super::geometry::{BoundingBox, bounding_box};
use super::placement::{estimate_card_size, place_card};
use super::state::{Card, CardId, RoundPhase, Sentence};
use super::win::{WinVerdict, evaluate};
use crate::celebration::Orbit;
use crate::error::GameError;
use crate::renderer::CardRenderer;
use crate::settings::Rules;

#[derive(Debug, Clone)]
pub struct Round {
    id: u64,
    sentence: Sentence,
    container: Vec2,
    rules: Rules,
    phase: RoundPhase,
    /// In sentence order; index == correct rank
    cards: Vec<Card>,
    /// Cards that had to use the fallback position
    fallbacks: u32,
}

/// Reject zero, negative or non-finite container sizes
pub fn validate_container(container: Vec2) -> Result<(), GameError> {
    if !container.is_finite() || container.x <= 0.0 || container.y <= 0.0 {
        return Err(GameError::InvalidContainer {
            width: container.x,
            height: container.y,
        });
    }
    Ok(())
}

impl Round {
    /// Tear down whatever the renderer shows and scatter a fresh set of cards
    pub fn start<G, R>(
        id: u64,
        sentence: Sentence,
        container: Vec2,
        rules: Rules,
        rng: &mut G,
        renderer: &mut R,
    ) -> Result<Self, GameError>
    where
        G: Rng + ?Sized,
        R: CardRenderer + ?Sized,
    {
        validate_container(container)?;
        rules.validate()?;
        if sentence.is_empty() {
            return Err(GameError::EmptySentence);
        }

        renderer.clear();

        let mut round = Self {
            id,
            sentence,
            container,
            rules,
            phase: RoundPhase::Scattering,
            cards: Vec::new(),
            fallbacks: 0,
        };
        round.scatter(rng, renderer);
        round.phase = RoundPhase::Playable;

        log::info!(
            "Round {} started: {} cards in {}x{} ({} fallback placements)",
            round.id,
            round.cards.len(),
            container.x,
            container.y,
            round.fallbacks
        );

        Ok(round)
    }

    fn scatter<G, R>(&mut self, rng: &mut G, renderer: &mut R)
    where
        G: Rng + ?Sized,
        R: CardRenderer + ?Sized,
    {
        let words = self.sentence.words().to_vec();
        self.cards.reserve(words.len());

        for (i, word) in words.into_iter().enumerate() {
            let approx = estimate_card_size(&word, &self.rules);
            let placement = place_card(
                approx,
                self.container,
                &self.cards,
                self.rules.max_placement_attempts,
                rng,
            );
            if placement.is_fallback() {
                self.fallbacks += 1;
                log::warn!(
                    "No free spot for {:?} after {} attempts, using fallback",
                    word,
                    self.rules.max_placement_attempts
                );
            }

            let mut card = Card::new(CardId(i as u32), word, placement.pos(), approx);
            renderer.spawn_card(&card);
            // Later placements collide against the real size
            card.size = renderer.measure(&card);
            renderer.set_position(card.id, card.pos);
            self.cards.push(card);
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_solved(&self) -> bool {
        self.phase == RoundPhase::Solved
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn container(&self) -> Vec2 {
        self.container
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn fallback_count(&self) -> u32 {
        self.fallbacks
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        bounding_box(self.cards.iter().map(Card::rect))
    }

    /// Current verdict, without changing anything
    pub fn evaluate(&self) -> WinVerdict {
        evaluate(&self.cards, &self.sentence, &self.rules)
    }

    /// Pointer pressed on `card`
    ///
    /// Returns `None` when the round no longer accepts drags.
    pub fn press_start(&self, card: CardId, pointer: Vec2) -> Result<Option<DragGesture>, GameError> {
        let card = self.card(card).ok_or(GameError::UnknownCard(card))?;
        if self.phase != RoundPhase::Playable {
            return Ok(None);
        }
        Ok(Some(begin_drag(self.id, card, pointer)))
    }

    /// Pointer moved during `gesture`
    pub fn press_move<R>(&mut self, gesture: &DragGesture, pointer: Vec2, renderer: &mut R) -> MoveOutcome
    where
        R: CardRenderer + ?Sized,
    {
        if self.phase != RoundPhase::Playable || gesture.round != self.id {
            return MoveOutcome::Ignored;
        }
        let Some(index) = self.cards.iter().position(|c| c.id == gesture.card) else {
            return MoveOutcome::Ignored;
        };
        let Some((card, others)) = split_card_mut(&mut self.cards, index) else {
            return MoveOutcome::Ignored;
        };

        let outcome = drag_card(card, others, gesture, pointer, self.container, self.rules.drag_margin);
        match outcome {
            MoveOutcome::Moved(pos) => renderer.set_position(gesture.card, pos),
            MoveOutcome::Blocked { by } => {
                log::debug!("{} blocked by {}", gesture.card, by);
            }
            MoveOutcome::Ignored => {}
        }
        outcome
    }

    /// Pointer released, ending `gesture`
    ///
    /// Checks the win condition; on success the round becomes `Solved`, every
    /// card is locked, the orbit is started and restart is offered. Returns
    /// `None` when the gesture no longer applies.
    pub fn press_end<R>(&mut self, gesture: DragGesture, renderer: &mut R) -> Option<WinVerdict>
    where
        R: CardRenderer + ?Sized,
    {
        if self.phase != RoundPhase::Playable || gesture.round != self.id {
            return None;
        }

        let verdict = self.evaluate();
        if verdict.is_solved() {
            self.solve(renderer);
        } else {
            log::debug!("Round {} not solved yet: {:?}", self.id, verdict);
        }
        Some(verdict)
    }

    fn solve<R>(&mut self, renderer: &mut R)
    where
        R: CardRenderer + ?Sized,
    {
        self.phase = RoundPhase::Solved;
        for card in &self.cards {
            renderer.set_interactive(card.id, false);
        }
        if let Some(bounds) = self.bounding_box() {
            renderer.render_celebration(&Orbit::around(bounds, self.rules.celebration_margin));
        }
        renderer.set_restart_visible(true);
        log::info!("Round {} solved: \"{}\"", self.id, self.sentence);
    }

    /// Round with a fixed layout, already playable
    #[cfg(test)]
    pub(crate) fn from_layout(id: u64, sentence: Sentence, container: Vec2, rules: Rules, cards: Vec<Card>) -> Self {
        Self {
            id,
            sentence,
            container,
            rules,
            phase: RoundPhase::Playable,
            cards,
            fallbacks: 0,
        }
    }
}
