//! Drag constraints for a single card
//!
//! A drag is a three-step gesture: press captures where on the card the
//! pointer grabbed it, every move proposes a new top-left corner, release ends
//! the gesture. A proposed position is clamped into the container (minus the
//! margin) and then either taken whole or rejected whole: a card never slides
//! along or snaps next to a card it would overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, intersects};
use super::state::{Card, CardId};

/// Per-gesture context, created on press and passed to every move/release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    /// Round the gesture started in
    pub round: u64,
    pub card: CardId,
    /// Pointer position minus card top-left at press time
    pub grab_offset: Vec2,
}

/// Result of a single drag move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// Card moved to this position
    Moved(Vec2),
    /// Candidate overlapped another card; position unchanged
    Blocked { by: CardId },
    /// Move not applicable (round solved, stale gesture)
    Ignored,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }
}

/// Start dragging `card` with the pointer at `pointer`
pub fn begin_drag(round: u64, card: &Card, pointer: Vec2) -> DragGesture {
    DragGesture {
        round,
        card: card.id,
        grab_offset: pointer - card.pos,
    }
}

/// Clamp a top-left corner so the card stays `margin` away from every edge
///
/// Each axis is clamped independently. When the card plus margins does not
/// fit, the lower bound wins and the card sits at `margin`.
pub fn clamp_to_container(pos: Vec2, size: Vec2, container: Vec2, margin: f32) -> Vec2 {
    let lo = Vec2::splat(margin);
    let hi = container - size - Vec2::splat(margin);
    pos.min(hi).max(lo)
}

/// Candidate top-left corner for the pointer position, before collision checks
pub fn candidate_position(
    gesture: &DragGesture,
    card: &Card,
    pointer: Vec2,
    container: Vec2,
    margin: f32,
) -> Vec2 {
    clamp_to_container(pointer - gesture.grab_offset, card.size, container, margin)
}

/// Apply one move of a drag gesture to `card`
///
/// `others` are read-only; only `card` is ever mutated, and only when the
/// candidate rectangle is clear of every other card.
pub fn drag_card<'a, I>(
    card: &mut Card,
    others: I,
    gesture: &DragGesture,
    pointer: Vec2,
    container: Vec2,
    margin: f32,
) -> MoveOutcome
where
    I: IntoIterator<Item = &'a Card>,
{
    let pos = candidate_position(gesture, card, pointer, container, margin);
    let candidate = Rect::new(pos, card.size);

    if let Some(other) = others
        .into_iter()
        .find(|o| o.id != card.id && intersects(&candidate, &o.rect()))
    {
        return MoveOutcome::Blocked { by: other.id };
    }

    card.pos = pos;
    MoveOutcome::Moved(pos)
}

/// Borrow one card mutably and the rest immutably
pub fn split_card_mut(
    cards: &mut [Card],
    index: usize,
) -> Option<(&mut Card, impl Iterator<Item = &Card>)> {
    if index >= cards.len() {
        return None;
    }
    let (before, rest) = cards.split_at_mut(index);
    let (card, after) = rest.split_first_mut()?;
    Some((card, before.iter().chain(after.iter())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CONTAINER: Vec2 = Vec2::new(800.0, 400.0);

    fn card(id: u32, x: f32, y: f32) -> Card {
        Card::new(CardId(id), "слово", Vec2::new(x, y), Vec2::new(60.0, 30.0))
    }

    #[test]
    fn test_grab_offset_prevents_jump() {
        let mut c = card(0, 100.0, 100.0);
        let gesture = begin_drag(1, &c, Vec2::new(110.0, 115.0));
        assert_eq!(gesture.grab_offset, Vec2::new(10.0, 15.0));

        let outcome = drag_card(&mut c, [], &gesture, Vec2::new(210.0, 115.0), CONTAINER, 30.0);
        assert_eq!(outcome, MoveOutcome::Moved(Vec2::new(200.0, 100.0)));
        assert_eq!(c.pos, Vec2::new(200.0, 100.0));
    }

    #[test]
    fn test_clamped_to_margin() {
        let mut c = card(0, 100.0, 100.0);
        let gesture = begin_drag(1, &c, c.pos);

        drag_card(&mut c, [], &gesture, Vec2::new(-50.0, 5.0), CONTAINER, 30.0);
        assert_eq!(c.pos, Vec2::new(30.0, 30.0));

        drag_card(&mut c, [], &gesture, Vec2::new(5000.0, 5000.0), CONTAINER, 30.0);
        assert_eq!(c.pos, Vec2::new(800.0 - 60.0 - 30.0, 400.0 - 30.0 - 30.0));
    }

    #[test]
    fn test_zero_margin_reaches_edges() {
        let mut c = card(0, 100.0, 100.0);
        let gesture = begin_drag(1, &c, c.pos);
        drag_card(&mut c, [], &gesture, Vec2::new(-10.0, 1000.0), CONTAINER, 0.0);
        assert_eq!(c.pos, Vec2::new(0.0, 370.0));
    }

    #[test]
    fn test_container_too_small_pins_to_margin() {
        let pos = clamp_to_container(Vec2::new(5.0, 5.0), Vec2::new(60.0, 30.0), Vec2::new(80.0, 50.0), 30.0);
        assert_eq!(pos, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_overlap_rejected_in_place() {
        let mut c = card(0, 100.0, 100.0);
        let other = card(1, 200.0, 100.0);
        let gesture = begin_drag(1, &c, c.pos);

        // Would overlap `other` by 10px: rejected, no partial move
        let outcome = drag_card(&mut c, [&other], &gesture, Vec2::new(150.0, 100.0), CONTAINER, 30.0);
        assert_eq!(outcome, MoveOutcome::Blocked { by: CardId(1) });
        assert_eq!(c.pos, Vec2::new(100.0, 100.0));

        // Exactly adjacent is allowed
        let outcome = drag_card(&mut c, [&other], &gesture, Vec2::new(140.0, 100.0), CONTAINER, 30.0);
        assert_eq!(outcome, MoveOutcome::Moved(Vec2::new(140.0, 100.0)));
    }

    #[test]
    fn test_self_is_not_an_obstacle() {
        let mut c = card(0, 100.0, 100.0);
        let snapshot = c.clone();
        let gesture = begin_drag(1, &c, c.pos);
        let outcome = drag_card(&mut c, [&snapshot], &gesture, Vec2::new(105.0, 100.0), CONTAINER, 30.0);
        assert!(outcome.is_moved());
    }

    #[test]
    fn test_split_card_mut() {
        let mut cards = vec![card(0, 0.0, 0.0), card(1, 100.0, 0.0), card(2, 200.0, 0.0)];
        let (one, others) = split_card_mut(&mut cards, 1).unwrap();
        let ids: Vec<CardId> = others.map(|c| c.id).collect();
        assert_eq!(ids, vec![CardId(0), CardId(2)]);
        one.pos.x = 150.0;
        assert_eq!(cards[1].pos.x, 150.0);
        assert!(split_card_mut(&mut cards, 3).is_none());
    }

    proptest! {
        #[test]
        fn blocked_moves_leave_position_unchanged(
            px in -200.0f32..1000.0,
            py in -200.0f32..600.0,
            ox in 0.0f32..740.0,
            oy in 0.0f32..370.0
        ) {
            let mut c = card(0, 400.0, 200.0);
            let other = card(1, ox, oy);
            let before = c.pos;
            let gesture = begin_drag(1, &c, c.pos);

            match drag_card(&mut c, [&other], &gesture, Vec2::new(px, py), CONTAINER, 30.0) {
                MoveOutcome::Moved(pos) => {
                    prop_assert_eq!(c.pos, pos);
                    prop_assert!(!intersects(&c.rect(), &other.rect()));
                    prop_assert!(pos.x >= 30.0 && pos.x <= 710.0);
                    prop_assert!(pos.y >= 30.0 && pos.y <= 340.0);
                }
                MoveOutcome::Blocked { by } => {
                    prop_assert_eq!(by, CardId(1));
                    prop_assert_eq!(c.pos, before);
                }
                MoveOutcome::Ignored => prop_assert!(false, "pure drag never ignores"),
            }
        }
    }
}
