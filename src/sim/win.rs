//! Win condition: is the sentence assembled on one line?
//!
//! Cards are ranked left to right by X (stable, so equal X keeps creation
//! order). The layout wins when:
//! 1. the ranked words spell the target sentence exactly,
//! 2. every card's Y is within the vertical tolerance of the leftmost card,
//! 3. no two X-neighbours are further apart than the max horizontal gap
//!    (skipped when the gap check is disabled).

use super::state::{Card, CardId, Sentence};
use crate::settings::Rules;

/// Outcome of a win check, with the first failed rule
#[derive(Debug, Clone, PartialEq)]
pub enum WinVerdict {
    Solved,
    /// The left-to-right words differ from the sentence at `index`
    WrongOrder { index: usize },
    /// `card` strays `deviation` px vertically from the leftmost card
    NotColinear { card: CardId, deviation: f32 },
    /// `gap` px between the X-neighbours `left` and `right`
    GapTooWide { left: CardId, right: CardId, gap: f32 },
    /// No cards, or card count differs from the sentence length
    Incomplete,
}

impl WinVerdict {
    pub fn is_solved(&self) -> bool {
        matches!(self, WinVerdict::Solved)
    }
}

/// Cards in left-to-right order
pub fn rank_by_x(cards: &[Card]) -> Vec<&Card> {
    let mut ranked: Vec<&Card> = cards.iter().collect();
    // sort_by is stable: ties keep insertion order
    ranked.sort_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
    ranked
}

/// Evaluate the current layout against the target sentence
pub fn evaluate(cards: &[Card], target: &Sentence, rules: &Rules) -> WinVerdict {
    if cards.is_empty() || cards.len() != target.len() {
        return WinVerdict::Incomplete;
    }

    let ranked = rank_by_x(cards);

    if let Some(index) = ranked
        .iter()
        .zip(target.words())
        .position(|(card, word)| card.text() != word.as_str())
    {
        return WinVerdict::WrongOrder { index };
    }

    let ref_y = ranked[0].pos.y;
    for card in &ranked[1..] {
        let deviation = (card.pos.y - ref_y).abs();
        if deviation > rules.vertical_tolerance {
            return WinVerdict::NotColinear {
                card: card.id,
                deviation,
            };
        }
    }

    if let Some(max_gap) = rules.max_horizontal_gap {
        for pair in ranked.windows(2) {
            let gap = pair[1].pos.x - pair[0].pos.x;
            if gap > max_gap {
                return WinVerdict::GapTooWide {
                    left: pair[0].id,
                    right: pair[1].id,
                    gap,
                };
            }
        }
    }

    WinVerdict::Solved
}

/// True when the layout spells the sentence on one compact line
pub fn check_win(cards: &[Card], target: &Sentence, rules: &Rules) -> bool {
    evaluate(cards, target, rules).is_solved()
}
