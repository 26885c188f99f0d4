//! Round data: cards, the target sentence, and the round phase

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::error::GameError;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Cards are being created and scattered
    Scattering,
    /// Cards can be dragged
    Playable,
    /// Sentence assembled; positions are frozen
    Solved,
}

/// Stable identity of a card within a round
///
/// Two cards showing the same word still have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// A draggable word card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    text: String,
    /// Top-left corner in container coordinates
    pub pos: Vec2,
    /// Rendered size (estimated until measured)
    pub size: Vec2,
}

impl Card {
    pub fn new(id: CardId, text: impl Into<String>, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            text: text.into(),
            pos,
            size,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// The target sentence; word index is the correct rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    words: Vec<String>,
}

impl Sentence {
    /// Split a sentence on whitespace
    pub fn parse(text: &str) -> Result<Self, GameError> {
        Self::from_words(text.split_whitespace())
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() || words.iter().any(|w| w.is_empty()) {
            return Err(GameError::EmptySentence);
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_parse() {
        let s = Sentence::parse("  Бабочка села  на яркий цветок ").unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.words()[0], "Бабочка");
        assert_eq!(s.to_string(), "Бабочка села на яркий цветок");
    }

    #[test]
    fn test_empty_sentence_rejected() {
        assert!(matches!(Sentence::parse("   "), Err(GameError::EmptySentence)));
        assert!(matches!(
            Sentence::from_words(["a", ""]),
            Err(GameError::EmptySentence)
        ));
    }

    #[test]
    fn test_card_rect() {
        let card = Card::new(CardId(3), "на", Vec2::new(10.0, 20.0), Vec2::new(36.0, 30.0));
        let r = card.rect();
        assert_eq!(r.right(), 46.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(card.text(), "на");
    }
}
