//! Built-in sentences and random selection

use rand::Rng;

use crate::error::GameError;
use crate::sim::Sentence;

/// Sentences shipped with the game
pub const BUILTIN_SENTENCES: [&str; 5] = [
    "Кошка лежит на теплом подоконнике",
    "Море шумит нежным вечерним бризом",
    "Бабочка села на яркий цветок",
    "Дерево растет высоко над домами",
    "Солнце греет землю своими лучами",
];

/// A non-empty list of sentences to pick rounds from
#[derive(Debug, Clone)]
pub struct SentenceCatalog {
    sentences: Vec<Sentence>,
}

impl SentenceCatalog {
    pub fn new(sentences: Vec<Sentence>) -> Result<Self, GameError> {
        if sentences.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self { sentences })
    }

    /// Parse one sentence per entry
    pub fn parse<'a, I>(lines: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sentences = lines
            .into_iter()
            .map(Sentence::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sentences)
    }

    pub fn builtin() -> Self {
        let sentences = BUILTIN_SENTENCES
            .iter()
            .filter_map(|s| Sentence::parse(s).ok())
            .collect();
        Self { sentences }
    }

    /// Uniformly random sentence
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Sentence {
        &self.sentences[rng.random_range(0..self.sentences.len())]
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter()
    }
}

impl Default for SentenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_builtin_catalog() {
        let catalog = SentenceCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.iter().all(|s| s.len() == 5));
    }

    #[test]
    fn test_pick_covers_catalog() {
        let catalog = SentenceCatalog::builtin();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(catalog.pick(&mut rng).to_string());
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn test_parse_rejects_blank_lines() {
        assert!(matches!(
            SentenceCatalog::parse(["one two", " "]),
            Err(GameError::EmptySentence)
        ));
        assert!(matches!(
            SentenceCatalog::parse(std::iter::empty()),
            Err(GameError::EmptyCatalog)
        ));
        assert_eq!(SentenceCatalog::parse(["one two"]).unwrap().len(), 1);
    }
}
