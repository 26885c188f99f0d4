//! Session: the surface a UI shell talks to
//!
//! Owns the renderer, the rules, the RNG and the current round. Restarting
//! throws the whole round away and builds a new one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::error::GameError;
use crate::renderer::CardRenderer;
use crate::sentences::SentenceCatalog;
use crate::settings::Rules;
use crate::sim::{CardId, DragGesture, MoveOutcome, Round, Sentence, WinVerdict, validate_container};

pub struct Session<R: CardRenderer> {
    renderer: R,
    rules: Rules,
    container: Vec2,
    catalog: SentenceCatalog,
    seed: u64,
    rng: Pcg32,
    rounds_started: u64,
    round: Option<Round>,
}

impl<R: CardRenderer> Session<R> {
    pub fn new(renderer: R, rules: Rules, container: Vec2, seed: u64) -> Result<Self, GameError> {
        rules.validate()?;
        validate_container(container)?;
        Ok(Self {
            renderer,
            rules,
            container,
            catalog: SentenceCatalog::builtin(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rounds_started: 0,
            round: None,
        })
    }

    /// Replace the sentences `restart` picks from
    pub fn with_catalog(mut self, catalog: SentenceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Start a round for `sentence`, discarding the current one
    pub fn start_round(&mut self, sentence: Sentence) -> Result<&Round, GameError> {
        let id = self.rounds_started + 1;
        let round = Round::start(
            id,
            sentence,
            self.container,
            self.rules.clone(),
            &mut self.rng,
            &mut self.renderer,
        )?;
        self.rounds_started = id;
        Ok(self.round.insert(round))
    }

    /// Start a round with a random sentence from the catalog
    pub fn restart(&mut self) -> Result<&Round, GameError> {
        let sentence = self.catalog.pick(&mut self.rng).clone();
        self.start_round(sentence)
    }

    pub fn is_solved(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_solved)
    }

    pub fn press_start(&self, card: CardId, pointer: Vec2) -> Result<Option<DragGesture>, GameError> {
        match &self.round {
            Some(round) => round.press_start(card, pointer),
            None => Err(GameError::UnknownCard(card)),
        }
    }

    pub fn press_move(&mut self, gesture: &DragGesture, pointer: Vec2) -> MoveOutcome {
        match &mut self.round {
            Some(round) => round.press_move(gesture, pointer, &mut self.renderer),
            None => MoveOutcome::Ignored,
        }
    }

    pub fn press_end(&mut self, gesture: DragGesture) -> Option<WinVerdict> {
        self.round
            .as_mut()
            .and_then(|round| round.press_end(gesture, &mut self.renderer))
    }

    /// New container size, used from the next round on
    pub fn resize(&mut self, container: Vec2) -> Result<(), GameError> {
        validate_container(container)?;
        self.container = container;
        Ok(())
    }

    /// New rules, used from the next round on
    pub fn set_rules(&mut self, rules: Rules) -> Result<(), GameError> {
        rules.validate()?;
        self.rules = rules;
        Ok(())
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessRenderer;
    use crate::settings::Strictness;
    use crate::sim::RoundPhase;

    const CONTAINER: Vec2 = Vec2::new(900.0, 500.0);

    fn session(seed: u64) -> Session<HeadlessRenderer> {
        Session::new(HeadlessRenderer::new(Rules::default()), Rules::default(), CONTAINER, seed).unwrap()
    }

    /// Start position and line slot of every card, left to right
    ///
    /// The line goes in a horizontal band no scattered card touches, so
    /// every drop lands on free space.
    fn line_targets(session: &Session<HeadlessRenderer>) -> Vec<(CardId, Vec2, Vec2)> {
        let round = session.round().unwrap();
        let height = round.cards().iter().map(|c| c.size.y).fold(0.0, f32::max);
        let margin = round.rules().drag_margin;
        let max_y = round.container().y - margin - height;
        let band = (margin as u32..=max_y as u32)
            .map(|y| y as f32)
            .find(|&y| {
                round
                    .cards()
                    .iter()
                    .all(|c| c.pos.y >= y + height || c.pos.y + c.size.y <= y)
            })
            .unwrap();

        let mut x = 40.0;
        round
            .cards()
            .iter()
            .map(|c| {
                let target = Vec2::new(x, band);
                x += c.size.x + 10.0;
                (c.id, c.pos, target)
            })
            .collect()
    }

    /// Drag every card of the current round onto one line
    fn line_up(session: &mut Session<HeadlessRenderer>) -> Option<WinVerdict> {
        let mut verdict = None;
        for (id, pos, target) in line_targets(session) {
            let gesture = session.press_start(id, pos).unwrap().unwrap();
            assert!(session.press_move(&gesture, target).is_moved());
            verdict = session.press_end(gesture);
        }
        verdict
    }

    #[test]
    fn test_new_rejects_bad_container() {
        let result = Session::new(
            HeadlessRenderer::new(Rules::default()),
            Rules::default(),
            Vec2::new(900.0, -1.0),
            1,
        );
        assert!(matches!(result, Err(GameError::InvalidContainer { .. })));
    }

    #[test]
    fn test_no_round_yet() {
        let mut s = session(1);
        assert!(!s.is_solved());
        assert!(s.round().is_none());
        assert!(s.press_start(CardId(0), Vec2::ZERO).is_err());
        let gesture = DragGesture {
            round: 1,
            card: CardId(0),
            grab_offset: Vec2::ZERO,
        };
        assert_eq!(s.press_move(&gesture, Vec2::ZERO), MoveOutcome::Ignored);
        assert_eq!(s.press_end(gesture), None);
    }

    #[test]
    fn test_start_round_with_sentence() {
        let mut s = session(3);
        let sentence = Sentence::parse("раз два три").unwrap();
        let round = s.start_round(sentence.clone()).unwrap();
        assert_eq!(round.sentence(), &sentence);
        assert_eq!(round.phase(), RoundPhase::Playable);
        assert_eq!(s.rounds_started(), 1);
        assert_eq!(s.renderer().cards.len(), 3);
    }

    #[test]
    fn test_restart_picks_catalog_sentence() {
        let mut s = session(11);
        let sentence = s.restart().unwrap().sentence().clone();
        assert!(SentenceCatalog::builtin().iter().any(|c| *c == sentence));
    }

    #[test]
    fn test_full_round() {
        let mut s = session(2);
        s.start_round(Sentence::parse("Бабочка села на яркий цветок").unwrap())
            .unwrap();

        assert_eq!(line_up(&mut s), Some(WinVerdict::Solved));
        assert!(s.is_solved());
        assert!(s.renderer().all_locked());
        assert!(s.renderer().restart_visible);
        assert!(s.renderer().celebration.is_some());
    }

    #[test]
    fn test_late_release_still_checks_win() {
        let mut s = session(2);
        s.start_round(Sentence::parse("Бабочка села на яркий цветок").unwrap())
            .unwrap();
        let mut targets = line_targets(&s);
        let (last_id, last_pos, last_target) = targets.pop().unwrap();
        for (id, pos, target) in targets {
            let gesture = s.press_start(id, pos).unwrap().unwrap();
            assert!(s.press_move(&gesture, target).is_moved());
            s.press_end(gesture);
        }

        // Last card dropped into place, but its release never arrived
        let missed = s.press_start(last_id, last_pos).unwrap().unwrap();
        assert!(s.press_move(&missed, last_target).is_moved());
        assert!(!s.is_solved());

        // The next press first closes the dangling gesture
        assert_eq!(s.press_end(missed), Some(WinVerdict::Solved));
        assert!(s.is_solved());
        assert_eq!(s.press_start(last_id, last_target).unwrap(), None);
    }

    #[test]
    fn test_restart_tears_down_solved_round() {
        let mut s = session(2);
        s.start_round(Sentence::parse("Бабочка села на яркий цветок").unwrap())
            .unwrap();
        line_up(&mut s);
        assert!(s.is_solved());

        let old_gesture = DragGesture {
            round: 1,
            card: CardId(0),
            grab_offset: Vec2::ZERO,
        };

        s.restart().unwrap();
        assert!(!s.is_solved());
        assert_eq!(s.rounds_started(), 2);
        assert_eq!(s.renderer().clears, 2);
        assert!(s.renderer().celebration.is_none());
        assert!(!s.renderer().restart_visible);

        // Gestures from the previous round do nothing
        assert_eq!(s.press_move(&old_gesture, Vec2::new(300.0, 300.0)), MoveOutcome::Ignored);
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let mut a = session(99);
        let mut b = session(99);
        for _ in 0..3 {
            let ra: Vec<Vec2> = a.restart().unwrap().cards().iter().map(|c| c.pos).collect();
            let rb: Vec<Vec2> = b.restart().unwrap().cards().iter().map(|c| c.pos).collect();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn test_rules_apply_to_next_round() {
        let mut s = session(4);
        s.restart().unwrap();
        s.set_rules(Rules::from_strictness(Strictness::Legacy)).unwrap();
        assert_eq!(s.round().unwrap().rules().drag_margin, 30.0);
        s.restart().unwrap();
        assert_eq!(s.round().unwrap().rules().drag_margin, 0.0);

        let bad = Rules {
            drag_margin: -5.0,
            ..Rules::default()
        };
        assert!(s.set_rules(bad).is_err());
    }

    #[test]
    fn test_resize() {
        let mut s = session(4);
        assert!(s.resize(Vec2::new(0.0, 10.0)).is_err());
        s.resize(Vec2::new(1200.0, 600.0)).unwrap();
        assert_eq!(s.restart().unwrap().container(), Vec2::new(1200.0, 600.0));
    }
}
