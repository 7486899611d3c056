use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Target sequence of the current round and how far the player got through it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    all: Vec<ColorId>,
    guessed: Vec<ColorId>,
}

impl MatchState {
    pub fn all(&self) -> &[ColorId] {
        &self.all
    }

    pub fn guessed(&self) -> &[ColorId] {
        &self.guessed
    }

    /// Next color the player has to pick, `None` once the sequence is complete.
    pub fn expected(&self) -> Option<ColorId> {
        self.all.get(self.guessed.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        !self.all.is_empty() && self.guessed.len() == self.all.len()
    }

    pub fn is_started(&self) -> bool {
        !self.all.is_empty()
    }

    fn reset(&mut self, all: Vec<ColorId>) {
        self.all = all;
        self.guessed.clear();
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub highscore: u32,
    pub game_over: bool,
    pub presentation: bool,
}

impl GameState {
    pub const fn accepts_input(&self) -> bool {
        !self.presentation && !self.game_over
    }

    fn record_highscore(&mut self) {
        self.highscore = self.highscore.max(self.score);
    }
}

/// A single guess as evaluated against the state at the time it was made.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub id: ColorId,
    pub succeeded: bool,
}

/// Owns the match and score state and drives rounds through presentation and guessing.
#[derive(Clone, Debug)]
pub struct RoundController<G = RandomSequenceGenerator> {
    config: GameConfig,
    generator: G,
    current: MatchState,
    game: GameState,
    tag: RoundTag,
}

impl<G: SequenceGenerator> RoundController<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            current: MatchState::default(),
            game: GameState::default(),
            tag: RoundTag::default(),
        }
    }

    /// Carries a previously achieved high score over into this controller.
    pub fn with_highscore(mut self, highscore: u32) -> Self {
        self.game.highscore = self.game.highscore.max(highscore);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn current_match(&self) -> &MatchState {
        &self.current
    }

    pub fn tag(&self) -> RoundTag {
        self.tag
    }

    /// Starts a new game: fresh sequence, score back to zero, presentation phase on.
    ///
    /// The returned tag has to be handed back to [`Self::make_presentation`] once the presentation delay elapsed.
    pub fn start_match(&mut self) -> RoundTag {
        let all = self
            .generator
            .generate(self.config.initial_length.into());
        self.current.reset(all);
        self.game.score = 0;
        self.game.game_over = false;
        self.begin_presentation()
    }

    /// Ends the presentation phase of the round identified by `tag`.
    pub fn make_presentation(&mut self, tag: RoundTag) -> Result<PhaseOutcome> {
        if tag != self.tag {
            log::warn!(
                "Ignoring presentation timer of round {}, current round is {}",
                tag.0,
                self.tag.0
            );
            return Err(GameError::StaleRound);
        }

        if !self.game.presentation {
            return Ok(PhaseOutcome::NoChange);
        }

        self.game.presentation = false;
        log::debug!("Round {} accepts input", tag.0);
        Ok(PhaseOutcome::Revealed)
    }

    pub fn guess_payload(&self, id: ColorId) -> Guess {
        Guess {
            id,
            succeeded: self.current.expected() == Some(id),
        }
    }

    pub fn guess_color(&mut self, guess: Guess) -> Result<GuessOutcome> {
        self.check_accepts_input()?;

        let succeeded = self.current.expected() == Some(guess.id);
        if succeeded != guess.succeeded {
            log::warn!(
                "Guess payload for {} is out of date, re-evaluated as {}",
                guess.id,
                succeeded
            );
        }
        log::trace!("guess {} succeeded: {}", guess.id, succeeded);

        if !succeeded {
            self.game.game_over = true;
            self.game.record_highscore();
            log::debug!(
                "Game over with score {}, high score {}",
                self.game.score,
                self.game.highscore
            );
            return Ok(GuessOutcome::Wrong);
        }

        self.current.guessed.push(guess.id);
        if self.current.is_complete() {
            self.game.score = self.game.score.saturating_add(1);
            self.game.record_highscore();
            Ok(GuessOutcome::RoundWon(self.start_next_round()))
        } else {
            Ok(GuessOutcome::Correct)
        }
    }

    pub fn submit_guess(&mut self, id: ColorId) -> Result<GuessOutcome> {
        self.guess_color(self.guess_payload(id))
    }

    pub fn restart(&mut self) -> Result<RoundTag> {
        if !self.game.game_over {
            return Err(GameError::NotOver);
        }
        Ok(self.start_match())
    }

    /// Next round keeps the sequence and appends one more color.
    fn start_next_round(&mut self) -> RoundTag {
        let mut all = core::mem::take(&mut self.current.all);
        all.push(self.generator.next_color());
        self.current.reset(all);
        self.begin_presentation()
    }

    fn begin_presentation(&mut self) -> RoundTag {
        self.game.presentation = true;
        self.tag = self.tag.next();
        log::debug!(
            "Round {} started with {} colors",
            self.tag.0,
            self.current.all.len()
        );
        self.tag
    }

    fn check_accepts_input(&self) -> Result<()> {
        if !self.current.is_started() {
            Err(GameError::NotStarted)
        } else if self.game.game_over {
            Err(GameError::AlreadyEnded)
        } else if self.game.presentation {
            Err(GameError::Presenting)
        } else {
            Ok(())
        }
    }
}
