use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// What a single key press or click asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputAction {
    Guess(ColorId),
    Restart,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputOutcome {
    Guessed(GuessOutcome),
    Restarted(RoundTag),
}

impl InputOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Guessed(outcome) => outcome.has_update(),
            Self::Restarted(_) => true,
        }
    }

    /// Tag of the round this input started, if it started one.
    pub const fn started_round(self) -> Option<RoundTag> {
        match self {
            Self::Guessed(GuessOutcome::RoundWon(tag)) | Self::Restarted(tag) => Some(tag),
            Self::Guessed(_) => None,
        }
    }
}

/// Maps DOM `KeyboardEvent.key` values onto the names used in [`KeyBindings`].
pub fn normalize_key(key: &str) -> String {
    match key {
        " " | "Spacebar" => "space".to_string(),
        key => key.to_lowercase(),
    }
}

/// Key table, keyed by normalized key name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, InputAction>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: &str, action: InputAction) -> Option<InputAction> {
        self.keys.insert(normalize_key(key), action)
    }

    pub fn action_for_key(&self, key: &str) -> Option<InputAction> {
        self.keys.get(&normalize_key(key)).copied()
    }

    pub fn keys_for(&self, action: InputAction) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |&(_, &bound)| bound == action)
            .map(|(key, _)| key.as_str())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use ColorId::*;
        use InputAction::*;

        let mut bindings = Self::empty();
        for (keys, color) in [
            (["1", "d"], Green),
            (["2", "f"], Red),
            (["3", "j"], Yellow),
            (["4", "l"], Blue),
        ] {
            for key in keys {
                bindings.bind(key, Guess(color));
            }
        }
        bindings.bind("space", Restart);
        bindings
    }
}

impl<G: SequenceGenerator> RoundController<G> {
    /// Evaluates one input event against the current state.
    pub fn dispatch(&mut self, action: InputAction) -> Result<InputOutcome> {
        match action {
            InputAction::Guess(color) => self.submit_guess(color).map(InputOutcome::Guessed),
            InputAction::Restart => self.restart().map(InputOutcome::Restarted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use ColorId::*;

    #[test]
    fn default_bindings_cover_digits_letters_and_space() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.action_for_key("1"), Some(InputAction::Guess(Green)));
        assert_eq!(bindings.action_for_key("f"), Some(InputAction::Guess(Red)));
        assert_eq!(bindings.action_for_key("J"), Some(InputAction::Guess(Yellow)));
        assert_eq!(bindings.action_for_key("4"), Some(InputAction::Guess(Blue)));
        assert_eq!(bindings.action_for_key(" "), Some(InputAction::Restart));
        assert_eq!(bindings.action_for_key("x"), None);
    }

    #[test]
    fn keys_for_lists_every_bound_key() {
        let bindings = KeyBindings::default();
        let keys: Vec<_> = bindings.keys_for(InputAction::Guess(Blue)).collect();
        assert_eq!(keys, ["4", "l"]);
    }

    #[test]
    fn bindings_load_from_json_table() {
        let bindings: KeyBindings =
            serde_json::from_str(r#"{"q": {"guess": "red"}, "enter": "restart"}"#).unwrap();

        assert_eq!(bindings.action_for_key("Q"), Some(InputAction::Guess(Red)));
        assert_eq!(bindings.action_for_key("Enter"), Some(InputAction::Restart));
        assert_eq!(bindings.action_for_key("1"), None);
    }

    #[test]
    fn restart_key_only_works_after_game_over() {
        let mut controller = RoundController::new(
            GameConfig::classic(),
            ScriptedSequenceGenerator::new([Red, Green]),
        );
        let tag = controller.start_match();
        controller.make_presentation(tag).unwrap();
        let bindings = KeyBindings::default();
        let restart = bindings.action_for_key(" ").unwrap();

        assert_eq!(controller.dispatch(restart), Err(GameError::NotOver));

        let wrong = bindings.action_for_key("l").unwrap();
        assert_eq!(
            controller.dispatch(wrong),
            Ok(InputOutcome::Guessed(GuessOutcome::Wrong))
        );

        let outcome = controller.dispatch(restart).unwrap();
        assert_eq!(outcome.started_round(), Some(controller.tag()));
        assert!(!controller.game().game_over);
    }

    #[test]
    fn each_key_press_evaluates_exactly_one_guess() {
        let mut controller = RoundController::new(
            GameConfig::new(3, PresentationTiming::classic()),
            ScriptedSequenceGenerator::new([Yellow, Yellow, Green]),
        );
        let tag = controller.start_match();
        controller.make_presentation(tag).unwrap();
        let bindings = KeyBindings::default();

        for key in ["3", "j"] {
            let action = bindings.action_for_key(key).unwrap();
            assert_eq!(
                controller.dispatch(action),
                Ok(InputOutcome::Guessed(GuessOutcome::Correct))
            );
        }
        assert_eq!(controller.current_match().guessed(), [Yellow, Yellow]);
    }
}
