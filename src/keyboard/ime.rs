use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::keyboard::hangul::HangulComposer;

/// Text-entry events in the order a platform input method emits them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImeEvent {
    CompositionStart,
    Change { value: String, composing: bool },
    CompositionEnd { value: String },
}

/// A source of text-entry events driven by terminal key presses.
pub trait TextInput {
    fn key(&mut self, key: char) -> Vec<ImeEvent>;
    /// Finishes any pending composition (Space/Enter).
    fn commit(&mut self) -> Vec<ImeEvent>;
    fn backspace(&mut self) -> Vec<ImeEvent>;
    /// Empties the field under a live composition: committed text goes, the
    /// pre-edit stays and is re-announced.
    fn clear_committed(&mut self) -> Vec<ImeEvent>;
    /// Clears the field without emitting events.
    fn reset(&mut self);
    fn value(&self) -> String;
    fn is_composing(&self) -> bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImeMode {
    /// Latin keys are composed into Hangul by [`HangulComposer`].
    #[default]
    Builtin,
    /// Characters arrive already committed by the terminal's own IME.
    System,
}

impl ImeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ImeMode::Builtin => "builtin",
            ImeMode::System => "system",
        }
    }

    pub fn text_input(self) -> Box<dyn TextInput> {
        match self {
            ImeMode::Builtin => Box::new(HangulComposer::new()),
            ImeMode::System => Box::new(PlainInput::default()),
        }
    }
}

impl fmt::Display for ImeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "builtin" => Ok(ImeMode::Builtin),
            "system" => Ok(ImeMode::System),
            other => Err(format!("unknown input mode '{other}' (expected builtin or system)")),
        }
    }
}

/// Every key press is a committed change; nothing is ever composing.
#[derive(Clone, Debug, Default)]
pub struct PlainInput {
    value: String,
}

impl TextInput for PlainInput {
    fn key(&mut self, key: char) -> Vec<ImeEvent> {
        self.value.push(key);
        vec![ImeEvent::Change {
            value: self.value.clone(),
            composing: false,
        }]
    }

    fn commit(&mut self) -> Vec<ImeEvent> {
        Vec::new()
    }

    fn backspace(&mut self) -> Vec<ImeEvent> {
        if self.value.pop().is_none() {
            return Vec::new();
        }
        vec![ImeEvent::Change {
            value: self.value.clone(),
            composing: false,
        }]
    }

    fn clear_committed(&mut self) -> Vec<ImeEvent> {
        self.value.clear();
        Vec::new()
    }

    fn reset(&mut self) {
        self.value.clear();
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn is_composing(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_input_commits_every_key() {
        let mut input = PlainInput::default();
        input.key('학');
        let events = input.key('교');
        assert_eq!(
            events,
            vec![ImeEvent::Change {
                value: "학교".to_string(),
                composing: false
            }]
        );
        assert!(input.commit().is_empty());
    }

    #[test]
    fn ime_mode_parses_case_insensitively() {
        assert_eq!("System".parse::<ImeMode>(), Ok(ImeMode::System));
        assert_eq!("builtin".parse::<ImeMode>(), Ok(ImeMode::Builtin));
        assert!("telex".parse::<ImeMode>().is_err());
    }

    #[test]
    fn builtin_mode_composes() {
        let mut input = ImeMode::Builtin.text_input();
        for key in "gk".chars() {
            input.key(key);
        }
        assert!(input.is_composing());
        assert_eq!(input.value(), "하");
    }
}
