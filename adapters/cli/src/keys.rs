use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::Deserialize;
use tilt_2048_core::{Command, Direction};

/// Player intent behind a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Tilt(Direction),
    TogglePause,
    Restart,
    Quit,
}

impl Action {
    /// World command carrying out the action. Quitting never reaches the world.
    pub(crate) fn command(self) -> Option<Command> {
        match self {
            Self::Tilt(direction) => Some(Command::Tilt { direction }),
            Self::TogglePause => Some(Command::TogglePause),
            Self::Restart => Some(Command::Start),
            Self::Quit => None,
        }
    }
}

/// Keys bound to each action, configurable from the TOML file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct KeyBindings {
    pub(crate) left: char,
    pub(crate) up: char,
    pub(crate) right: char,
    pub(crate) down: char,
    pub(crate) pause: char,
    pub(crate) restart: char,
    pub(crate) quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: 'a',
            up: 'w',
            right: 'd',
            down: 's',
            pause: 'p',
            restart: 'r',
            quit: 'q',
        }
    }
}

impl KeyBindings {
    fn bindings(&self) -> [(char, Action); 7] {
        [
            (self.left, Action::Tilt(Direction::Left)),
            (self.up, Action::Tilt(Direction::Up)),
            (self.right, Action::Tilt(Direction::Right)),
            (self.down, Action::Tilt(Direction::Down)),
            (self.pause, Action::TogglePause),
            (self.restart, Action::Restart),
            (self.quit, Action::Quit),
        ]
    }

    /// Rejects bindings where one key would trigger two actions.
    pub(crate) fn validate(&self) -> Result<()> {
        let mut seen: HashMap<char, Action> = HashMap::new();
        for (key, action) in self.bindings() {
            if let Some(previous) = seen.insert(key.to_ascii_lowercase(), action) {
                bail!("key {key:?} is bound to both {previous:?} and {action:?}");
            }
        }
        Ok(())
    }

    /// Action bound to `key`, ignoring ASCII case.
    pub(crate) fn action_for(&self, key: char) -> Option<Action> {
        self.bindings()
            .into_iter()
            .find(|(bound, _)| bound.eq_ignore_ascii_case(&key))
            .map(|(_, action)| action)
    }

    /// One-line reminder of the bindings.
    pub(crate) fn help(&self) -> String {
        format!(
            "tilt: {}/{}/{}/{} (left/up/right/down), pause: {}, restart: {}, quit: {}",
            self.left, self.up, self.right, self.down, self.pause, self.restart, self.quit
        )
    }
}
