//! Key-input set and logical action bindings

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical roles the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Jump,
    Left,
    Right,
}

/// Physical keys currently held, by DOM `KeyboardEvent.code`
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    held: HashSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, code: &str) {
        self.held.insert(code.to_owned());
    }

    pub fn release(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Forget everything held (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Physical codes bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let codes = |list: &[&str]| -> Vec<String> { list.iter().map(|c| c.to_string()).collect() };
        Self {
            jump: codes(&["Space", "ArrowUp", "KeyW"]),
            left: codes(&["ArrowLeft", "KeyA"]),
            right: codes(&["ArrowRight", "KeyD"]),
        }
    }
}

impl KeyBindings {
    pub fn codes(&self, action: Action) -> &[String] {
        match action {
            Action::Jump => &self.jump,
            Action::Left => &self.left,
            Action::Right => &self.right,
        }
    }

    /// Whether any code bound to `action` is held
    pub fn is_active(&self, action: Action, keys: &KeySet) -> bool {
        self.codes(action).iter().any(|code| keys.is_held(code))
    }

    /// Snapshot the held keys into one step's input
    pub fn sample(&self, keys: &KeySet) -> TickInput {
        TickInput {
            jump: self.is_active(Action::Jump, keys),
            left: self.is_active(Action::Left, keys),
            right: self.is_active(Action::Right, keys),
        }
    }
}

/// Input for a single simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub left: bool,
    pub right: bool,
}
