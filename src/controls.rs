//! Player actions and key bindings
//!
//! Bindings map each action to a key name (as reported by whatever input
//! backend drives the game). They serialize to the `keys.json` layout:
//! `{ "player1": { "left": "a", ... }, "player2": { ... } }`.

use serde::{Deserialize, Serialize};

use crate::sim::{HeroInput, Side};

/// The fixed action set every player has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    AimUp,
    AimDown,
    Throw,
    Hook,
    Jump,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Left,
        Action::Right,
        Action::AimUp,
        Action::AimDown,
        Action::Throw,
        Action::Hook,
        Action::Jump,
    ];

    /// Name used in the bindings file
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::AimUp => "up",
            Action::AimDown => "down",
            Action::Throw => "throw",
            Action::Hook => "sling",
            Action::Jump => "jump",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "up" | "aim_up" => Some(Action::AimUp),
            "down" | "aim_down" => Some(Action::AimDown),
            "throw" => Some(Action::Throw),
            "sling" | "hook" => Some(Action::Hook),
            "jump" | "pull" => Some(Action::Jump),
            _ => None,
        }
    }

    /// Human readable label for menus
    pub fn label(&self) -> &'static str {
        match self {
            Action::Left => "Move Left",
            Action::Right => "Move Right",
            Action::AimUp => "Aim Up",
            Action::AimDown => "Aim Down",
            Action::Throw => "Throw Banana",
            Action::Hook => "Grappling Hook",
            Action::Jump => "Jump / Pull",
        }
    }
}

/// One player's action → key name map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left: String,
    pub right: String,
    #[serde(rename = "up")]
    pub aim_up: String,
    #[serde(rename = "down")]
    pub aim_down: String,
    pub throw: String,
    #[serde(rename = "sling")]
    pub hook: String,
    pub jump: String,
}

impl KeyBindings {
    pub fn player1() -> Self {
        Self {
            left: "a".into(),
            right: "d".into(),
            aim_up: "w".into(),
            aim_down: "s".into(),
            throw: "left shift".into(),
            hook: "v".into(),
            jump: "space".into(),
        }
    }

    pub fn player2() -> Self {
        Self {
            left: "l".into(),
            right: "'".into(),
            aim_up: "p".into(),
            aim_down: ";".into(),
            throw: "k".into(),
            hook: "return".into(),
            jump: "right shift".into(),
        }
    }

    pub fn defaults_for(side: Side) -> Self {
        match side {
            Side::Red => Self::player1(),
            Side::Blue => Self::player2(),
        }
    }

    pub fn key(&self, action: Action) -> &str {
        match action {
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::AimUp => &self.aim_up,
            Action::AimDown => &self.aim_down,
            Action::Throw => &self.throw,
            Action::Hook => &self.hook,
            Action::Jump => &self.jump,
        }
    }

    fn key_mut(&mut self, action: Action) -> &mut String {
        match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::AimUp => &mut self.aim_up,
            Action::AimDown => &mut self.aim_down,
            Action::Throw => &mut self.throw,
            Action::Hook => &mut self.hook,
            Action::Jump => &mut self.jump,
        }
    }

    /// Rebind `action`; blank names are ignored. Returns whether it changed.
    pub fn bind(&mut self, action: Action, key: &str) -> bool {
        let key = normalize_key(key);
        if key.is_empty() || *self.key(action) == key {
            return false;
        }
        *self.key_mut(action) = key;
        true
    }

    /// First action bound to `key`
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let key = normalize_key(key);
        Action::ALL.into_iter().find(|a| self.key(*a) == key)
    }

    /// Sample the current key state into one tick of input
    pub fn input_from(&self, mut pressed: impl FnMut(&str) -> bool) -> HeroInput {
        HeroInput {
            left: pressed(&self.left),
            right: pressed(&self.right),
            aim_up: pressed(&self.aim_up),
            aim_down: pressed(&self.aim_down),
            jump: pressed(&self.jump),
            throw: pressed(&self.throw),
            hook: pressed(&self.hook),
        }
    }

    /// Lowercase every name and restore defaults for blank entries
    fn normalized(mut self, defaults: &KeyBindings) -> Self {
        for action in Action::ALL {
            let key = normalize_key(self.key(action));
            if key.is_empty() {
                log::warn!("empty binding for '{}', using default", action.as_str());
                *self.key_mut(action) = defaults.key(action).to_string();
            } else {
                *self.key_mut(action) = key;
            }
        }
        self
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Bindings for both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    #[serde(default = "KeyBindings::player1")]
    pub player1: KeyBindings,
    #[serde(default = "KeyBindings::player2")]
    pub player2: KeyBindings,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            player1: KeyBindings::player1(),
            player2: KeyBindings::player2(),
        }
    }
}

impl Controls {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let controls: Controls = serde_json::from_str(json)?;
        Ok(Self {
            player1: controls.player1.normalized(&KeyBindings::player1()),
            player2: controls.player2.normalized(&KeyBindings::player2()),
        })
    }

    /// Parse bindings, falling back to the defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            log::warn!("Failed to parse key bindings: {}", e);
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn for_side(&self, side: Side) -> &KeyBindings {
        match side {
            Side::Red => &self.player1,
            Side::Blue => &self.player2,
        }
    }

    pub fn for_side_mut(&mut self, side: Side) -> &mut KeyBindings {
        match side {
            Side::Red => &mut self.player1,
            Side::Blue => &mut self.player2,
        }
    }

    /// Both players' input for one tick
    pub fn sample(&self, mut pressed: impl FnMut(&str) -> bool) -> [HeroInput; 2] {
        [
            self.player1.input_from(&mut pressed),
            self.player2.input_from(&mut pressed),
        ]
    }
}
