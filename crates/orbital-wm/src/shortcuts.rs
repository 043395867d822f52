//! Keyboard shortcuts
//!
//! Key chords are matched against DOM `KeyboardEvent.key` values. Escape is
//! not a shortcut: the engine routes it to the active interaction first and
//! only falls back to the registry when nothing is in progress.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{WmError, WmResult};
use crate::snap::SnapZone;
use crate::window::WindowId;

/// A key plus modifier state
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    /// Normalized key name (single characters are lowercased)
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyChord {
    /// A chord with no modifiers
    pub fn key(key: &str) -> Self {
        Self {
            key: normalize_key(key),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Parse a chord such as `"Alt+F4"` or `"meta+left"`
    pub fn parse(chord: &str) -> WmResult<Self> {
        let invalid = || WmError::InvalidKeyChord(chord.to_string());

        let mut parsed = KeyChord::key("");
        let mut key = None;
        for part in chord.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "" => return Err(invalid()),
                "ctrl" | "control" => parsed.ctrl = true,
                "alt" | "option" => parsed.alt = true,
                "shift" => parsed.shift = true,
                "meta" | "super" | "cmd" | "win" => parsed.meta = true,
                _ if key.is_some() => return Err(invalid()),
                _ => key = Some(part),
            }
        }

        parsed.key = normalize_key(key.ok_or_else(invalid)?);
        Ok(parsed)
    }

    #[inline]
    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

impl FromStr for KeyChord {
    type Err = WmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.meta {
            write!(f, "Meta+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Map short arrow names to their DOM values and lowercase single characters
fn normalize_key(key: &str) -> String {
    match key.to_ascii_lowercase().as_str() {
        "up" | "arrowup" => "ArrowUp".to_string(),
        "down" | "arrowdown" => "ArrowDown".to_string(),
        "left" | "arrowleft" => "ArrowLeft".to_string(),
        "right" | "arrowright" => "ArrowRight".to_string(),
        "esc" | "escape" => "Escape".to_string(),
        "tab" => "Tab".to_string(),
        lower if key.chars().count() == 1 => lower.to_string(),
        _ => key.to_string(),
    }
}

/// A window manager action a shortcut can trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WmCommand {
    CloseFocused,
    MinimizeFocused,
    ToggleMaximizeFocused,
    FocusNext,
    FocusPrevious,
    SnapFocused { zone: SnapZone },
    Focus { id: WindowId },
    Close { id: WindowId },
}

/// Key chord to command bindings
#[derive(Clone, Debug)]
pub struct ShortcutRegistry {
    bindings: HashMap<KeyChord, WmCommand>,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ShortcutRegistry {
    /// Registry with no bindings
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Registry with the standard desktop bindings
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(KeyChord::key("F4").with_alt(), WmCommand::CloseFocused);
        registry.register(KeyChord::key("Tab").with_alt(), WmCommand::FocusNext);
        registry.register(
            KeyChord::key("Tab").with_alt().with_shift(),
            WmCommand::FocusPrevious,
        );
        registry.register(
            KeyChord::key("ArrowUp").with_meta(),
            WmCommand::ToggleMaximizeFocused,
        );
        registry.register(KeyChord::key("ArrowDown").with_meta(), WmCommand::MinimizeFocused);
        registry.register(
            KeyChord::key("ArrowLeft").with_meta(),
            WmCommand::SnapFocused {
                zone: SnapZone::Left,
            },
        );
        registry.register(
            KeyChord::key("ArrowRight").with_meta(),
            WmCommand::SnapFocused {
                zone: SnapZone::Right,
            },
        );
        registry
    }

    /// Bind `chord`, returning the command it replaced
    pub fn register(&mut self, chord: KeyChord, command: WmCommand) -> Option<WmCommand> {
        self.bindings.insert(chord, command)
    }

    /// Bind a chord given as a string such as `"Ctrl+Alt+W"`
    pub fn register_str(&mut self, chord: &str, command: WmCommand) -> WmResult<Option<WmCommand>> {
        Ok(self.register(KeyChord::parse(chord)?, command))
    }

    /// Remove the binding for `chord`
    pub fn unregister(&mut self, chord: &KeyChord) -> Option<WmCommand> {
        self.bindings.remove(chord)
    }

    /// Command bound to `chord`, if any
    pub fn resolve(&self, chord: &KeyChord) -> Option<WmCommand> {
        self.bindings.get(chord).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chords() {
        let chord = KeyChord::parse("Alt+F4").unwrap();
        assert!(chord.alt && !chord.ctrl && !chord.shift && !chord.meta);
        assert_eq!(chord.key, "F4");

        let chord: KeyChord = "ctrl + shift + W".parse().unwrap();
        assert!(chord.ctrl && chord.shift);
        assert_eq!(chord.key, "w");

        assert_eq!(KeyChord::parse("meta+left").unwrap().key, "ArrowLeft");
        assert!(KeyChord::parse("esc").unwrap().is_escape());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "Alt+", "Ctrl+Shift", "A+B", "Alt++F4"] {
            assert!(
                matches!(KeyChord::parse(bad), Err(WmError::InvalidKeyChord(_))),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trips() {
        let chord = KeyChord::key("Tab").with_alt().with_shift();
        assert_eq!(chord.to_string(), "Alt+Shift+Tab");
        assert_eq!(KeyChord::parse(&chord.to_string()).unwrap(), chord);
    }

    #[test]
    fn test_default_bindings() {
        let registry = ShortcutRegistry::default();
        assert_eq!(
            registry.resolve(&KeyChord::parse("Alt+F4").unwrap()),
            Some(WmCommand::CloseFocused)
        );
        assert_eq!(
            registry.resolve(&KeyChord::parse("Alt+Shift+Tab").unwrap()),
            Some(WmCommand::FocusPrevious)
        );
        assert_eq!(
            registry.resolve(&KeyChord::parse("Meta+Right").unwrap()),
            Some(WmCommand::SnapFocused {
                zone: SnapZone::Right
            })
        );
        assert_eq!(registry.resolve(&KeyChord::key("F4")), None);
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = ShortcutRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.register_str("Ctrl+Q", WmCommand::CloseFocused).unwrap(),
            None
        );
        assert_eq!(
            registry.register_str("ctrl+q", WmCommand::MinimizeFocused).unwrap(),
            Some(WmCommand::CloseFocused)
        );
        let chord = KeyChord::key("Q").with_ctrl();
        assert_eq!(registry.resolve(&chord), Some(WmCommand::MinimizeFocused));
        assert_eq!(registry.unregister(&chord), Some(WmCommand::MinimizeFocused));
        assert_eq!(registry.resolve(&chord), None);
        assert!(registry.register_str("Ctrl+", WmCommand::CloseFocused).is_err());
    }
}
