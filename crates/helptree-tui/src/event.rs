//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! Build a [`Keymap`] from the `[keybindings]` config section once, then call
//! [`Keymap::to_app_event`] (or [`Keymap::to_app_event_insert`] while a text
//! input has focus) on every [`crossterm::event::Event`].
//!
//! # Default keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `QueryFocus`               |
//! | `v`                     | `ToggleView`               |
//! | `E`                     | `ExpandAll`                |
//! | `C`                     | `CollapseAll`              |
//! | `t`                     | `TogglePane`               |
//! | `?`                     | `Help`                     |
//! | `:`                     | `CommandMode`              |
//! | `↑` / `k`               | `TreeNav(Up)`              |
//! | `↓` / `j`               | `TreeNav(Down)`            |
//! | `←` / `h`               | `TreeNav(Left)`            |
//! | `→` / `l`               | `TreeNav(Right)`           |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the search bar or command bar is focused, every printable character
//! is forwarded as `Char`. Only `Ctrl+c`, `Escape`, `Enter`, `Tab`,
//! `Backspace` and the arrow keys keep their special meaning.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use helptree_core::config::KeybindingsConfig;

/// Cardinal direction for tree navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Transfer focus to the search bar.
    QueryFocus,
    /// Switch between tree and list view.
    ToggleView,
    ExpandAll,
    CollapseAll,
    /// Show or hide the tree pane.
    TogglePane,
    /// Toggle the keybinding popup.
    Help,
    /// Open the `:` command bar.
    CommandMode,
    TreeNav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    /// Confirm the active input or select the node under the cursor.
    Enter,
    Resize(u16, u16),
    /// Dismiss the active modal (search focus, help popup, command bar).
    Escape,
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// Configurable normal-mode shortcuts, resolved from `[keybindings]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    toggle_focus: KeyCode,
    query_focus: KeyCode,
    toggle_view: KeyCode,
    expand_all: KeyCode,
    collapse_all: KeyCode,
    toggle_pane: KeyCode,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

impl Keymap {
    /// Resolve binding names. Unparseable names keep the built-in default.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let resolve = |name: &str, fallback: KeyCode| {
            parse_key(name).unwrap_or_else(|| {
                tracing::warn!(binding = %name, "unrecognised key binding, using default");
                fallback
            })
        };
        Self {
            toggle_focus: resolve(&cfg.toggle_focus, KeyCode::Tab),
            query_focus: resolve(&cfg.query_focus, KeyCode::Char('/')),
            toggle_view: resolve(&cfg.toggle_view, KeyCode::Char('v')),
            expand_all: resolve(&cfg.expand_all, KeyCode::Char('E')),
            collapse_all: resolve(&cfg.collapse_all, KeyCode::Char('C')),
            toggle_pane: resolve(&cfg.toggle_pane, KeyCode::Char('t')),
        }
    }

    /// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
    ///
    /// Returns `None` for mouse events, key releases and unbound keys.
    pub fn to_app_event(&self, event: Event) -> Option<AppEvent> {
        match event {
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Key(key) => self.map_key(key),
            _ => None,
        }
    }

    /// Map a raw crossterm [`Event`] for text-input ("insert") mode.
    pub fn to_app_event_insert(&self, event: Event) -> Option<AppEvent> {
        match event {
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Key(key) => map_key_insert(key),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<AppEvent> {
        use KeyCode::*;
        use KeyModifiers as Mod;

        // Uppercase letters may or may not carry SHIFT depending on the terminal.
        let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;

        if plain {
            let configured = [
                (self.toggle_focus, AppEvent::FocusNext),
                (self.query_focus, AppEvent::QueryFocus),
                (self.toggle_view, AppEvent::ToggleView),
                (self.expand_all, AppEvent::ExpandAll),
                (self.collapse_all, AppEvent::CollapseAll),
                (self.toggle_pane, AppEvent::TogglePane),
            ];
            if let Some((_, ev)) = configured.into_iter().find(|(code, _)| *code == key.code) {
                return Some(ev);
            }
        }

        match key.code {
            Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
            Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
            Char('?') if plain => Some(AppEvent::Help),
            Char(':') if plain => Some(AppEvent::CommandMode),

            Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::TreeNav(Direction::Up)),
            Down | Char('j') if key.modifiers == Mod::NONE => {
                Some(AppEvent::TreeNav(Direction::Down))
            }
            Left | Char('h') if key.modifiers == Mod::NONE => {
                Some(AppEvent::TreeNav(Direction::Left))
            }
            Right | Char('l') if key.modifiers == Mod::NONE => {
                Some(AppEvent::TreeNav(Direction::Right))
            }

            Char(c) if plain => Some(AppEvent::Char(c)),

            Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
            Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
            Esc => Some(AppEvent::Escape),

            _ => None,
        }
    }
}

/// Key mapping for text-input / insert mode.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::TreeNav(Direction::Up)),
        Down => Some(AppEvent::TreeNav(Direction::Down)),
        Left => Some(AppEvent::TreeNav(Direction::Left)),
        Right => Some(AppEvent::TreeNav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// `"Tab"`, `"Enter"`, `"Esc"`, `"Space"`, or a single character.
fn parse_key(name: &str) -> Option<KeyCode> {
    match name {
        "Tab" => Some(KeyCode::Tab),
        "Enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" => Some(KeyCode::Esc),
        "Space" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
