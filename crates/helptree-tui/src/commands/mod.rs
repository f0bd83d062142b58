// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    // Toggle the keybinding popup
    Help,
    // Change theme
    Theme(String),
    // Switch between tree and list view
    View,
    Expand,
    Collapse,
    // Show or hide the tree pane
    Pane,
    // Jump to a page, given with or without the id suffix
    Goto(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "view" => Ok(Command::View),
            "expand" => Ok(Command::Expand),
            "collapse" => Ok(Command::Collapse),
            "pane" => Ok(Command::Pane),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "goto" => {
                if rest.is_empty() {
                    Err("usage: goto <page>".to_string())
                } else {
                    Ok(Command::Goto(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => s.theme = Theme::by_name(&name),
        Command::View => s.coordinator.toggle_view(),
        Command::Expand => s.coordinator.expand_all(),
        Command::Collapse => s.coordinator.collapse_all(),
        Command::Pane => s.show_tree = !s.show_tree,
        Command::Goto(page) => {
            let id = if page.ends_with(helptree_core::types::ID_SUFFIX) {
                page
            } else {
                helptree_core::types::page_id(&page)
            };
            s.coordinator.on_navigate(&id);
            s.docs.reset();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
