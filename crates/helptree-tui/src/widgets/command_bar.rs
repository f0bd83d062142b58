//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` outside the search bar. Displays a `:` prefix
//! followed by the typed command. `Enter` parses the command; `Escape`
//! cancels.
//!
//! # Supported commands
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `view` | Switch between tree and list view |
//! | `expand`, `collapse` | Expand or collapse every node |
//! | `pane` | Show or hide the tree pane |
//! | `goto <page>` | Jump to a page, e.g. `goto zos-jobs_list` |

use crate::commands::Command;
use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::search_bar::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// What the app shell should do after the command bar handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandBarOutcome {
    /// Keep the bar open.
    Editing,
    /// Close the bar without acting.
    Cancelled,
    /// Close the bar and run the command.
    Run(Command),
}

/// Persistent state for the command bar.
#[derive(Debug, Default)]
pub struct CommandBarState {
    pub input: LineInput,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    /// Handle a key event while the command bar is focused.
    pub fn handle(&mut self, event: &AppEvent) -> CommandBarOutcome {
        // Any keypress dismisses the error display so the user can edit again.
        self.error = None;

        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.clear();
                CommandBarOutcome::Cancelled
            }
            AppEvent::Enter => match Command::parse(&self.input.text) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "command parsed");
                    self.clear();
                    CommandBarOutcome::Run(cmd)
                }
                Err(msg) if msg.is_empty() => {
                    self.clear();
                    CommandBarOutcome::Cancelled
                }
                Err(msg) => {
                    tracing::debug!(error = %msg, "command rejected");
                    self.error = Some(msg);
                    CommandBarOutcome::Editing
                }
            },
            other => {
                self.input.edit(other);
                CommandBarOutcome::Editing
            }
        }
    }

    /// Absolute terminal column of the text cursor within `area`.
    ///
    /// The `:` glyph occupies column 0, so the cursor starts at column 1.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.column()).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay.
///
/// The caller passes a 1-row `Rect` at the bottom of the terminal.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(
                format!("E  {err}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::raw(self.state.input.text.as_str()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
