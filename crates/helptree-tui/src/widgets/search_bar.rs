//! Search bar widget: query input at the bottom of the screen, with the
//! view-toggle label on the right.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `TreeNav(Left)` / `TreeNav(Right)` move the cursor.
//!
//! Every edit is reported back to the caller so it can be forwarded to the
//! search coordinator, which debounces the actual search.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// Line editing
// ---------------------------------------------------------------------------

/// Single-line text buffer with a char-boundary-aware cursor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineInput {
    pub text: String,
    /// Byte offset of the cursor within `text`.
    pub cursor: usize,
}

impl LineInput {
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing event. Returns `true` if the text changed.
    pub fn edit(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::TreeNav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::TreeNav(Direction::Right) => {
                if self.cursor < self.text.len() {
                    self.cursor = self.text[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map_or(self.text.len(), |(i, _)| self.cursor + i);
                }
                false
            }
            _ => false,
        }
    }

    /// Number of chars before the cursor, i.e. its display column.
    pub fn column(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    pub input: LineInput,
}

impl SearchBarState {
    pub fn query(&self) -> &str {
        &self.input.text
    }

    /// Handle a key event from the app shell. Returns the new query text when
    /// the edit changed it.
    pub fn handle(&mut self, event: &AppEvent) -> Option<&str> {
        if self.input.edit(event) {
            tracing::debug!(query = %self.input.text, cursor = self.input.cursor, "search: edited");
            Some(&self.input.text)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    toggle_label: &'a str,
    pending: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(
        state: &'a SearchBarState,
        toggle_label: &'a str,
        pending: bool,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, toggle_label, pending, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let x = (area.x + 1 + self.state.input.column()).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = if self.pending { "Search …" } else { "Search" };
        let block = Block::bordered().title(title).border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let label_width = self.toggle_label.chars().count() as u16 + 2;
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(label_width)])
            .split(inner);

        let query_line = if self.state.query().is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("[{}]", self.toggle_label),
            self.theme.search_highlight,
        )))
        .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_reports_each_change() {
        let mut s = SearchBarState::default();
        assert_eq!(s.handle(&AppEvent::Char('l')), Some("l"));
        assert_eq!(s.handle(&AppEvent::Char('s')), Some("ls"));
        assert_eq!(s.handle(&AppEvent::Backspace), Some("l"));
    }

    #[test]
    fn cursor_moves_do_not_report() {
        let mut s = SearchBarState::default();
        s.handle(&AppEvent::Char('a'));
        assert_eq!(s.handle(&AppEvent::TreeNav(Direction::Left)), None);
        assert_eq!(s.input.cursor, 0);
        assert_eq!(s.handle(&AppEvent::Backspace), None);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = LineInput::default();
        for c in "zs".chars() {
            input.edit(&AppEvent::Char(c));
        }
        input.edit(&AppEvent::TreeNav(Direction::Left));
        input.edit(&AppEvent::Char('o'));
        assert_eq!(input.text, "zos");
        assert_eq!(input.column(), 2);
    }

    #[test]
    fn multibyte_chars_keep_cursor_on_boundaries() {
        let mut input = LineInput::default();
        input.edit(&AppEvent::Char('é'));
        input.edit(&AppEvent::Char('x'));
        input.edit(&AppEvent::TreeNav(Direction::Left));
        input.edit(&AppEvent::TreeNav(Direction::Left));
        assert_eq!(input.cursor, 0);
        input.edit(&AppEvent::TreeNav(Direction::Right));
        assert_eq!(input.cursor, 'é'.len_utf8());
        input.edit(&AppEvent::Backspace);
        assert_eq!(input.text, "x");
    }
}
