//! Docs pane: the right-hand panel describing the current node.
//!
//! Shows the bundle header, the selected command, its docs target and its
//! subcommands, with the bundle footer at the bottom. Subcommands act as
//! links: `Enter` on one produces a navigation path the app hands to the
//! coordinator, the way a link click inside the docs page would.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use helptree_core::CatalogNode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DocsPaneState {
    /// Index into the current node's children.
    pub cursor: usize,
}

impl DocsPaneState {
    /// Reset the link cursor, e.g. after the current node changed.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Handle a key event while the docs pane is focused. Returns the
    /// navigation path (`<docs_dir>/<id>`) when a link is followed.
    pub fn handle(
        &mut self,
        event: &AppEvent,
        node: Option<&CatalogNode>,
        docs_dir: &str,
    ) -> Option<String> {
        let links = node.map_or(&[][..], |n| n.children.as_slice());
        match event {
            AppEvent::TreeNav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            AppEvent::TreeNav(Direction::Down) => {
                if self.cursor + 1 < links.len() {
                    self.cursor += 1;
                }
                None
            }
            AppEvent::Enter => {
                let target = links.get(self.cursor)?;
                tracing::debug!(node = %target.id, "docs: follow link");
                self.reset();
                Some(format!("{docs_dir}/{}", target.id))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct DocsPane<'a> {
    state: &'a DocsPaneState,
    header: &'a str,
    footer: &'a str,
    node: Option<&'a CatalogNode>,
    current_id: &'a str,
    target: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DocsPane<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        state: &'a DocsPaneState,
        header: &'a str,
        footer: &'a str,
        node: Option<&'a CatalogNode>,
        current_id: &'a str,
        target: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, header, footer, node, current_id, target, focused, theme }
    }
}

impl Widget for DocsPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title("Docs").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [header_area, body_area, links_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        Paragraph::new(Line::from(Span::styled(self.header, self.theme.docs_header)))
            .wrap(Wrap { trim: true })
            .render(header_area, buf);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let body = match self.node {
            Some(node) => vec![
                Line::from(Span::styled(node.text.as_str(), bold)),
                Line::from(node.command_phrase()),
                Line::from(Span::styled(self.target, self.theme.docs_target)),
            ],
            None => vec![
                Line::from(Span::styled(format!("No such command: {}", self.current_id), bold)),
                Line::from(Span::styled(self.target, self.theme.docs_target)),
            ],
        };
        Paragraph::new(body).render(body_area, buf);

        let children = self.node.map_or(&[][..], |n| n.children.as_slice());
        if !children.is_empty() {
            let items: Vec<ListItem> = children
                .iter()
                .map(|c| {
                    let style = if c.is_leaf() { self.theme.tree_leaf } else { self.theme.tree_branch };
                    ListItem::new(Line::from(Span::styled(format!("  {}", c.text), style)))
                })
                .collect();
            let list = List::new(items)
                .block(Block::new().title("Subcommands"))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let selected = self.focused.then_some(self.state.cursor);
            let mut list_state = ListState::default().with_selected(selected);
            StatefulWidget::render(list, links_area, buf, &mut list_state);
        }

        Paragraph::new(Line::from(Span::styled(self.footer, self.theme.docs_footer)))
            .wrap(Wrap { trim: true })
            .render(footer_area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
