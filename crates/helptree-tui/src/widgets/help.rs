//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use helptree_core::config::KeybindingsConfig;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    keys: &'a KeybindingsConfig,
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(keys: &'a KeybindingsConfig, theme: &'a Theme) -> Self {
        Self { keys, theme }
    }

    fn bindings(&self) -> Vec<(String, &'static str)> {
        let k = self.keys;
        vec![
            ("q  /  Ctrl+c".into(), "Quit"),
            (k.toggle_focus.clone(), "Cycle focus: tree → docs → search"),
            (k.query_focus.clone(), "Focus search bar"),
            ("Escape".into(), "Leave search bar / close popup"),
            ("↑ k  /  ↓ j".into(), "Move cursor"),
            ("← h  /  → l".into(), "Collapse / expand tree node"),
            ("Space".into(), "Toggle tree node"),
            ("Enter".into(), "Select node / follow subcommand"),
            (k.toggle_view.clone(), "Switch tree / list view"),
            (k.expand_all.clone(), "Expand all"),
            (k.collapse_all.clone(), "Collapse all"),
            (k.toggle_pane.clone(), "Show / hide tree pane"),
            (":".into(), "Command bar"),
            ("?".into(), "Toggle this help popup"),
        ]
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bindings = self.bindings();
        let popup = centered_rect(70, bindings.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" helptree: keybindings (? to close) ")
            .border_style(self.theme.border_focused);

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = bindings
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<22}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
