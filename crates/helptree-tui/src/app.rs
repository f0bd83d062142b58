//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. The search coordinator is
//! ticked on every loop iteration so debounced searches fire without a
//! separate timer thread.

use crate::{
    commands::execute_command,
    event::{AppEvent, Keymap},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarOutcome, CommandBarState},
        command_tree::{CommandTree, CommandTreeState},
        docs_pane::{DocsPane, DocsPaneState},
        help::HelpPopup,
        search_bar::{SearchBar, SearchBarState},
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use helptree_core::{
    config::Config, CoordinatorOptions, HelpBundle, SearchCoordinator, StartupParams,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Docs,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub coordinator: SearchCoordinator<CommandTreeState>,
    pub search: SearchBarState,
    pub docs: DocsPaneState,
    pub command_bar: CommandBarState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub keymap: Keymap,
    pub config: Config,
    pub show_help: bool,
    pub show_tree: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(bundle: HelpBundle, config: Config, startup: StartupParams) -> Self {
        let mut coordinator = SearchCoordinator::new(
            bundle,
            CommandTreeState::new(),
            CoordinatorOptions::from(&config),
            startup,
        );
        coordinator.attach();

        Self {
            coordinator,
            search: SearchBarState::default(),
            docs: DocsPaneState::default(),
            command_bar: CommandBarState::default(),
            focus: Focus::Tree,
            prev_focus: Focus::Tree,
            theme: Theme::by_name(&config.ui.theme),
            keymap: Keymap::from_config(&config.keybindings),
            config,
            show_help: false,
            show_tree: true,
            quit: false,
        }
    }

    /// Whether the focused widget takes free text.
    pub fn is_insert_mode(&self) -> bool {
        matches!(self.focus, Focus::Search | Focus::Command)
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Help | AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match self.command_bar.handle(&event) {
                CommandBarOutcome::Editing => {}
                CommandBarOutcome::Cancelled => self.focus = self.prev_focus,
                CommandBarOutcome::Run(cmd) => {
                    self.focus = self.prev_focus;
                    execute_command(self, cmd);
                    if !self.show_tree && self.focus == Focus::Tree {
                        self.focus = Focus::Docs;
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Help => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::CommandMode => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Escape | AppEvent::Enter if self.focus == Focus::Search => {
                tracing::debug!("focus: Search -> Tree");
                self.focus = if self.show_tree { Focus::Tree } else { Focus::Docs };
            }

            // Tab-cycle focus: Tree → Docs → Search → Tree
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Tree => Focus::Docs,
                    Focus::Docs => Focus::Search,
                    Focus::Search | Focus::Command if self.show_tree => Focus::Tree,
                    Focus::Search | Focus::Command => Focus::Docs,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            AppEvent::ToggleView => self.coordinator.toggle_view(),
            AppEvent::ExpandAll => self.coordinator.expand_all(),
            AppEvent::CollapseAll => self.coordinator.collapse_all(),

            AppEvent::TogglePane => {
                self.show_tree = !self.show_tree;
                tracing::debug!(show_tree = self.show_tree, "tree pane toggled");
                if !self.show_tree && self.focus == Focus::Tree {
                    self.focus = Focus::Docs;
                }
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Tree => {
                if let Some(id) = self.coordinator.view_mut().handle(&event) {
                    self.coordinator.on_selected(&id);
                    self.docs.reset();
                }
            }
            Focus::Docs => {
                let nav = self.docs.handle(
                    &event,
                    self.coordinator.current_node(),
                    &self.config.ui.docs_dir,
                );
                if let Some(path) = nav {
                    self.coordinator.on_navigate(&path);
                }
            }
            Focus::Search => {
                if let Some(query) = self.search.handle(&event) {
                    self.coordinator.on_input(query);
                }
            }
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(bundle: HelpBundle, config: Config, startup: StartupParams) -> Self {
        App { state: AppState::new(bundle, config, startup) }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.coordinator.tick();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                // Use insert-mode mapping when a text widget is focused
                let app_event = if self.state.is_insert_mode() {
                    self.state.keymap.to_app_event_insert(raw)
                } else {
                    self.state.keymap.to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::trace!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: body | 3-line search bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(3)])
        .split(area);

    let (tree_area, docs_area) = if state.show_tree {
        let pct = state.config.ui.tree_pane_width_pct.min(100);
        let horiz = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
            .split(vert[0]);
        (Some(horiz[0]), horiz[1])
    } else {
        (None, vert[0])
    };

    let c = &state.coordinator;

    if let Some(tree_area) = tree_area {
        let title = c.mode().to_string();
        frame.render_widget(
            CommandTree::new(c.view(), &title, state.focus == Focus::Tree, &state.theme),
            tree_area,
        );
    }

    let target = c.doc_target();
    frame.render_widget(
        DocsPane::new(
            &state.docs,
            c.header(),
            c.footer(),
            c.current_node(),
            c.current_node_id(),
            &target,
            state.focus == Focus::Docs,
            &state.theme,
        ),
        docs_area,
    );

    let label = c.toggle_label();
    let search = SearchBar::new(
        &state.search,
        &label,
        c.is_search_pending(),
        state.focus == Focus::Search,
        &state.theme,
    );
    let cursor = search.cursor_position(vert[1]);
    frame.render_widget(search, vert[1]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.config.keybindings, &state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Search {
        frame.set_cursor_position(cursor);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::Direction;
    use helptree_core::{AliasTable, Catalog, CatalogNode, ViewMode};
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    pub(crate) fn app_state() -> AppState {
        let tree = vec![CatalogNode::new("zowe.html", "zowe").with_children(vec![
            CatalogNode::new("zos-jobs.html", "zos-jobs").with_children(vec![
                CatalogNode::new("zos-jobs_list.html", "list"),
                CatalogNode::new("zos-jobs_submit.html", "submit"),
            ]),
            CatalogNode::new("config.html", "config"),
        ])];
        let bundle = HelpBundle {
            header: "Zowe CLI Help".into(),
            footer: "footer text".into(),
            aliases: [("ls", vec!["list"])].into_iter().collect::<AliasTable>(),
            catalog: Catalog::new(tree).unwrap(),
        };
        AppState::new(bundle, Config::defaults(), StartupParams::default())
    }

    #[test]
    fn starts_on_root_expanded() {
        let s = app_state();
        assert_eq!(s.coordinator.current_node_id(), "zowe.html");
        assert_eq!(s.coordinator.view().selected(), Some("zowe.html"));
        assert_eq!(s.coordinator.view().visible().len(), 3);
    }

    #[test]
    fn tree_enter_updates_current_node() {
        let mut s = app_state();
        s.handle(AppEvent::TreeNav(Direction::Down));
        s.handle(AppEvent::Enter);
        assert_eq!(s.coordinator.current_node_id(), "zos-jobs.html");
        assert_eq!(s.coordinator.doc_target(), "cmd_docs/zos-jobs.html?e=1");
    }

    #[test]
    fn docs_link_navigates_and_selects() {
        let mut s = app_state();
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Docs);
        s.handle(AppEvent::Enter);
        assert_eq!(s.coordinator.current_node_id(), "zos-jobs.html");
        assert_eq!(s.coordinator.view().selected(), Some("zos-jobs.html"));
    }

    #[tokio::test(start_paused = true)]
    async fn typing_runs_one_debounced_search() {
        let mut s = app_state();
        s.handle(AppEvent::QueryFocus);
        for c in "ls".chars() {
            s.handle(AppEvent::Char(c));
        }
        assert!(!s.coordinator.tick());
        tokio::time::advance(Duration::from_millis(250)).await;
        assert!(s.coordinator.tick());
        assert_eq!(s.coordinator.searches_run(), 1);
        assert!(s.coordinator.view().is_match("zos-jobs_list.html"));
    }

    #[test]
    fn command_bar_runs_view_toggle() {
        let mut s = app_state();
        s.handle(AppEvent::CommandMode);
        assert!(s.is_insert_mode());
        for c in "view".chars() {
            s.handle(AppEvent::Char(c));
        }
        s.handle(AppEvent::Enter);
        assert_eq!(s.focus, Focus::Tree);
        assert_eq!(s.coordinator.mode(), ViewMode::Flattened);
        assert_eq!(s.coordinator.toggle_label(), "Switch to Tree View");
    }

    #[test]
    fn hiding_tree_moves_focus_to_docs() {
        let mut s = app_state();
        s.handle(AppEvent::TogglePane);
        assert!(!s.show_tree);
        assert_eq!(s.focus, Focus::Docs);
        s.handle(AppEvent::FocusNext);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Docs);
    }

    #[test]
    fn help_popup_swallows_keys() {
        let mut s = app_state();
        s.handle(AppEvent::Help);
        s.handle(AppEvent::ToggleView);
        assert_eq!(s.coordinator.mode(), ViewMode::Nested);
        s.handle(AppEvent::Escape);
        assert!(!s.show_help);
    }

    #[test]
    fn draw_renders_all_panes() {
        let s = app_state();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &s)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Tree View"));
        assert!(text.contains("Switch to List View"));
        assert!(text.contains("Zowe CLI Help"));
    }
}
