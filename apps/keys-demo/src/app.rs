//! Demo view state and key routing.

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;
use view_keys::{KeyBindings, KeyEvent, KeyEventType, KeyedView, KeysConfig, MemorySurface, MethodTable};

/// Selector of the search box.
pub const SEARCH_TARGET: &str = "form.search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

/// State the key handlers act on.
#[derive(Debug)]
pub struct AppState {
    pub notes: Vec<String>,
    pub selected: usize,
    pub search: String,
    pub focus: Focus,
    pub show_help: bool,
    pub saves: usize,
    pub fired: Vec<String>,
    pub quit: bool,
}

impl AppState {
    fn new() -> Self {
        let notes = [
            "Groceries",
            "Release checklist",
            "Keyboard shortcuts",
            "Meeting notes",
            "Reading list",
            "Trip planning",
        ];
        Self {
            notes: notes.iter().map(|s| s.to_string()).collect(),
            selected: 0,
            search: String::new(),
            focus: Focus::List,
            show_help: false,
            saves: 0,
            fired: Vec::new(),
            quit: false,
        }
    }

    /// Notes matching the search query.
    pub fn filtered(&self) -> Vec<&str> {
        let query = self.search.to_lowercase();
        self.notes
            .iter()
            .filter(|n| n.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    fn record(&mut self, action: &str, key: &str) {
        self.fired.push(format!("{action} ({key})"));
        if self.fired.len() > 50 {
            self.fired.remove(0);
        }
    }

    fn next(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// The demo's single view.
pub struct App {
    pub state: Rc<RefCell<AppState>>,
    keys: KeyBindings,
    /// Whether the terminal reports key releases
    release_events: bool,
}

impl App {
    pub fn new(config: KeysConfig, release_events: bool) -> anyhow::Result<Self> {
        let state = Rc::new(RefCell::new(AppState::new()));

        let mut methods = MethodTable::new();
        define(&mut methods, &state, "next", AppState::next);
        define(&mut methods, &state, "previous", AppState::previous);
        define(&mut methods, &state, "focus_search", |s| s.focus = Focus::Search);
        define(&mut methods, &state, "leave_search", |s| s.focus = Focus::List);
        define(&mut methods, &state, "save", |s| s.saves += 1);
        define(&mut methods, &state, "quit", |s| s.quit = true);
        define(&mut methods, &state, "toggle_help", |s| s.show_help = !s.show_help);

        let keys = KeyBindings::new(MemorySurface::new(), methods)
            .with_options(config.options)
            .with_keys(config.key_map()?);

        let mut app = Self {
            state,
            keys,
            release_events,
        };
        app.delegate_events()?;
        Ok(app)
    }

    pub fn should_quit(&self) -> bool {
        self.state.borrow().quit
    }

    /// Whether matching keys are currently swallowed.
    pub fn is_locked(&self) -> bool {
        self.keys.options().prevent_keyboard_action
    }

    /// Registered bindings, one line each.
    pub fn binding_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.keys.registry().iter().map(|r| r.to_string()).collect();
        lines.sort();
        lines
    }

    pub fn latch_label(&self) -> String {
        let latch = self.keys.latch();
        format!("ctrl={} alt={}", latch.ctrl_pressed, latch.alt_pressed)
    }

    /// Route a terminal key event through the view's bindings.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        let pressed = key.kind != KeyEventKind::Release;

        // F2 is handled by the host so it keeps working while locked
        if key.code == KeyCode::F(2) {
            if pressed {
                let locked = !self.is_locked();
                self.keys.set_prevent_keyboard_action(locked);
                tracing::info!(locked, "toggled keyboard lock");
            }
            return;
        }

        let focus = self.state.borrow().focus;
        if focus == Focus::Search && self.edit_search(&key) {
            return;
        }

        let Some(event) = KeyEvent::from_crossterm(&key) else {
            return;
        };
        let event = match focus {
            Focus::Search => event.from_target(SEARCH_TARGET),
            Focus::List => event,
        };

        self.deliver(event.clone());
        match event.event_type {
            KeyEventType::KeyDown if !self.release_events => {
                self.deliver(event.released());
                self.release_modifiers(&event);
            }
            // Terminals report the release of a chord key but never the
            // lone release of ctrl or alt
            KeyEventType::KeyUp => self.release_modifiers(&event),
            KeyEventType::KeyDown => {}
        }
    }

    fn deliver(&mut self, mut event: KeyEvent) {
        self.keys.handle_key_event(&mut event);
        if event.is_propagation_stopped() {
            tracing::debug!(which = event.which, "key swallowed");
        }
    }

    /// Deliver keyups for the ctrl/alt keys `event` was sent with.
    fn release_modifiers(&mut self, event: &KeyEvent) {
        for (flag, name) in [(KeyModifiers::CONTROL, "ctrl"), (KeyModifiers::ALT, "alt")] {
            if event.modifiers.contains(flag) {
                if let Some(release) = KeyEvent::named(KeyEventType::KeyUp, name) {
                    self.deliver(release);
                }
            }
        }
    }

    /// Apply text editing keys to the search box. Returns true if consumed.
    fn edit_search(&mut self, key: &crossterm::event::KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        let mut state = self.state.borrow_mut();
        match key.code {
            KeyCode::Char(c) => {
                if key.kind != KeyEventKind::Release {
                    state.search.push(c);
                    state.selected = 0;
                }
                true
            }
            KeyCode::Backspace => {
                if key.kind != KeyEventKind::Release {
                    state.search.pop();
                    state.selected = 0;
                }
                true
            }
            _ => false,
        }
    }
}

impl KeyedView for App {
    type Surface = MemorySurface;

    fn key_bindings(&mut self) -> &mut KeyBindings {
        &mut self.keys
    }

    fn delegate_view_events(&mut self) {
        tracing::debug!("delegating view events");
    }

    fn undelegate_view_events(&mut self) {
        tracing::debug!("undelegating view events");
    }
}

fn define(
    methods: &mut MethodTable,
    state: &Rc<RefCell<AppState>>,
    name: &'static str,
    action: fn(&mut AppState),
) {
    let state = state.clone();
    methods.define(name, move |_, key| {
        let mut state = state.borrow_mut();
        action(&mut state);
        state.record(name, key);
    });
}
