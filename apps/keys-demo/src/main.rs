//! Keys Demo - Try out view key bindings in a small notes browser.

mod app;
mod config;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let config = config::load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events are only reported with the kitty keyboard protocol
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::info!(release_events, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(config, release_events).and_then(|mut app| run_app(&mut terminal, &mut app));

    let restored = restore_terminal(&mut terminal, release_events);
    result.and(restored.map_err(Into::into))
}

/// Run every restore step, even after one fails, and report the first error.
fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
    release_events: bool,
) -> io::Result<()> {
    let pop = if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    first_error([
        pop,
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    ])
}

fn first_error<const N: usize>(steps: [io::Result<()>; N]) -> io::Result<()> {
    steps.into_iter().collect()
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

/// Log to a file in the data directory; the terminal belongs to the UI.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    let Some(dir) = config::log_dir() else {
        return;
    };
    if let Err(err) = fs::create_dir_all(&dir) {
        eprintln!("Warning: Could not create log directory: {err}");
        return;
    }
    let file = match File::create(dir.join("keys-demo.log")) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: Could not initialize file logging: {err}");
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_reports_earliest_failure() {
        let result = first_error([
            Ok(()),
            Err(io::Error::other("pop failed")),
            Err(io::Error::other("leave failed")),
        ]);
        assert_eq!(result.unwrap_err().to_string(), "pop failed");
        assert!(first_error([Ok(()), Ok(())]).is_ok());
    }
}
