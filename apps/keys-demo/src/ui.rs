//! UI rendering for the key binding demo.

use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_search(f, app, chunks[0]);
    draw_notes(f, app, body[0]);
    draw_fired(f, app, body[1]);
    draw_status(f, app, chunks[2]);

    if app.state.borrow().show_help {
        draw_help(f, app);
    }
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let state = app.state.borrow();
    let searching = state.focus == Focus::Search;

    let title = if searching {
        format!(" Search: {}_ ", state.search)
    } else if !state.search.is_empty() {
        format!(" Filter: {} ", state.search)
    } else {
        " Notes ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if searching {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    f.render_widget(block, area);
}

fn draw_notes(f: &mut Frame, app: &App, area: Rect) {
    let state = app.state.borrow();
    let filtered = state.filtered();

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let style = if i == state.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::raw("  "), Span::styled(*note, style)]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} notes ", filtered.len())),
    );
    f.render_widget(list, area);
}

fn draw_fired(f: &mut Frame, app: &App, area: Rect) {
    let state = app.state.borrow();
    let height = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = state
        .fired
        .iter()
        .rev()
        .take(height)
        .map(|line| ListItem::new(Line::from(line.as_str())))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Fired ({} saves) ", state.saves)),
    );
    f.render_widget(list, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let lock = if app.is_locked() {
        Span::styled(" LOCKED ", Style::default().fg(Color::Black).bg(Color::Red))
    } else {
        Span::raw("")
    };

    let status = Line::from(vec![
        lock,
        Span::styled(
            format!(
                " {}  F1: Bindings  F2: Lock  ctrl+q: Quit",
                app.latch_label()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(status), area);
}

fn draw_help(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Registered bindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        app.binding_lines()
            .into_iter()
            .map(|binding| Line::from(format!("  {binding}"))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "F1 to close",
        Style::default().fg(Color::DarkGray),
    )));

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

fn centered_rect(px: u16, py: u16, area: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - py) / 2),
            Constraint::Percentage(py),
            Constraint::Percentage((100 - py) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - px) / 2),
            Constraint::Percentage(px),
            Constraint::Percentage((100 - px) / 2),
        ])
        .split(v[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_KEYS;
    use ratatui::{backend::TestBackend, Terminal};
    use view_keys::KeysConfig;

    #[test]
    fn test_draw_with_help() {
        let app = App::new(KeysConfig::from_toml_str(DEFAULT_KEYS).unwrap(), false).unwrap();
        app.state.borrow_mut().show_help = true;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Registered bindings"));
        assert!(text.contains("ctrl+s on keyup"));
    }
}
