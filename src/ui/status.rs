use crate::app::{App, LoadState, StatusKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    let (text, style): (Cow<'_, str>, Style) = match &app.status {
        Some(status) => (Cow::Borrowed(&*status.text), style_for(status.kind)),
        None => (Cow::Borrowed(key_hints(app.state)), style_for(StatusKind::Info)),
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn key_hints(state: LoadState) -> &'static str {
    match state {
        LoadState::Ready => "type to filter  [↑↓]move [Enter]open [Ctrl+Y]copy [Ctrl+E]export [Esc]clear/quit",
        _ => "[Esc]quit",
    }
}

fn style_for(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Info => Style::default().bg(Color::DarkGray).fg(Color::White),
        StatusKind::Success => Style::default().bg(Color::Green).fg(Color::Black),
        StatusKind::Error => Style::default().bg(Color::Red).fg(Color::White),
    }
}
