//! Render functions for the TUI.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::{products, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render function.
///
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_filter(f, app, rows[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);
    products::render(f, app, panels[0]);
    products::render_details(f, app, panels[1]);

    status::render(f, app, rows[2]);

    if let Some(ref message) = app.alert {
        render_alert_overlay(f, message);
    }
}

fn render_filter(f: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(format!("{}_", app.filter_input)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filter: SKU, name or EAN "),
    );
    f.render_widget(paragraph, area);
}

/// Blocking notification centered on screen.
fn render_alert_overlay(f: &mut Frame, message: &str) {
    let area = f.area();

    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(format!("{}\n\n(Enter/Esc) Dismiss", message))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{LoadState, Signal};
    use crate::catalog::ProductRecord;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_renders_products_and_status() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(Config::default());
        app.state = LoadState::InitialLoading;
        app.dispatch(
            Signal::DataReady(vec![ProductRecord {
                sku: Some("7076192".into()),
                name: Some("Detergente Ypê".into()),
                ..Default::default()
            }]),
            &tx,
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Detergente"));
        assert!(text.contains("SKU 7076192"));
        assert!(text.contains("Loaded 1 products"));
        assert_eq!(app.list_visible_rows, 14);
    }

    #[tokio::test]
    async fn test_renders_no_products_notice() {
        let (tx, _rx) = mpsc::channel(8);
        let mut app = App::new(Config::default());
        app.state = LoadState::InitialLoading;
        app.dispatch(Signal::DataReady(Vec::new()), &tx);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(screen_text(&terminal).contains("No products found"));
    }

    #[test]
    fn test_alert_overlay_drawn() {
        let mut app = App::new(Config::default());
        app.alert = Some("Could not copy code".into());

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Could not copy code"));
        assert!(text.contains("Dismiss"));
    }

    #[test]
    fn test_small_terminal_message() {
        let mut app = App::new(Config::default());
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        assert!(screen_text(&terminal).contains("Terminal too small"));
    }
}
