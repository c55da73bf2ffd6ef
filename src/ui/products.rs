use crate::app::{App, LoadState};
use crate::catalog::DisplayUnit;
use crate::util::{display_width, strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const SPINNER: [char; super::loop_runner::SPINNER_FRAMES] =
    ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

const COPIED_MARKER: &str = "✓ copied";

/// Render the product list panel
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(list_title(app));
    app.list_visible_rows = area.height.saturating_sub(2) as usize;

    let placeholder = match app.state {
        LoadState::Idle | LoadState::InitialLoading => Some(format!(
            "{} Loading products...",
            SPINNER[app.spinner_frame % SPINNER.len()]
        )),
        LoadState::Failed => Some("Could not load the catalog".to_string()),
        LoadState::Ready => app.display.notice().map(|n| n.message().to_string()),
    };
    if let Some(text) = placeholder {
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .display
        .units()
        .iter()
        .enumerate()
        .map(|(i, unit)| list_row(unit, app.copied_units.contains(&i), inner_width))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn list_title(app: &App) -> String {
    if app.state != LoadState::Ready {
        return "Products".to_string();
    }
    format!(
        "Products ({} of {})",
        app.display.len(),
        app.store.active().len()
    )
}

fn list_row(unit: &DisplayUnit, copied: bool, width: usize) -> ListItem<'static> {
    let subtitle = strip_control_chars(&unit.subtitle).into_owned();
    let marker = if copied { COPIED_MARKER } else { "" };
    // Title gets whatever the subtitle and marker leave over
    let reserved = display_width(&subtitle) + display_width(marker) + 4;
    let title_width = width.saturating_sub(reserved).max(12);
    let title = truncate_to_width(&strip_control_chars(&unit.title), title_width).into_owned();

    let mut spans = vec![
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(subtitle, Style::default().fg(Color::DarkGray)),
    ];
    if copied {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(COPIED_MARKER, Style::default().fg(Color::Green)));
    }
    ListItem::new(Line::from(spans))
}

/// Render the details panel for the selected product
pub fn render_details(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let Some(unit) = app.selected_unit() else {
        f.render_widget(block, area);
        return;
    };

    let label = Style::default().fg(Color::Cyan);
    let field = |name: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<6}", name), label),
            Span::raw(strip_control_chars(value).into_owned()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            strip_control_chars(&unit.title).into_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        field("SKU", &unit.sku),
        field("Image", &unit.image_url),
        field("Link", &unit.link),
        Line::default(),
        Line::from(Span::styled(
            "Enter open · Ctrl+Y copy SKU · Ctrl+E export",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
