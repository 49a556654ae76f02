use crate::app::App;
use crate::tooltip;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Tooltip overlay dimensions in character cells (the original drew a
/// 200x75 px box at the window origin)
const TOOLTIP_WIDTH: u16 = 30;
const TOOLTIP_HEIGHT: u16 = 5;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Life Expectancy ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Render at the actual inner size (the viewport tracks the full
    // terminal; resizes are caught by the event loop)
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let canvas = app
        .atlas
        .render(inner.width as usize, inner.height as usize, &viewport);

    frame.render_widget(MapWidget { canvas }, inner);

    // Tooltip overlay at the map origin, only while a country is selected
    if let Some(country) = app.selected_country() {
        let text = tooltip::format_tooltip(&country.name, &country.code, &app.life_exp, &app.gdp);
        render_tooltip(frame, &text, inner);
    }
}

/// Custom widget that copies the colored braille canvas into the buffer
struct MapWidget {
    canvas: crate::braille::BrailleCanvas,
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for cy in 0..area.height as usize {
            for cx in 0..area.width as usize {
                let (ch, color) = self.canvas.cell(cx, cy);
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + cx as u16;
                let y = area.y + cy as u16;
                let cell = &mut buf[(x, y)];
                cell.set_char(ch);
                if let Some(rgb) = color {
                    cell.set_fg(Color::Rgb(rgb.r, rgb.g, rgb.b));
                }
            }
        }
    }
}

/// Fixed-position tooltip box: cream background, black text, anchored at
/// the top-left of the map area
fn render_tooltip(frame: &mut Frame, text: &str, inner: Rect) {
    let width = TOOLTIP_WIDTH.min(inner.width);
    let height = TOOLTIP_HEIGHT.min(inner.height);
    if width < 3 || height < 3 {
        return;
    }

    let overlay = Rect {
        x: inner.x,
        y: inner.y,
        width,
        height,
    };

    let box_style = Style::default()
        .bg(Color::Rgb(255, 250, 240))
        .fg(Color::Black);

    let paragraph = Paragraph::new(text.to_string())
        .style(box_style)
        .block(Block::default().borders(Borders::ALL).style(box_style));

    frame.render_widget(paragraph, overlay);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let coverage = app.atlas.coverage(&app.life_exp);

    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} countries, {} with data", app.atlas.len(), coverage),
            Style::default().fg(Color::Green),
        ),
    ];

    if let Some(country) = app.selected_country() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            country.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        " | click:select hjkl:pan +/-:zoom r:reset q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}
