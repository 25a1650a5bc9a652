//! Add-vehicle form component

use super::super::state::{DashboardState, InputMode};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_input(f: &mut Frame, area: Rect, state: &DashboardState) {
    let editing = state.input_mode == InputMode::EditPlate;
    let form = &state.form;

    let cursor = if editing && state.tick % 10 < 5 { "_" } else { " " };
    let plate_style = if editing {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Plate: ", Style::default().fg(Color::Gray)),
        Span::styled(format!("{}{}", form.plate, cursor), plate_style),
        Span::styled("  Small: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if form.small { "[x]" } else { "[ ]" },
            Style::default().fg(Color::LightBlue),
        ),
        Span::styled("  Machine: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("< {} >", form.machine),
            Style::default().fg(Color::LightYellow),
        ),
    ])];

    if let Some(message) = state.active_alert() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let border_color = if editing { Color::LightYellow } else { Color::Cyan };
    let block = Block::default()
        .title("ADD VEHICLE")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
