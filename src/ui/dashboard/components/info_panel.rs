//! Dashboard info panel component
//!
//! Renders server and lot summary information

use crate::environment::Environment;
use crate::lot::Machine;

use super::super::state::DashboardState;
use super::super::utils::format_uptime;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    let env_color = match state.environment {
        Environment::Local => Color::Green,
        Environment::Custom { .. } => Color::Yellow,
    };
    info_lines.push(Line::from(vec![Span::styled(
        format!("Server: {}", state.environment.server_url()),
        Style::default().fg(env_color),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Uptime: {}", format_uptime(state.start_time.elapsed())),
        Style::default().fg(Color::LightGreen),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Refresh: every {}s", state.refresh_interval.as_secs()),
        Style::default().fg(Color::LightBlue),
    )]));

    let last_refresh = state
        .last_refresh_timestamp
        .as_deref()
        .unwrap_or("Never");
    info_lines.push(Line::from(vec![Span::styled(
        format!("Last refresh: {}", last_refresh),
        Style::default().fg(Color::LightBlue),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Parked: {}", state.board.total()),
        Style::default().fg(Color::LightYellow),
    )]));

    let per_machine = Machine::ALL
        .iter()
        .map(|&machine| format!("M{} {}", machine, state.board.list(machine).vehicles.len()))
        .collect::<Vec<_>>()
        .join(" / ");
    info_lines.push(Line::from(vec![Span::styled(
        per_machine,
        Style::default().fg(Color::Gray),
    )]));

    let info_block = Block::default()
        .title("LOT INFO")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}
