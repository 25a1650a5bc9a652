//! Machine columns component
//!
//! One list per machine with the vehicles parked on it

use super::super::state::{DashboardState, InputMode};
use crate::lot::{Machine, MachineList, VehicleItem};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState};

pub fn render_lots(f: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for machine in Machine::ALL {
        render_machine(f, columns[machine.index()], state, state.board.list(machine));
    }
}

fn render_machine(f: &mut Frame, area: Rect, state: &DashboardState, list: &MachineList) {
    let selected = state.input_mode == InputMode::Browse && state.selected_machine == list.machine;
    let border_color = if selected { Color::LightYellow } else { Color::Cyan };

    let block = Block::default()
        .title(format!(
            "MACHINE {} ({})",
            list.machine,
            list.vehicles.len()
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    if list.vehicles.is_empty() {
        let empty = List::new([ListItem::new(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = list.vehicles.iter().map(vehicle_line).map(ListItem::new).collect();
    let widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if selected {
        list_state.select(Some(state.selected_row));
    }
    f.render_stateful_widget(widget, area, &mut list_state);
}

fn vehicle_line(item: &VehicleItem) -> Line<'static> {
    let mut spans = vec![Span::styled(
        item.label.clone(),
        Style::default().fg(Color::White),
    )];
    if item.low {
        spans.push(Span::styled(" [LOW]", Style::default().fg(Color::LightGreen)));
    }
    if item.small {
        spans.push(Span::styled(" [SMALL]", Style::default().fg(Color::LightBlue)));
    }
    if item.is_queued() {
        spans.push(Span::styled(
            format!(" exit #{}", item.exit_order),
            Style::default().fg(Color::LightMagenta),
        ));
    }
    Line::from(spans)
}
