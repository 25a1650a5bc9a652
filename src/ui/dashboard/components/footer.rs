//! Dashboard footer component
//!
//! Renders the key bindings for the current input mode

use super::super::state::{DashboardState, InputMode};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = match state.input_mode {
        InputMode::Browse => {
            "[A] Add | [←→/1-3] Machine | [↑↓] Select | [D] Remove | [X] Queue exit | [E] Exit | [R] Refresh | [Q] Quit"
        }
        InputMode::EditPlate => {
            "Type plate | [Tab] Small | [←→] Machine | [Enter] Park | [Esc] Back"
        }
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
