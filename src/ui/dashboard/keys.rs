//! Dashboard key bindings

use super::state::{DashboardState, InputMode};
use crate::consts::cli_consts::ui::MAX_PLATE_CHARS;
use crate::workers::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the app loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Send(Command),
}

impl DashboardState {
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        match self.input_mode {
            InputMode::Browse => self.handle_browse_key(key.code),
            InputMode::EditPlate => self.handle_edit_key(key.code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.form.machine = self.selected_machine;
                self.input_mode = InputMode::EditPlate;
            }
            KeyCode::Char('r') => return KeyAction::Send(Command::Refresh),
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_machine = self.selected_machine.prev();
                self.clamp_selection();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_machine = self.selected_machine.next();
                self.clamp_selection();
            }
            KeyCode::Char(c @ '1'..='3') => {
                if let Ok(machine) = c.to_string().parse() {
                    self.selected_machine = machine;
                    self.clamp_selection();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_row += 1;
                self.clamp_selection();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(vehicle) = self.selected_vehicle() {
                    return KeyAction::Send(Command::Remove(vehicle.id));
                }
            }
            KeyCode::Char('x') => {
                if let Some(vehicle) = self.selected_vehicle() {
                    return KeyAction::Send(Command::QueueExit(vehicle.id));
                }
            }
            KeyCode::Char('e') => {
                if let Some(vehicle) = self.selected_vehicle() {
                    return KeyAction::Send(Command::Exit(vehicle.id));
                }
            }
            _ => {}
        }
        KeyAction::None
    }

    fn handle_edit_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Esc => self.input_mode = InputMode::Browse,
            KeyCode::Enter => {
                // The same form is only sent once until the server answers
                if self.pending_add.as_ref() == Some(&self.form) {
                    return KeyAction::None;
                }
                self.pending_add = Some(self.form.clone());
                return KeyAction::Send(Command::Add(self.form.clone()));
            }
            KeyCode::Tab => self.form.small = !self.form.small,
            KeyCode::Left => self.form.machine = self.form.machine.prev(),
            KeyCode::Right => self.form.machine = self.form.machine.next(),
            KeyCode::Backspace => {
                self.form.plate.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.form.plate.chars().count() < MAX_PLATE_CHARS {
                    self.form.plate.push(c);
                }
            }
            _ => {}
        }
        KeyAction::None
    }
}
