//! Output seam between the lot controller and whatever displays the lot.

use crate::events::{Event, EventType};
use crate::lot::{LotBoard, VehicleItem};

#[cfg(test)]
use mockall::automock;

/// Rendering capability injected into the lot controller.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait LotView: Send + Sync {
    /// Replaces the displayed contents of every machine list.
    async fn render(&self, board: LotBoard);

    /// Shows a blocking message to the user.
    async fn alert(&self, message: String);

    /// Empties the plate input after `plate` was parked, unless it was edited since.
    async fn clear_plate_input(&self, plate: String);

    /// Records an activity event.
    async fn notify(&self, event: Event);
}

/// Prints to the terminal, for one-shot commands.
#[derive(Debug, Clone, Default)]
pub struct ConsoleView {
    json: bool,
}

impl ConsoleView {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[async_trait::async_trait]
impl LotView for ConsoleView {
    async fn render(&self, board: LotBoard) {
        if self.json {
            match serde_json::to_string_pretty(&board) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to serialize board: {}", e),
            }
        } else {
            print!("{}", format_board(&board));
        }
    }

    async fn alert(&self, message: String) {
        crate::print_cmd_warn!("Invalid input", "{}", message);
    }

    async fn clear_plate_input(&self, _plate: String) {}

    async fn notify(&self, event: Event) {
        // Keep stdout clean for machine-readable output
        if self.json || !event.should_display() {
            return;
        }
        if event.event_type == EventType::Error {
            eprintln!("{}", event);
        } else {
            println!("{}", event);
        }
    }
}

/// One line per vehicle: plate, markers and exit-queue position.
pub fn format_vehicle(item: &VehicleItem) -> String {
    let mut line = format!("{:>6}  {}", item.id, item.label);
    for marker in item.markers() {
        line.push_str(&format!(" [{}]", marker));
    }
    if item.is_queued() {
        line.push_str(&format!(" (exit #{})", item.exit_order));
    }
    line
}

/// Plain-text rendering of the three machine lists.
pub fn format_board(board: &LotBoard) -> String {
    let mut out = String::new();
    for list in &board.machines {
        out.push_str(&format!(
            "Machine {} ({} vehicles)\n",
            list.machine,
            list.vehicles.len()
        ));
        if list.vehicles.is_empty() {
            out.push_str("       (empty)\n");
        }
        for item in &list.vehicles {
            out.push_str(&format_vehicle(item));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::{VehicleId, VehicleRecord};

    fn board() -> LotBoard {
        LotBoard::from_records(vec![
            VehicleRecord {
                id: VehicleId::new(1),
                plate: "12가3456".to_string(),
                low: true,
                small: true,
                machine: 2,
                exit_order: 0,
            },
            VehicleRecord {
                id: VehicleId::new(2),
                plate: "34나5678".to_string(),
                low: false,
                small: false,
                machine: 2,
                exit_order: 1,
            },
        ])
    }

    #[test]
    fn test_vehicle_line_shows_both_markers() {
        let board = board();
        let line = format_vehicle(&board.machines[1].vehicles[0]);
        assert!(line.contains("12가3456"));
        assert!(line.contains("[low]"));
        assert!(line.contains("[small]"));
    }

    #[test]
    fn test_vehicle_line_without_flags_has_no_markers() {
        let board = board();
        let line = format_vehicle(&board.machines[1].vehicles[1]);
        assert!(!line.contains('['));
        assert!(line.ends_with("(exit #1)"));
    }

    #[test]
    fn test_board_lists_every_machine() {
        let text = format_board(&board());
        assert!(text.contains("Machine 1 (0 vehicles)"));
        assert!(text.contains("Machine 2 (2 vehicles)"));
        assert!(text.contains("Machine 3 (0 vehicles)"));
    }
}
