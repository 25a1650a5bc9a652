//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::{Event, EventType};
use crate::lot::LotBoard;
use crate::view::format_board;
use std::error::Error;

/// Runs the application in headless mode
///
/// Prints the board whenever it changes and every displayable event, until
/// Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment, session.refresh_interval);

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut printer = HeadlessPrinter::default();

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if let Some(output) = printer.format(&event) {
                    println!("{}", output);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    print_session_shutdown();
    // Nobody reads events from here on
    drop(session.event_receiver);
    drop(session.command_sender);
    session.workers.join().await;
    print_session_exit_success();

    Ok(())
}

/// Turns worker events into console output, skipping boards identical to the last one printed.
#[derive(Debug, Default)]
struct HeadlessPrinter {
    last_board: Option<LotBoard>,
}

impl HeadlessPrinter {
    fn format(&mut self, event: &Event) -> Option<String> {
        match (&event.event_type, &event.board) {
            (EventType::Render, Some(board)) => {
                if self.last_board.as_ref() == Some(board) {
                    return None;
                }
                self.last_board = Some(board.clone());
                Some(format!(
                    "[{}] {}\n{}",
                    event.timestamp,
                    event.msg,
                    format_board(board).trim_end()
                ))
            }
            _ if event.should_display() => Some(event.to_string()),
            _ => None,
        }
    }
}
