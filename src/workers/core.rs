//! Core worker utilities

use crate::events::Event;
use crate::lot::LotBoard;
use crate::view::LotView;
use tokio::sync::mpsc;

/// Forwards everything the controller wants displayed to the UI as events.
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let level: log::Level = event.log_level.into();
        log::log!(level, "{}", event.msg);
        let _ = self.sender.send(event).await;
    }
}

#[async_trait::async_trait]
impl LotView for EventSender {
    async fn render(&self, board: LotBoard) {
        self.send_event(Event::render(board)).await;
    }

    async fn alert(&self, message: String) {
        self.send_event(Event::alert(message)).await;
    }

    async fn clear_plate_input(&self, plate: String) {
        self.send_event(Event::form_cleared(plate)).await;
    }

    async fn notify(&self, event: Event) {
        self.send_event(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;

    #[tokio::test]
    async fn test_view_calls_become_events() {
        let (tx, mut rx) = mpsc::channel(8);
        let view = EventSender::new(tx);

        view.render(LotBoard::default()).await;
        view.alert("Plate number is required".to_string()).await;
        view.clear_plate_input("12가3456".to_string()).await;

        assert_eq!(rx.recv().await.unwrap().event_type, EventType::Render);
        let alert = rx.recv().await.unwrap();
        assert_eq!(alert.event_type, EventType::Alert);
        assert_eq!(alert.msg, "Plate number is required");
        let cleared = rx.recv().await.unwrap();
        assert_eq!(cleared.event_type, EventType::FormCleared);
        assert_eq!(cleared.msg, "12가3456");
    }

    #[tokio::test]
    async fn test_closed_receiver_is_ignored() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let view = EventSender::new(tx);
        view.alert("nobody listening".to_string()).await;
    }
}
