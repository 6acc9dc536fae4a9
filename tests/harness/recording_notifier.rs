use std::sync::{Arc, Mutex};

use consensus_market::domain::Record;
use consensus_market::port::{Event, Notifier};

/// Thread-safe event collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("lock notifier events").len()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock notifier events").clone()
    }

    pub fn records(&self) -> Vec<Record> {
        self.events().into_iter().map(|event| event.record).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events
            .lock()
            .expect("lock notifier events")
            .push(event);
    }
}
