use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::RowRecord;

/// Row interaction reported by the overlay collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LadderEvent {
    Hover,
    Click,
}

/// Payload delivered to row event handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEvent {
    pub event: LadderEvent,
    pub index: usize,
    /// Last-seen row at `index`; clicks on empty rows carry `None`.
    pub data: Option<RowRecord>,
}

/// Token returned by `on`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

pub type RowEventHandlerFn = Arc<dyn Fn(&RowEvent) + Send + Sync + 'static>;

/// Subscriber registry for row events. Handlers run in registration order.
#[derive(Default)]
pub struct EventRegistry {
    next_id: u64,
    handlers: Vec<(LadderEvent, HandlerId, RowEventHandlerFn)>,
}

impl EventRegistry {
    pub fn on(
        &mut self,
        event: LadderEvent,
        handler: impl Fn(&RowEvent) + Send + Sync + 'static,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((event, id, Arc::new(handler)));
        id
    }

    /// Removes one handler. Returns `true` when it was registered for `event`.
    pub fn off(&mut self, event: LadderEvent, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers
            .retain(|(entry_event, entry_id, _)| !(*entry_event == event && *entry_id == id));
        self.handlers.len() != before
    }

    /// Calls every handler subscribed to `row_event.event`; returns how many ran.
    pub fn emit(&self, row_event: &RowEvent) -> usize {
        let mut delivered = 0;
        for (event, _, handler) in &self.handlers {
            if *event == row_event.event {
                handler(row_event);
                delivered += 1;
            }
        }
        delivered
    }

    #[must_use]
    pub fn handler_count(&self, event: LadderEvent) -> usize {
        self.handlers
            .iter()
            .filter(|(entry_event, _, _)| *entry_event == event)
            .count()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("hover", &self.handler_count(LadderEvent::Hover))
            .field("click", &self.handler_count(LadderEvent::Click))
            .finish()
    }
}
