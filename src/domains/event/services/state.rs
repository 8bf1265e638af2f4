// Event domain state
use crate::domains::event::services::EventService;
use crate::shared::database::Database;

#[derive(Clone)]
pub struct EventState {
    pub event_service: EventService,
}

impl EventState {
    pub fn new(db: Database) -> Self {
        Self {
            event_service: EventService::new(db),
        }
    }
}
