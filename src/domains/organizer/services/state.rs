// Organizer domain state
use crate::domains::organizer::services::OrganizerService;
use crate::shared::database::Database;

#[derive(Clone)]
pub struct OrganizerState {
    pub organizer_service: OrganizerService,
}

impl OrganizerState {
    pub fn new(db: Database) -> Self {
        Self {
            organizer_service: OrganizerService::new(db),
        }
    }
}
